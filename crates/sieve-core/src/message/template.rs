//! `$name` placeholder substitution
//!
//! Rendering never fails: placeholders without a value and stray `$` signs
//! are kept literally.

use crate::value::Value;
use indexmap::IndexMap;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Render `template`, substituting `$name`, `${name}` and `$$`
pub fn render(template: &str, values: &IndexMap<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                let name = &braced[..end];
                let valid = name.chars().next().is_some_and(is_ident_start)
                    && name.chars().all(is_ident_continue);
                if valid {
                    match values.get(name) {
                        Some(value) => out.push_str(&value.to_string()),
                        None => out.push_str(&rest[pos..pos + end + 3]),
                    }
                    rest = &braced[end + 1..];
                    continue;
                }
            }
            out.push('$');
            rest = after;
            continue;
        }

        if !after.chars().next().is_some_and(is_ident_start) {
            out.push('$');
            rest = after;
            continue;
        }

        let len = after
            .char_indices()
            .find(|(_, c)| !is_ident_continue(*c))
            .map(|(i, _)| i)
            .unwrap_or(after.len());
        let name = &after[..len];
        match values.get(name) {
            Some(value) => out.push_str(&value.to_string()),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_substitutes_known_placeholders() {
        let vals = values(&[("value", Value::from("abc")), ("min", Value::Int(4))]);
        assert_eq!(
            render("'$value' is less than $min unit length", &vals),
            "'abc' is less than 4 unit length"
        );
        assert_eq!(render("${value}def", &vals), "abcdef");
    }

    #[test]
    fn test_keeps_unknown_placeholders() {
        let vals = values(&[]);
        assert_eq!(render("'$value' and ${other}", &vals), "'$value' and ${other}");
    }

    #[test]
    fn test_dollar_edge_cases() {
        let vals = values(&[("a", Value::Int(1))]);
        assert_eq!(render("cost: $$5", &vals), "cost: $5");
        assert_eq!(render("trailing $", &vals), "trailing $");
        assert_eq!(render("$1 and $a", &vals), "$1 and 1");
        assert_eq!(render("${1x} $a", &vals), "${1x} 1");
    }
}
