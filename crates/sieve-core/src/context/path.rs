//! Field path expressions
//!
//! A path is a dot-separated list of segments. It may start with navigation
//! anchors: each `<context>` climbs one step context, `<root>` jumps to the
//! outermost one. Resolution never fails; any miss yields [`Value::Null`].

use super::Context;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;

const CONTEXT_TOKEN: &str = "<context>";
const ROOT_TOKEN: &str = "<root>";

/// Navigation anchor at the head of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `<context>`: the enclosing step context
    Parent,
    /// `<root>`: the outermost step context
    Root,
}

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    anchors: Vec<Anchor>,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Self {
        let mut anchors = Vec::new();
        let mut parts = raw.split('.').peekable();

        while let Some(part) = parts.peek() {
            match *part {
                CONTEXT_TOKEN => anchors.push(Anchor::Parent),
                ROOT_TOKEN => anchors.push(Anchor::Root),
                _ => break,
            }
            parts.next();
        }

        Self {
            raw: raw.to_string(),
            anchors,
            segments: parts.map(str::to_string).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve the path against `ctx`
    ///
    /// Lookup starts at the closest step context, the context itself when
    /// it is one.
    pub fn resolve(&self, ctx: &Context<'_>) -> Value {
        let Some(mut step) = ctx.nearest_step() else {
            return Value::Null;
        };

        for anchor in &self.anchors {
            let next = match anchor {
                Anchor::Parent => step.parent_step(),
                Anchor::Root => step.outermost_step(),
            };
            match next {
                Some(next) => step = next,
                None => {
                    log::trace!("Field path '{}' climbs past the outermost step", self.raw);
                    return Value::Null;
                }
            }
        }

        walk(Cow::Borrowed(step.value()), &self.segments)
    }
}

fn walk(value: Cow<'_, Value>, segments: &[String]) -> Value {
    let Some((head, tail)) = segments.split_first() else {
        return value.into_owned();
    };

    let next = match value {
        Cow::Borrowed(value) => value.lookup(head),
        Cow::Owned(value) => value.lookup(head).map(|v| Cow::Owned(v.into_owned())),
    };

    match next {
        Some(next) => walk(next, tail),
        None => Value::Null,
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
