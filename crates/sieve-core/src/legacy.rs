//! Flat legacy error report
//!
//! Older consumers expect errors as a JSON object: root errors map their
//! code to their message, and every field path maps to an object of the
//! same shape. Only the last message per code and path survives, so this
//! form is lossy.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

/// Convert the errors held by `ctx` into the flat legacy form
pub fn to_legacy_messages(ctx: &Context<'_>) -> JsonValue {
    let mut root = Map::new();
    let mut by_path: IndexMap<String, Map<String, JsonValue>> = IndexMap::new();

    for error in ctx.errors().iter() {
        let message = JsonValue::String(error.message().to_string());
        match error.field_path() {
            None => {
                root.insert(error.code().to_string(), message);
            }
            Some(path) => {
                by_path
                    .entry(path.to_string())
                    .or_default()
                    .insert(error.code().to_string(), message);
            }
        }
    }

    for (path, messages) in by_path {
        root.insert(path, JsonValue::Object(messages));
    }
    JsonValue::Object(root)
}
