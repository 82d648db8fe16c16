//! Dotted attribute path resolution
//!
//! A path like `actor.system.attributes.init` walks a combatant's attribute
//! tree one field at a time. Missing segments resolve to `None` ("no value"),
//! never to an error. An explicit JSON `null` is a present value.

use serde_json::Value;

use crate::core::types::Combatant;

/// Walk `path` through an arbitrary JSON tree
///
/// Numeric segments index into arrays; any other segment against an array,
/// or any segment against a scalar, is absent.
pub fn resolve_value<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Parse numeric-looking text such as `"12"` or `" 3.5 "`
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric reading of a resolved value: numbers and numeric strings only
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Resolve `path` against a combatant
///
/// The first segment may name one of the combatant's own fields; anything
/// else is looked up in the attribute tree.
pub fn resolve(combatant: &Combatant, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }

    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    let builtin = match head {
        "id" => Some(Value::String(combatant.id.0.clone())),
        "initiative" => Some(
            combatant
                .initiative
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        ),
        "visible" => Some(Value::Bool(combatant.visible)),
        "hidden" => Some(Value::Bool(combatant.hidden)),
        "hasPlayerOwner" => Some(Value::Bool(combatant.has_player_owner)),
        "turnIndex" => Some(Value::from(combatant.turn_index)),
        _ => None,
    };

    match (builtin, rest) {
        (Some(value), None) => Some(value),
        // Built-in fields are scalars; nothing lives beneath them
        (Some(_), Some(_)) => None,
        (None, _) => resolve_value(&combatant.attributes, path).cloned(),
    }
}
