//! Dotted-path helpers over `serde_json::Value`.

use crate::binding::BindingPath;
use serde_json::{Map, Value};

/// Walk `path` from `root`. Numeric segments index arrays.
pub fn lookup<'a>(root: &'a Value, path: &BindingPath) -> Option<&'a Value> {
    path.segments().try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// Writing through a scalar replaces it with an object. The empty path
/// replaces `root`.
pub fn assign(root: &mut Value, path: &BindingPath, value: Value) {
    let segments: Vec<&str> = path.segments().collect();
    assign_at(root, &segments, value);
}

fn assign_at(target: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    if let Value::Array(items) = target {
        if let Some(slot) = head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            return assign_at(slot, rest, value);
        }
    }

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let slot = map.entry(head.to_string()).or_insert(Value::Null);
        assign_at(slot, rest, value);
    }
}

/// Render a value as display text. Strings are unquoted; null is empty.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Truthiness in the usual scripting sense.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        Value::String(text) => !text.is_empty() && text != "false",
        Value::Array(_) | Value::Object(_) => true,
    }
}
