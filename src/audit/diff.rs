//! Diff generation for audit logging

use serde_json::Value;

/// Summarize top-level field changes between two JSON snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();
            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }
            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }
            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let v = json!({"category": "Food"});
        assert!(generate_diff(&v, &v).is_none());
    }

    #[test]
    fn test_field_changes() {
        let before = json!({"description": "Lunch", "tags": ["work"]});
        let after = json!({"description": "Dinner", "tags": ["work", "team"]});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("description: \"Lunch\" -> \"Dinner\""));
        assert!(diff.contains("tags: [\"work\"] -> [\"work\", \"team\"]"));
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"a": 1});
        let after = json!({"b": 2});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("a: 1 -> (removed)"));
        assert!(diff.contains("b: (added) -> 2"));
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(60);
        let diff = generate_diff(&json!({"d": "short"}), &json!({"d": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }
}
