use serde_json::Value;

/// Deep merge of engine option objects.
///
/// For every key in `overrides`: when both sides hold JSON objects the merge
/// recurses, otherwise the override value replaces the target value outright.
/// Arrays are opaque replacement values, never merged element-wise. Non-object
/// inputs resolve to the override.
#[must_use]
pub fn merge_options(target: &Value, overrides: &Value) -> Value {
    match (target, overrides) {
        (Value::Object(target_map), Value::Object(override_map)) => {
            let mut merged = target_map.clone();
            for (key, override_value) in override_map {
                match (merged.get(key), override_value) {
                    (Some(Value::Object(_)), Value::Object(_)) => {
                        let nested = merge_options(&merged[key], override_value);
                        merged.insert(key.clone(), nested);
                    }
                    _ => {
                        merged.insert(key.clone(), override_value.clone());
                    }
                }
            }
            Value::Object(merged)
        }
        _ => overrides.clone(),
    }
}
