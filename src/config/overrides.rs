use serde_json::Value;

/// Drop null values (unset CLI options) from an override tree, recursively.
///
/// Objects left empty afterwards are removed as well, so an override section
/// with nothing set does not show up in the merged configuration.
pub fn filter_null_values(mut value: Value) -> Value {
    filter_nulls_recursive(&mut value);
    value
}

fn filter_nulls_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for nested in map.values_mut() {
                filter_nulls_recursive(nested);
            }
            map.retain(|_, nested| match nested {
                Value::Null => false,
                Value::Object(inner) => !inner.is_empty(),
                _ => true,
            });
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                filter_nulls_recursive(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nulls_and_empty_sections_are_removed() {
        let filtered = filter_null_values(json!({
            "search": { "max_depth": null, "stop_on_first": false },
            "parallel": { "mode": null }
        }));

        assert_eq!(filtered, json!({ "search": { "stop_on_first": false } }));
    }

    #[test]
    fn test_non_object_values_pass_through() {
        assert_eq!(filter_null_values(json!([1, null])), json!([1, null]));
        assert_eq!(filter_null_values(json!(3)), json!(3));
    }
}
