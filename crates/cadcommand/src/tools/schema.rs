//! Tool schema types and JSON Schema validation.

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::service::CadService;

/// Handler type: takes JSON args + the drawing service, returns the JSON result body.
pub type ToolHandler = Box<dyn Fn(&Value, &CadService) -> CoreResult<Value> + Send + Sync>;

/// Complete tool definition including schema and handler.
pub struct ToolDefinition {
    /// Unique name the tool is invoked by.
    pub name: String,
    pub description: String,
    /// JSON Schema for validating input arguments.
    pub input_schema: Value,
    /// The handler function to execute.
    pub handler: ToolHandler,
}

/// Validate a JSON value against a minimal JSON Schema subset.
///
/// Supports: `type`, `required`, `properties` (recursive), `items`
/// (recursive), `minItems`, `maxItems`, `minimum`, `maximum`.
/// An empty schema `{}` passes anything.
pub fn validate_schema(value: &Value, schema: &Value) -> CoreResult<()> {
    validate_at(value, schema, "")
}

fn validate_at(value: &Value, schema: &Value, path: &str) -> CoreResult<()> {
    let schema_obj = match schema.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if schema_obj.is_empty() {
        return Ok(());
    }

    if let Some(type_val) = schema_obj.get("type") {
        let type_str = type_val
            .as_str()
            .ok_or_else(|| invalid("schema 'type' must be a string".to_string()))?;

        let matches = match type_str {
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            "boolean" => value.is_boolean(),
            "object" => value.is_object(),
            "array" => value.is_array(),
            "null" => value.is_null(),
            other => return Err(invalid(format!("unknown schema type: {other}"))),
        };

        if !matches {
            return Err(invalid(format!(
                "{}expected type '{type_str}', got {}",
                location(path),
                json_type_name(value)
            )));
        }
    }

    // Required fields (only meaningful for objects)
    if let (Some(required), Some(obj)) = (
        schema_obj.get("required").and_then(Value::as_array),
        value.as_object(),
    ) {
        for key in required.iter().filter_map(Value::as_str) {
            if !obj.contains_key(key) {
                return Err(invalid(format!(
                    "{}missing required field: '{key}'",
                    location(path)
                )));
            }
        }
    }

    if let (Some(props_obj), Some(val_obj)) = (
        schema_obj.get("properties").and_then(Value::as_object),
        value.as_object(),
    ) {
        for (key, prop_schema) in props_obj {
            if let Some(prop_value) = val_obj.get(key) {
                validate_at(prop_value, prop_schema, &join(path, key))?;
            }
        }
    }

    if let Some(items) = value.as_array() {
        if let Some(min) = schema_obj.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                return Err(invalid(format!(
                    "{}expected at least {min} items, got {}",
                    location(path),
                    items.len()
                )));
            }
        }
        if let Some(max) = schema_obj.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                return Err(invalid(format!(
                    "{}expected at most {max} items, got {}",
                    location(path),
                    items.len()
                )));
            }
        }
        if let Some(item_schema) = schema_obj.get("items") {
            for (index, item) in items.iter().enumerate() {
                validate_at(item, item_schema, &join(path, &index.to_string()))?;
            }
        }
    }

    if let Some(number) = value.as_f64() {
        if let Some(min) = schema_obj.get("minimum").and_then(Value::as_f64) {
            if number < min {
                return Err(invalid(format!(
                    "{}value {number} is below minimum {min}",
                    location(path)
                )));
            }
        }
        if let Some(max) = schema_obj.get("maximum").and_then(Value::as_f64) {
            if number > max {
                return Err(invalid(format!(
                    "{}value {number} is above maximum {max}",
                    location(path)
                )));
            }
        }
    }

    Ok(())
}

fn invalid(message: String) -> CoreError {
    CoreError::InvalidInput(message)
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("'{path}': ")
    }
}

/// Returns a human-readable name for the JSON type of a value.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point_schema() -> Value {
        json!({"type": "array", "items": {"type": "number"}, "minItems": 2, "maxItems": 3})
    }

    // --- Type checking ---

    #[test]
    fn empty_schema_passes_anything() {
        assert!(validate_schema(&json!(null), &json!({})).is_ok());
        assert!(validate_schema(&json!([1, "a"]), &json!({})).is_ok());
    }

    #[test]
    fn integer_rejects_fractions() {
        let schema = json!({"type": "integer"});
        assert!(validate_schema(&json!(3), &schema).is_ok());
        let err = validate_schema(&json!(3.5), &schema).unwrap_err();
        assert!(err.to_string().contains("expected type 'integer', got number"));
    }

    #[test]
    fn number_accepts_integers() {
        assert!(validate_schema(&json!(4), &json!({"type": "number"})).is_ok());
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(validate_schema(&json!(1), &json!({"type": "decimal"})).is_err());
    }

    // --- Objects ---

    #[test]
    fn missing_required_field() {
        let schema = json!({"type": "object", "required": ["center", "radius"]});
        let err = validate_schema(&json!({"center": [0, 0]}), &schema).unwrap_err();
        assert_eq!(err.to_string(), "missing required field: 'radius'");
    }

    #[test]
    fn nested_property_errors_name_the_path() {
        let schema = json!({
            "type": "object",
            "properties": {"points": {"type": "array", "items": point_schema()}}
        });
        let err = validate_schema(&json!({"points": [[0, 0], ["x", 1]]}), &schema).unwrap_err();
        assert_eq!(err.to_string(), "'points.1.0': expected type 'number', got string");
    }

    #[test]
    fn extra_properties_are_allowed() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}});
        assert!(validate_schema(&json!({"a": "x", "b": 1}), &schema).is_ok());
    }

    // --- Arrays ---

    #[test]
    fn item_count_bounds() {
        assert!(validate_schema(&json!([1, 2]), &point_schema()).is_ok());
        assert!(validate_schema(&json!([1, 2, 3]), &point_schema()).is_ok());
        let short = validate_schema(&json!([1]), &point_schema()).unwrap_err();
        assert_eq!(short.to_string(), "expected at least 2 items, got 1");
        let long = validate_schema(&json!([1, 2, 3, 4]), &point_schema()).unwrap_err();
        assert_eq!(long.to_string(), "expected at most 3 items, got 4");
    }

    // --- Numeric bounds ---

    #[test]
    fn numeric_bounds() {
        let schema = json!({"type": "integer", "minimum": 0, "maximum": 255});
        assert!(validate_schema(&json!(0), &schema).is_ok());
        assert!(validate_schema(&json!(255), &schema).is_ok());
        assert!(validate_schema(&json!(-1), &schema).is_err());
        let err = validate_schema(&json!(256), &schema).unwrap_err();
        assert_eq!(err.to_string(), "value 256 is above maximum 255");
    }
}
