//! JSON schema generation for strict structured output.

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// Generate a strict-mode schema for `T`.
///
/// Strict mode requires `additionalProperties: false` on every object and
/// every property listed in `required`, including nullable ones.
pub(crate) fn strict_schema<T: JsonSchema>() -> Result<Value, serde_json::Error> {
    let schema = schema_for!(T);
    let mut value = serde_json::to_value(schema)?;

    close_objects(&mut value);

    if let Value::Object(map) = &mut value {
        map.remove("$schema");
        map.remove("definitions");
    }

    Ok(value)
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let keys: Vec<Value> = props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(keys));
                }
            }

            for (_, v) in map.iter_mut() {
                close_objects(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                close_objects(item);
            }
        }
        _ => {}
    }
}
