//! Final cleanup of the serialized root object.

use serde_json::Value;

use crate::writer::GLB_BUFFER_URI;

/// A single non-recursive pass over the root object: top-level keys holding an
/// empty array, `null` or an empty string are dropped. Nested objects are left
/// alone; the emitters already omit unused nested fields.
///
/// Buffer defs written in container mode still carry the reserved sentinel URI
/// that keys the `resources` map; the JSON must not, so it is stripped here.
pub(crate) fn clean(mut json: Value) -> Value {
    if let Value::Object(root) = &mut json {
        if let Some(Value::Array(buffers)) = root.get_mut("buffers") {
            for buffer in buffers {
                if let Value::Object(def) = buffer {
                    if def.get("uri").and_then(Value::as_str) == Some(GLB_BUFFER_URI) {
                        def.remove("uri");
                    }
                }
            }
        }
        root.retain(|_, value| !is_void(value));
    }
    json
}

fn is_void(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_empty_top_level_entries() {
        let cleaned = clean(json!({
            "asset": {"version": "2.0"},
            "accessors": [],
            "scene": null,
            "meshes": [{"primitives": []}],
            "copyright": "",
        }));
        assert_eq!(
            cleaned,
            json!({
                "asset": {"version": "2.0"},
                "meshes": [{"primitives": []}],
            })
        );
    }

    #[test]
    fn does_not_recurse_into_nested_objects() {
        let cleaned = clean(json!({"asset": {"generator": ""}}));
        assert_eq!(cleaned, json!({"asset": {"generator": ""}}));
    }

    #[test]
    fn removes_the_container_sentinel_uri() {
        let cleaned = clean(json!({
            "buffers": [
                {"byteLength": 8, "uri": GLB_BUFFER_URI},
                {"byteLength": 4, "uri": "scene.bin"},
            ],
        }));
        assert_eq!(
            cleaned,
            json!({
                "buffers": [
                    {"byteLength": 8},
                    {"byteLength": 4, "uri": "scene.bin"},
                ],
            })
        );
    }
}
