//! Variable combining
//!
//! - `replace`: shallow, top-level keys of the later mapping win
//! - `merge`: nested mappings merge recursively, sequences and scalars
//!   are replaced by the later value

use crate::domain::model::{HashBehaviour, VariableRecord};
use crate::utils::error::{LocalVarsError, Result};
use serde_json::Value;

/// Combine `overlay` into `base` according to `behaviour`.
///
/// Both sides must be mappings.
pub fn combine_vars(
    base: VariableRecord,
    overlay: Value,
    behaviour: HashBehaviour,
) -> Result<VariableRecord> {
    let overlay = match overlay {
        Value::Object(map) => map,
        other => {
            return Err(LocalVarsError::CombineError {
                left: "dict".to_string(),
                right: type_name(&other).to_string(),
            })
        }
    };

    Ok(match behaviour {
        HashBehaviour::Replace => {
            let mut result = base;
            result.extend(overlay);
            result
        }
        HashBehaviour::Merge => merge_hash(base, overlay),
    })
}

/// Recursive merge of two mappings, `overlay` wins on conflicts.
pub fn merge_hash(mut base: VariableRecord, overlay: VariableRecord) -> VariableRecord {
    for (key, overlay_value) in overlay {
        let merged = match (base.remove(&key), overlay_value) {
            (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                Value::Object(merge_hash(base_map, overlay_map))
            }
            (_, overlay_value) => overlay_value,
        };
        base.insert(key, merged);
    }
    base
}

/// Whether a loaded document contributes nothing.
///
/// Null, `false`, zero, empty strings and empty collections are all
/// treated as empty files.
pub fn is_empty_data(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
