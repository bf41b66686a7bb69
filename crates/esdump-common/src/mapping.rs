//! Index definition sanitizer
//!
//! `GET /{index}` answers with `{"<index>": {"aliases", "mappings", "settings"}}`.
//! Replaying that document into `PUT /{index}` fails because the backend refuses
//! settings it assigns itself. [`sanitize`] unwraps the single index entry and
//! removes those settings, producing a body that can create a fresh index.

use crate::error::{CommonError, Result};
use serde_json::{Map, Value};

/// Keys under `settings.index` that the backend assigns at creation time.
pub const SERVER_ASSIGNED_SETTINGS: [&str; 6] = [
    "creation_date",
    "uuid",
    "version",
    "provided_name",
    "routing",
    "creation_date_string",
];

/// Strip server-assigned fields from a dumped index definition.
///
/// The input must be a JSON object with exactly one top-level key (the index
/// name). The returned document is the value of that key, pretty printed, with
/// [`SERVER_ASSIGNED_SETTINGS`] removed from `settings.index`. A definition
/// without `settings` is accepted unchanged.
pub fn sanitize(raw: &str) -> Result<String> {
    let root: Map<String, Value> = serde_json::from_str(raw)?;
    if root.len() != 1 {
        return Err(CommonError::invalid_mapping(format!(
            "expected exactly one index, found {}",
            root.len()
        )));
    }

    let Some((index, mut definition)) = root.into_iter().next() else {
        return Err(CommonError::invalid_mapping("empty document"));
    };

    let Value::Object(ref mut fields) = definition else {
        return Err(CommonError::invalid_mapping(format!(
            "definition of '{}' is not an object",
            index
        )));
    };

    if let Some(settings) = fields.get_mut("settings") {
        let settings = settings.as_object_mut().ok_or_else(|| {
            CommonError::invalid_mapping(format!("settings of '{}' is not an object", index))
        })?;

        if let Some(index_settings) = settings.get_mut("index") {
            let index_settings = index_settings.as_object_mut().ok_or_else(|| {
                CommonError::invalid_mapping(format!(
                    "settings.index of '{}' is not an object",
                    index
                ))
            })?;
            for key in SERVER_ASSIGNED_SETTINGS {
                index_settings.remove(key);
            }
        }
    }

    Ok(serde_json::to_string_pretty(&definition)?)
}
