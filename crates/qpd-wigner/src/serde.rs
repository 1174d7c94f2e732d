use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use qpd_core::errors::{ErrorInfo, QpdError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::opts::WignerOpts;

fn serde_error(code: &str, err: impl ToString) -> QpdError {
    QpdError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, QpdError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json_write", err))?;
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, QpdError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, QpdError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, QpdError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// Loads and validates evaluator options from a `.json`, `.yaml` or `.yml` file.
pub fn load_opts(path: &Path) -> Result<WignerOpts, QpdError> {
    let bytes = fs::read(path).map_err(|err| {
        QpdError::Serde(
            ErrorInfo::new("opts_read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let opts: WignerOpts = match extension.as_deref() {
        Some("json") => from_json_slice(&bytes)?,
        Some("yaml") | Some("yml") => from_yaml_slice(&bytes)?,
        _ => {
            return Err(QpdError::Serde(
                ErrorInfo::new("opts_format", "unsupported options file extension")
                    .with_context("path", path.display())
                    .with_hint("use a .json, .yaml or .yml file"),
            ))
        }
    };
    opts.validate()?;
    Ok(opts)
}
