//! Entry points that turn raw bytes into a [`Manifest`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

use crate::{DecodeError, Manifest, PipelineConfig};

/// Parse a `package.json` payload.
///
/// Unknown keys are ignored. A known key holding a value of the wrong type
/// fails the whole decode with [`DecodeError::Shape`] naming the key.
///
/// # Example
///
/// ```rust
/// use turbo_manifest::{Outputs, parse};
///
/// let manifest = parse(br#"{
///     "name": "web",
///     "workspaces": { "packages": ["apps/*"] },
///     "turbo": { "pipeline": { "build": { "dependsOn": ["^build"] } } }
/// }"#).unwrap();
///
/// let build = manifest.task("build").unwrap();
/// assert_eq!(build.outputs, Outputs::Unset);
/// assert_eq!(manifest.workspaces.unwrap().globs(), ["apps/*"]);
/// ```
pub fn parse(bytes: &[u8]) -> Result<Manifest, DecodeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| DecodeError::Syntax { source })?;
    let object = serde_json::from_value::<Map<String, Value>>(value)
        .map_err(|source| DecodeError::Shape {
            field: None,
            source,
        })?;
    let manifest = Manifest::from_object(object)?;
    tracing::debug!(
        name = manifest.name.as_deref().unwrap_or_default(),
        tasks = manifest.pipeline().map_or(0, PipelineConfig::len),
        "decoded manifest"
    );
    Ok(manifest)
}

/// Read and parse a `package.json` file from disk.
///
/// Read failures are reported as [`DecodeError::Io`] carrying the path.
pub fn read_file(path: impl AsRef<Path>) -> Result<Manifest, DecodeError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading manifest");
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&bytes)
}

/// Join a parent field path and a key with a `.`.
pub(crate) fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Remove `key` from `object` and decode it.
///
/// A missing key and an explicit `null` both yield `None`.
pub(crate) fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<Option<T>, DecodeError> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| DecodeError::shape(field_path(prefix, key), source)),
    }
}

/// Require `value` to be a JSON object.
pub(crate) fn expect_object(value: Value, field: &str) -> Result<Map<String, Value>, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError::shape(field, source))
}
