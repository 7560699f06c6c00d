//! The `workspaces` field of a manifest.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Glob patterns identifying the member packages of a monorepo.
///
/// The field may be written in two equivalent shapes:
///
/// 1. A bare array (npm, pnpm-style tooling):
///    ```json
///    { "workspaces": ["apps/*", "packages/*"] }
///    ```
///
/// 2. An object wrapping that array (yarn classic):
///    ```json
///    { "workspaces": { "packages": ["apps/*", "packages/*"] } }
///    ```
///
/// Both decode to the same value; which shape was used is not retained.
/// An object without a `packages` array declares no workspaces at all, which
/// is not the same as an empty bare array. Serialization always produces the
/// bare array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct Workspaces(Vec<String>);

type ShapeAttempt = fn(&Value) -> Result<Option<Vec<String>>, serde_json::Error>;

/// Shapes are tried in order; the first structural match wins.
const SHAPES: &[(&str, ShapeAttempt)] = &[("object", from_object), ("array", from_array)];

/// Object shape: `{ "packages": [...] }`. A missing or `null` `packages`
/// key leaves the workspaces unset.
fn from_object(value: &Value) -> Result<Option<Vec<String>>, serde_json::Error> {
    let Some(object) = value.as_object() else {
        return Err(de::Error::invalid_type(
            unexpected(value),
            &"an object with a `packages` array",
        ));
    };
    object
        .get("packages")
        .filter(|packages| !packages.is_null())
        .map(Vec::<String>::deserialize)
        .transpose()
}

fn from_array(value: &Value) -> Result<Option<Vec<String>>, serde_json::Error> {
    Vec::<String>::deserialize(value).map(Some)
}

impl Workspaces {
    /// Create a workspace list from glob patterns.
    pub fn new(globs: Vec<String>) -> Self {
        Self(globs)
    }

    /// Resolve a raw JSON value into a workspace list.
    ///
    /// Returns `Ok(None)` for an object shape without `packages`.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempted shape when the value matches
    /// none of them.
    pub fn from_value(value: &Value) -> Result<Option<Self>, serde_json::Error> {
        let mut last_error = None;
        for (shape, attempt) in SHAPES {
            match attempt(value) {
                Ok(globs) => {
                    tracing::trace!(
                        shape,
                        count = globs.as_ref().map(Vec::len),
                        "resolved workspaces"
                    );
                    return Ok(globs.map(Self));
                }
                Err(err) => last_error = Some(err),
            }
        }
        Err(last_error.unwrap_or_else(|| de::Error::custom("no workspace shape matched")))
    }

    /// Returns the glob patterns in declaration order.
    #[must_use]
    pub fn globs(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if there are no glob patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the list and returns the glob patterns.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

impl<'a> IntoIterator for &'a Workspaces {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Workspaces {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
