//! Types for the `turbo` key of a manifest: global build settings and the
//! task pipeline.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::DecodeError;
use crate::decode::{expect_object, field_path, take_field};

/// Build configuration embedded in a manifest under the `turbo` key.
///
/// # Example
///
/// ```json
/// {
///   "turbo": {
///     "baseBranch": "origin/main",
///     "pipeline": {
///       "build": { "dependsOn": ["^build"], "outputs": ["dist/**"] },
///       "lint": { "outputs": [] },
///       "dev": { "cache": false }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct TurboConfig {
    /// The branch changes are compared against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,

    /// Files whose contents affect every task hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_dependencies: Option<Vec<String>>,

    /// Raw cache options string, passed through uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_options: Option<String>,

    /// Default outputs for tasks that leave theirs unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,

    /// Remote cache endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_cache_url: Option<String>,

    /// The task pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PipelineConfig>,
}

impl TurboConfig {
    pub(crate) fn from_object(mut object: Map<String, Value>) -> Result<Self, DecodeError> {
        const PREFIX: &str = "turbo";
        let pipeline = match object.remove("pipeline") {
            None | Some(Value::Null) => None,
            Some(value) => Some(PipelineConfig::from_value(value)?),
        };
        Ok(Self {
            base_branch: take_field(&mut object, PREFIX, "baseBranch")?,
            global_dependencies: take_field(&mut object, PREFIX, "globalDependencies")?,
            cache_options: take_field(&mut object, PREFIX, "cacheOptions")?,
            outputs: take_field(&mut object, PREFIX, "outputs")?,
            remote_cache_url: take_field(&mut object, PREFIX, "remoteCacheUrl")?,
            pipeline,
        })
    }

    /// Returns the outputs a task should cache, falling back to the global
    /// `outputs` default when the task leaves its own unset.
    #[must_use]
    pub fn task_outputs<'a>(&'a self, task: &'a TaskSpec) -> Option<&'a [String]> {
        task.outputs.resolve(self.outputs.as_deref())
    }
}

/// Mapping from task name to its configuration.
///
/// Iteration is ordered by task name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct PipelineConfig(BTreeMap<String, TaskSpec>);

impl PipelineConfig {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        const FIELD: &str = "turbo.pipeline";
        let mut tasks = BTreeMap::new();
        for (name, entry) in expect_object(value, FIELD)? {
            let field = field_path(FIELD, &name);
            // a `null` task keeps its name with every setting left unset
            let spec = if entry.is_null() {
                TaskSpec::default()
            } else {
                let entry = Value::Object(expect_object(entry, &field)?);
                TaskSpec::deserialize(&entry).map_err(|err| DecodeError::shape(field, err))?
            };
            tasks.insert(name, spec);
        }
        Ok(Self(tasks))
    }

    /// Returns the configuration for a task.
    #[must_use]
    pub fn get(&self, task: &str) -> Option<&TaskSpec> {
        self.0.get(task)
    }

    /// Adds or replaces a task.
    pub fn insert(&mut self, task: impl Into<String>, spec: TaskSpec) -> Option<TaskSpec> {
        self.0.insert(task.into(), spec)
    }

    /// Returns an iterator over tasks, ordered by name.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, TaskSpec> {
        self.0.iter()
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the pipeline has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PipelineConfig {
    type Item = (&'a String, &'a TaskSpec);
    type IntoIter = std::collections::btree_map::Iter<'a, String, TaskSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One task's entry in the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTaskSpec", rename_all = "camelCase")]
#[must_use]
pub struct TaskSpec {
    /// Files the task produces.
    #[serde(skip_serializing_if = "Outputs::is_unset")]
    pub outputs: Outputs,

    /// Whether the task participates in caching. `None` means the host's
    /// default applies, which is not the same as `Some(false)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,

    /// Tasks that must run first. A `^` prefix refers to the task in
    /// dependency packages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl TaskSpec {
    /// Resolves the cache flag against the host default.
    #[must_use]
    pub fn cache_enabled(&self, default: bool) -> bool {
        self.cache.unwrap_or(default)
    }
}

/// Staging form of [`TaskSpec`], where `outputs` keeps the difference between
/// a missing key and an empty array.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskSpec {
    #[serde(default)]
    outputs: Option<Vec<String>>,
    #[serde(default)]
    cache: Option<bool>,
    #[serde(default)]
    depends_on: Option<Vec<String>>,
}

impl From<RawTaskSpec> for TaskSpec {
    fn from(raw: RawTaskSpec) -> Self {
        Self {
            outputs: Outputs::from(raw.outputs),
            cache: raw.cache,
            depends_on: raw.depends_on.unwrap_or_default(),
        }
    }
}

/// The tri-state `outputs` field of a task.
///
/// A task without an `outputs` key uses the build tool's default outputs,
/// while `"outputs": []` declares that the task produces nothing worth
/// caching. The two must never be conflated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outputs {
    /// The key is absent (or `null`).
    #[default]
    Unset,
    /// The key is an empty array.
    Empty,
    /// The key lists one or more globs, in declaration order.
    Values(Vec<String>),
}

impl Outputs {
    /// Returns `true` if the key was absent.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the declared globs, or `None` when unset. An explicitly empty
    /// list yields `Some(&[])`.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            Self::Unset => None,
            Self::Empty => Some(&[]),
            Self::Values(globs) => Some(globs),
        }
    }

    /// Resolves the outputs against defaults used when the key is unset.
    #[must_use]
    pub fn resolve<'a>(&'a self, defaults: Option<&'a [String]>) -> Option<&'a [String]> {
        self.as_slice().or(defaults)
    }
}

impl From<Option<Vec<String>>> for Outputs {
    fn from(outputs: Option<Vec<String>>) -> Self {
        match outputs {
            None => Self::Unset,
            Some(globs) if globs.is_empty() => Self::Empty,
            Some(globs) => Self::Values(globs),
        }
    }
}

impl From<Vec<String>> for Outputs {
    fn from(globs: Vec<String>) -> Self {
        Self::from(Some(globs))
    }
}

impl Serialize for Outputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)] // Test module - panics are expected on assertion failures
mod tests {
    use super::*;
    use serde_json::json;

    fn task(value: &Value) -> TaskSpec {
        TaskSpec::deserialize(value).expect("Failed to decode task")
    }

    #[test]
    fn test_outputs_absent_is_unset() {
        let spec = task(&json!({ "dependsOn": ["^build"] }));
        assert_eq!(spec.outputs, Outputs::Unset);
        assert_eq!(spec.cache, None);
        assert_eq!(spec.depends_on, ["^build"]);
    }

    #[test]
    fn test_outputs_empty_is_not_unset() {
        let unset = task(&json!({}));
        let empty = task(&json!({ "outputs": [] }));
        assert_eq!(empty.outputs, Outputs::Empty);
        assert_ne!(unset, empty);
        assert_eq!(empty.outputs.as_slice(), Some(&[][..]));
        assert_eq!(unset.outputs.as_slice(), None);
    }

    #[test]
    fn test_outputs_values_keep_order() {
        let spec = task(&json!({ "outputs": ["dist/**", ".next/**", "build/**"] }));
        assert_eq!(
            spec.outputs,
            Outputs::Values(vec![
                "dist/**".to_string(),
                ".next/**".to_string(),
                "build/**".to_string()
            ])
        );
    }

    #[test]
    fn test_outputs_null_is_unset() {
        let spec = task(&json!({ "outputs": null }));
        assert!(spec.outputs.is_unset());
    }

    #[test]
    fn test_cache_flag() {
        assert_eq!(task(&json!({ "cache": false })).cache, Some(false));
        assert_eq!(task(&json!({ "cache": true })).cache, Some(true));

        let unset = task(&json!({}));
        assert!(unset.cache_enabled(true));
        assert!(!unset.cache_enabled(false));
        assert!(!task(&json!({ "cache": false })).cache_enabled(true));
    }

    #[test]
    fn test_task_shape_errors() {
        assert!(TaskSpec::deserialize(&json!({ "outputs": "dist/**" })).is_err());
        assert!(TaskSpec::deserialize(&json!({ "cache": "yes" })).is_err());
        assert!(TaskSpec::deserialize(&json!({ "dependsOn": [1] })).is_err());
    }

    #[test]
    fn test_unknown_task_keys_are_ignored() {
        let spec = task(&json!({ "inputs": ["src/**"], "persistent": true }));
        assert_eq!(spec, TaskSpec::default());
    }

    #[test]
    fn test_outputs_from_normalizes_empty() {
        assert_eq!(Outputs::from(Vec::new()), Outputs::Empty);
        assert_eq!(Outputs::from(None), Outputs::Unset);
    }

    #[test]
    fn test_outputs_resolve() {
        let defaults = vec!["dist/**".to_string()];
        let defaults = Some(defaults.as_slice());
        assert_eq!(Outputs::Unset.resolve(defaults), defaults);
        assert_eq!(Outputs::Empty.resolve(defaults), Some(&[][..]));
        assert_eq!(Outputs::Unset.resolve(None), None);
    }

    #[test]
    fn test_serialize_keeps_empty_outputs() {
        let mut pipeline = PipelineConfig::new();
        pipeline.insert("build", task(&json!({ "dependsOn": ["^build"] })));
        pipeline.insert("lint", task(&json!({ "outputs": [] })));

        let json = serde_json::to_value(&pipeline).expect("Failed to serialize pipeline");
        assert_eq!(
            json,
            json!({
                "build": { "dependsOn": ["^build"] },
                "lint": { "outputs": [] }
            })
        );
    }

    #[test]
    fn test_pipeline_rejects_bad_task() {
        let err = PipelineConfig::from_value(json!({ "build": { "outputs": 1 } }))
            .expect_err("outputs must be an array");
        assert_eq!(err.field(), Some("turbo.pipeline.build"));

        let err = PipelineConfig::from_value(json!(["build"])).expect_err("pipeline is a map");
        assert_eq!(err.field(), Some("turbo.pipeline"));

        let err = PipelineConfig::from_value(json!({ "build": [["dist/**"]] }))
            .expect_err("a task entry is an object");
        assert_eq!(err.field(), Some("turbo.pipeline.build"));
    }

    #[test]
    fn test_pipeline_null_task_is_default() {
        let pipeline = PipelineConfig::from_value(json!({ "build": null, "lint": { "outputs": [] } }))
            .expect("a null task is not a shape error");
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.get("build"), Some(&TaskSpec::default()));
        assert_eq!(pipeline.get("lint").map(|lint| &lint.outputs), Some(&Outputs::Empty));
    }

    #[test]
    fn test_outputs_debug_snapshot() {
        let spec = task(&json!({ "outputs": ["dist/**"] }));
        insta::assert_debug_snapshot!(spec.outputs, @r#"
        Values(
            [
                "dist/**",
            ],
        )
        "#);
    }
}
