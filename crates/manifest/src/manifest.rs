//! Types for the package manifest (`package.json`).

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::decode::{expect_object, take_field};
use crate::{DecodeError, PipelineConfig, TaskSpec, TurboConfig, Workspaces};

/// A mapping from package name to version range.
pub type DependencyMap = BTreeMap<String, String>;

/// A decoded package manifest.
///
/// Map and list fields are `None` when their key is absent and `Some` when
/// present, even if empty, so `{}` and a missing key stay distinguishable.
///
/// # Example
///
/// ```json
/// {
///   "name": "my-monorepo",
///   "private": true,
///   "packageManager": "pnpm@9.1.0",
///   "workspaces": ["apps/*", "packages/*"],
///   "scripts": { "build": "turbo run build" },
///   "devDependencies": { "turbo": "^1.0.0" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Manifest {
    /// The package name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The package version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Script name to shell command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<BTreeMap<String, String>>,

    /// Regular dependencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,

    /// Development-only dependencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencyMap>,

    /// Dependencies whose installation may fail without failing the install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_dependencies: Option<DependencyMap>,

    /// Dependencies the consumer of this package must provide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<DependencyMap>,

    /// The package manager pinned for this repository (e.g. `pnpm@9.1.0`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,

    /// Supported operating systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<Vec<String>>,

    /// Workspace member globs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Workspaces>,

    /// Whether the package is excluded from publishing.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub private: bool,

    /// Embedded build configuration.
    #[serde(skip_serializing_if = "is_default_turbo")]
    pub turbo: TurboConfig,
}

fn is_default_turbo(turbo: &TurboConfig) -> bool {
    *turbo == TurboConfig::default()
}

/// The four dependency groups a manifest can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    /// `dependencies`
    Regular,
    /// `devDependencies`
    Dev,
    /// `optionalDependencies`
    Optional,
    /// `peerDependencies`
    Peer,
}

impl DependencyKind {
    /// All kinds, in manifest order.
    pub const ALL: [DependencyKind; 4] = [Self::Regular, Self::Dev, Self::Optional, Self::Peer];

    /// The JSON key holding this group.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Regular => "dependencies",
            Self::Dev => "devDependencies",
            Self::Optional => "optionalDependencies",
            Self::Peer => "peerDependencies",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Manifest {
    pub(crate) fn from_object(mut object: Map<String, Value>) -> Result<Self, DecodeError> {
        let workspaces = match object.remove("workspaces") {
            None | Some(Value::Null) => None,
            Some(value) => Workspaces::from_value(&value)
                .map_err(|source| DecodeError::shape("workspaces", source))?,
        };
        let turbo = match object.remove("turbo") {
            None | Some(Value::Null) => TurboConfig::default(),
            Some(value) => TurboConfig::from_object(expect_object(value, "turbo")?)?,
        };

        Ok(Self {
            name: take_field(&mut object, "", "name")?,
            version: take_field(&mut object, "", "version")?,
            scripts: take_field(&mut object, "", "scripts")?,
            dependencies: take_field(&mut object, "", DependencyKind::Regular.key())?,
            dev_dependencies: take_field(&mut object, "", DependencyKind::Dev.key())?,
            optional_dependencies: take_field(&mut object, "", DependencyKind::Optional.key())?,
            peer_dependencies: take_field(&mut object, "", DependencyKind::Peer.key())?,
            package_manager: take_field(&mut object, "", "packageManager")?,
            os: take_field(&mut object, "", "os")?,
            workspaces,
            private: take_field(&mut object, "", "private")?.unwrap_or(false),
            turbo,
        })
    }

    /// Returns the dependency map of the given kind, if declared.
    #[must_use]
    pub fn dependencies_of(&self, kind: DependencyKind) -> Option<&DependencyMap> {
        match kind {
            DependencyKind::Regular => self.dependencies.as_ref(),
            DependencyKind::Dev => self.dev_dependencies.as_ref(),
            DependencyKind::Optional => self.optional_dependencies.as_ref(),
            DependencyKind::Peer => self.peer_dependencies.as_ref(),
        }
    }

    /// Iterates over the declared dependency groups, skipping absent ones.
    pub fn dependency_groups(&self) -> impl Iterator<Item = (DependencyKind, &DependencyMap)> {
        DependencyKind::ALL
            .into_iter()
            .filter_map(|kind| self.dependencies_of(kind).map(|deps| (kind, deps)))
    }

    /// Returns the task pipeline, if declared.
    #[must_use]
    pub fn pipeline(&self) -> Option<&PipelineConfig> {
        self.turbo.pipeline.as_ref()
    }

    /// Returns the configuration of a pipeline task.
    #[must_use]
    pub fn task(&self, name: &str) -> Option<&TaskSpec> {
        self.pipeline().and_then(|pipeline| pipeline.get(name))
    }
}

impl FromStr for Manifest {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s.as_bytes())
    }
}
