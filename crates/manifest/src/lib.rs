//! Typed decoding of `package.json` manifests for a monorepo build tool.
//!
//! This crate turns the bytes of a `package.json` into a [`Manifest`],
//! including the build pipeline embedded under its `turbo` key. Two fields
//! need more care than plain structural decoding:
//!
//! - A task's `outputs` is tri-state. A missing key and `"outputs": []` mean
//!   different things to the cache, so they decode to [`Outputs::Unset`] and
//!   [`Outputs::Empty`] respectively.
//! - `workspaces` may be a bare array or an object with a `packages` array.
//!   Both decode to the same [`Workspaces`].
//!
//! # Example: Parsing a Manifest
//!
//! ```rust
//! use turbo_manifest::{Manifest, Outputs};
//!
//! let json = r#"{
//!     "name": "my-monorepo",
//!     "workspaces": ["apps/*", "packages/*"],
//!     "turbo": {
//!         "pipeline": {
//!             "build": { "dependsOn": ["^build"], "outputs": ["dist/**"] },
//!             "lint": { "outputs": [] },
//!             "test": {}
//!         }
//!     }
//! }"#;
//!
//! let manifest: Manifest = json.parse().unwrap();
//! assert_eq!(manifest.task("lint").unwrap().outputs, Outputs::Empty);
//! assert_eq!(manifest.task("test").unwrap().outputs, Outputs::Unset);
//! ```
//!
//! # Example: Handling Errors
//!
//! ```rust
//! use turbo_manifest::{ErrorKind, parse};
//!
//! let err = parse(br#"{ "workspaces": 5 }"#).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Shape);
//! assert_eq!(err.field(), Some("workspaces"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_debug_implementations)]
#![warn(missing_docs)]

mod decode;
mod derived;
mod error;
mod manifest;
mod pipeline;
mod workspaces;

pub use decode::{parse, read_file};
pub use derived::{DerivedHashes, PackageHashes};
pub use error::{DecodeError, ErrorKind};
pub use manifest::{DependencyKind, DependencyMap, Manifest};
pub use pipeline::{Outputs, PipelineConfig, TaskSpec, TurboConfig};
pub use workspaces::Workspaces;
