pub(crate) mod logging;

use std::path::PathBuf;

use turbo_manifest::Manifest;

/// Location of the manifest a command operates on
#[derive(clap::Args)]
pub(crate) struct ManifestArgs {
    /// Path to the package.json (defaults to the one in the current directory)
    #[arg(default_value = "package.json")]
    pub(crate) path: PathBuf,
}

impl ManifestArgs {
    /// Read and decode the manifest.
    pub(crate) fn load(&self) -> miette::Result<Manifest> {
        Ok(turbo_manifest::read_file(&self.path)?)
    }
}

/// Placeholder for a field the manifest leaves unset.
pub(crate) const ABSENT: &str = "-";
