use comfy_table::{Table, presets::UTF8_FULL};
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use turbo_manifest::{DependencyKind, Manifest, PipelineConfig};

use crate::core::{ABSENT, ManifestArgs};

/// Summarize a package manifest
#[derive(clap::Args)]
pub(crate) struct Opts {
    #[command(flatten)]
    manifest: ManifestArgs,
    /// Print the decoded manifest as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Opts {
    #[allow(clippy::print_stdout)] // command output goes to stdout
    pub(crate) fn run(self) -> Result<()> {
        let manifest = self.manifest.load()?;

        if self.json {
            let json = serde_json::to_string_pretty(&manifest).into_diagnostic()?;
            println!("{json}");
        } else {
            println!("{}", summary_table(&manifest));
        }
        Ok(())
    }
}

fn summary_table(manifest: &Manifest) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Name", manifest.name.as_deref().unwrap_or(ABSENT)]);
    table.add_row(vec!["Version", manifest.version.as_deref().unwrap_or(ABSENT)]);
    table.add_row(vec!["Private".to_string(), manifest.private.to_string()]);
    table.add_row(vec![
        "Package Manager",
        manifest.package_manager.as_deref().unwrap_or(ABSENT),
    ]);
    table.add_row(vec![
        "OS".to_string(),
        manifest.os.as_ref().map_or_else(|| ABSENT.to_string(), |os| os.join(", ")),
    ]);
    table.add_row(vec![
        "Workspaces".to_string(),
        manifest.workspaces.as_ref().map_or_else(
            || ABSENT.to_string(),
            |workspaces| workspaces.globs().join(", "),
        ),
    ]);
    table.add_row(vec![
        "Scripts".to_string(),
        count_cell(manifest.scripts.as_ref().map(BTreeMap::len)),
    ]);
    for kind in DependencyKind::ALL {
        table.add_row(vec![
            kind.key().to_string(),
            count_cell(manifest.dependencies_of(kind).map(BTreeMap::len)),
        ]);
    }
    table.add_row(vec![
        "Pipeline Tasks".to_string(),
        count_cell(manifest.pipeline().map(PipelineConfig::len)),
    ]);
    table
}

/// An absent map renders differently from an empty one.
fn count_cell(count: Option<usize>) -> String {
    count.map_or_else(|| ABSENT.to_string(), |count| count.to_string())
}
