use comfy_table::{Table, presets::UTF8_FULL};
use miette::Result;
use turbo_manifest::{Outputs, PipelineConfig};

use crate::core::ManifestArgs;

/// List the tasks of the embedded turbo pipeline
#[derive(clap::Args)]
pub(crate) struct Opts {
    #[command(flatten)]
    manifest: ManifestArgs,
}

impl Opts {
    #[allow(clippy::print_stdout)] // command output goes to stdout
    pub(crate) fn run(self) -> Result<()> {
        let manifest = self.manifest.load()?;

        match manifest.pipeline() {
            Some(pipeline) if !pipeline.is_empty() => {
                println!("{}", pipeline_table(pipeline));
            }
            _ => println!(
                "No pipeline configured in '{}'",
                self.manifest.path.display()
            ),
        }
        Ok(())
    }
}

fn pipeline_table(pipeline: &PipelineConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Task", "Outputs", "Cache", "Depends On"]);

    for (name, task) in pipeline {
        tracing::trace!(task = %name, "rendering task");
        table.add_row(vec![
            name.clone(),
            outputs_cell(&task.outputs),
            cache_cell(task.cache),
            task.depends_on.join(", "),
        ]);
    }
    table
}

fn outputs_cell(outputs: &Outputs) -> String {
    match outputs {
        Outputs::Unset => "(default)".to_string(),
        Outputs::Empty => "(none)".to_string(),
        Outputs::Values(globs) => globs.join(", "),
    }
}

fn cache_cell(cache: Option<bool>) -> String {
    cache.map_or_else(|| "(default)".to_string(), |cache| cache.to_string())
}
