use miette::Result;

use crate::core::ManifestArgs;

/// List the workspace globs of a manifest
#[derive(clap::Args)]
pub(crate) struct Opts {
    #[command(flatten)]
    manifest: ManifestArgs,
}

impl Opts {
    #[allow(clippy::print_stdout)] // command output goes to stdout
    pub(crate) fn run(self) -> Result<()> {
        let manifest = self.manifest.load()?;

        match manifest.workspaces {
            Some(workspaces) if !workspaces.is_empty() => {
                for glob in workspaces {
                    println!("{glob}");
                }
            }
            _ => println!(
                "No workspaces configured in '{}'",
                self.manifest.path.display()
            ),
        }
        Ok(())
    }
}
