//! Subcommand execution

use crate::cli::{Command, InputArgs};
use crate::config::ModeinferConfig;
use crate::output::{render_compressed, render_ranks, render_types};
use anyhow::Context;
use modeinfer_core::{Collection, Dataset, TypeInferencePipeline, build_ranks, compress_dataset};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Run `command` against the dataset named by `input`, writing results to `out`
pub fn execute(
    command: &Command,
    input: &InputArgs,
    config: &ModeinferConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let dataset = Dataset::load(&input.dataset_paths(), &config.input.parse_options())?;

    match command {
        Command::Infer { .. } => {
            let inference = TypeInferencePipeline::new()
                .with_strategy(config.inference.strategy)
                .run(&dataset)?;
            let rendered = render_types(&inference, config.output.format, config.output.symbolic)?;
            out.write_all(rendered.as_bytes())?;
        }
        Command::Ranks { .. } => {
            let ranks = build_ranks(dataset.atoms());
            out.write_all(render_ranks(&ranks, config.output.format)?.as_bytes())?;
        }
        Command::Compress { output_dir } => {
            let ranks = build_ranks(dataset.atoms());
            let compressed = compress_dataset(&dataset, &ranks)?;
            match output_dir {
                Some(dir) => {
                    for collection in Collection::ALL {
                        write_collection(dir, collection, &compressed.render(collection))?;
                    }
                }
                None => out.write_all(render_compressed(&compressed).as_bytes())?,
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn write_collection(dir: &Path, collection: Collection, contents: &str) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(collection.file_name());
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(%collection, path = %path.display(), "Wrote compressed collection");
    Ok(())
}
