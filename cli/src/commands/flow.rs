use std::{fs::File, io::{BufWriter, Write}};

use anyhow::{Context, Result};
use projflow::{GroupingSpec, Palette};
use tracing::info;

use super::{load_dataset, load_settings};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::FlowArgs) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(region) = &args.region { settings.target_region = region.clone() }
    if let Some(threshold) = args.threshold { settings.threshold = threshold }
    if let Some(entry) = &args.entry { settings.recipe_entry = entry.clone() }

    let dataset = load_dataset(&args.recipe, &settings.recipe_entry)?;
    let mut session = dataset.session(&settings.target_region)?;
    session.configure(&settings)?;

    if !args.levels.is_empty() {
        let specs = args.levels.iter()
            .map(|level| level.parse::<GroupingSpec>())
            .collect::<projflow::Result<Vec<_>>>()?;
        session.select(specs);
    }

    let palette = match &args.colors {
        Some(path) => Palette::from_json_file(path)
            .with_context(|| format!("loading colors from {}", path.display()))?,
        None => Palette::default(),
    };
    let graph = session.flow_graph(&palette);

    info!(
        region = session.region(),
        levels = session.hierarchy().num_levels(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "emitted flow graph"
    );

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)
                .with_context(|| format!("create {}", path.display()))?);
            serde_json::to_writer_pretty(&mut writer, &graph)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &graph)?;
            writeln!(lock)?;
        }
    }

    Ok(())
}
