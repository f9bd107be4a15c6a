use anyhow::Result;

use super::{load_dataset, load_settings};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RegionsArgs) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let entry = args.entry.as_deref().unwrap_or(&settings.recipe_entry);
    let dataset = load_dataset(&args.recipe, entry)?;

    let layers = dataset.layer_labels().iter().map(|l| format!("[{l}]")).collect::<Vec<_>>();
    println!("layers: {}", layers.join(" "));

    for region in dataset.regions() {
        let records = dataset.records(region).unwrap_or_default();
        let total: f64 = records.iter().map(|r| r.density).sum();
        println!("{region}\t{} records\ttotal density {total:.6}", records.len());
    }

    Ok(())
}
