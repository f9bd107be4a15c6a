use anyhow::Result;
use projflow::download_recipe;

use super::load_settings;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::DownloadArgs) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let url = args.url.as_deref().unwrap_or(&settings.recipe_url);
    let out_dir = args.output.clone().unwrap_or(".".into());

    let path = download_recipe(url, &out_dir, args.force)?;
    println!("Downloaded recipe archive to {}", path.display());

    Ok(())
}
