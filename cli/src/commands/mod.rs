#[cfg(feature = "download")]
pub mod download;
pub mod flow;
pub mod regions;

use std::path::Path;

use anyhow::{Context, Result};
use projflow::{Dataset, Settings, open_recipe};

/// Settings from `path`, or the defaults.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

/// Load the dataset from a local `.yaml` recipe or `.zip` archive.
pub(crate) fn load_dataset(recipe: &Path, entry: &str) -> Result<Dataset> {
    Dataset::load(&*open_recipe(recipe, entry))
        .with_context(|| format!("loading recipe {}", recipe.display()))
}
