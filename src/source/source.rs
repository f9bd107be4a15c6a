use std::{fs, io::Cursor, path::{Path, PathBuf}};

use tracing::info;

use crate::{Dataset, Error, Result, common::read_zip_entry, source::RecipeDocument};

/// Anything that can produce the per-region records for a session.
pub trait ProjectionSource {
    fn load(&self) -> Result<Dataset>;
}

/// Recipe held in memory as YAML text.
#[derive(Debug, Clone)]
pub struct RecipeText(pub String);

impl ProjectionSource for RecipeText {
    fn load(&self) -> Result<Dataset> { RecipeDocument::from_yaml_str(&self.0)?.to_dataset() }
}

/// Recipe stored as a YAML file on disk.
#[derive(Debug, Clone)]
pub struct RecipeFile {
    path: PathBuf,
}

impl RecipeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl ProjectionSource for RecipeFile {
    fn load(&self) -> Result<Dataset> {
        info!(path = %self.path.display(), "reading recipe");
        let bytes = fs::read(&self.path)
            .map_err(|e| Error::SourceUnavailable(format!("{}: {e}", self.path.display())))?;
        RecipeDocument::from_yaml_slice(&bytes)?.to_dataset()
    }
}

/// Recipe stored as one entry of a zip archive on disk.
#[derive(Debug, Clone)]
pub struct RecipeArchive {
    path: PathBuf,
    entry: String,
}

impl RecipeArchive {
    pub fn new(path: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self { path: path.into(), entry: entry.into() }
    }
}

impl ProjectionSource for RecipeArchive {
    fn load(&self) -> Result<Dataset> {
        info!(path = %self.path.display(), entry = %self.entry, "reading recipe archive");
        let file = fs::File::open(&self.path)
            .map_err(|e| Error::SourceUnavailable(format!("{}: {e}", self.path.display())))?;
        let bytes = read_zip_entry(file, &self.entry)
            .map_err(|e| Error::MalformedSource(format!("{}: {e:#}", self.path.display())))?;
        RecipeDocument::from_yaml_slice(&bytes)?.to_dataset()
    }
}

/// Recipe archive fetched over HTTP.
#[cfg(feature = "download")]
#[derive(Debug, Clone)]
pub struct RecipeUrl {
    url: String,
    entry: String,
}

#[cfg(feature = "download")]
impl RecipeUrl {
    pub fn new(url: impl Into<String>, entry: impl Into<String>) -> Self {
        Self { url: url.into(), entry: entry.into() }
    }
}

#[cfg(feature = "download")]
impl ProjectionSource for RecipeUrl {
    fn load(&self) -> Result<Dataset> {
        info!(url = %self.url, entry = %self.entry, "fetching recipe archive");
        let bytes = crate::common::fetch_bytes(&self.url)
            .map_err(|e| Error::SourceUnavailable(format!("{e:#}")))?;
        recipe_from_archive_bytes(&bytes, &self.entry)
    }
}

/// Pick a source for a local recipe path: `.zip` files are read as archives
/// (using `entry`), anything else as plain YAML.
pub fn open_recipe(path: &Path, entry: &str) -> Box<dyn ProjectionSource> {
    let is_zip = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        Box::new(RecipeArchive::new(path, entry))
    } else {
        Box::new(RecipeFile::new(path))
    }
}

/// Download the recipe archive at `url` into `out_dir`, returning the written path.
#[cfg(feature = "download")]
pub fn download_recipe(url: &str, out_dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    use anyhow::Context;

    crate::common::ensure_dir_exists(out_dir)?;
    let name = url.rsplit('/').next().filter(|n| !n.is_empty())
        .with_context(|| format!("cannot derive a file name from {url}"))?;
    let out_path = out_dir.join(name);

    info!(%url, path = %out_path.display(), "downloading recipe archive");
    crate::common::download_big_file(url, &out_path, force)?;
    Ok(out_path)
}

/// Read the recipe YAML from a zip archive held in memory.
pub fn recipe_from_archive_bytes(bytes: &[u8], entry: &str) -> Result<Dataset> {
    let yaml = read_zip_entry(Cursor::new(bytes), entry)
        .map_err(|e| Error::MalformedSource(format!("{e:#}")))?;
    RecipeDocument::from_yaml_slice(&yaml)?.to_dataset()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const RECIPE: &str = "
layer_profiles:
  - name: flat
    relative_densities:
      - layers: [l1]
        value: 1.0
      - layers: [l23]
        value: 1.0
projections:
  - source: MOp_5it
    targets:
      - population: SSp-ll_ALL_LAYERS
        hemisphere: ipsi
        density: 0.25
        target_layer_profiles:
          - name: flat
            fraction: 1.0
";

    fn zipped(entry: &str, body: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(entry, zip::write::SimpleFileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn text_source_loads() {
        let dataset = RecipeText(RECIPE.to_string()).load().unwrap();
        assert_eq!(dataset.records("SSp-ll").unwrap().len(), 2);
    }

    #[test]
    fn file_and_archive_sources_agree() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("recipe.yaml");
        let zip_path = dir.path().join("recipe.ZIP");
        fs::write(&yaml_path, RECIPE).unwrap();
        fs::write(&zip_path, zipped("recipe.yaml", RECIPE)).unwrap();

        let from_yaml = open_recipe(&yaml_path, "ignored").load().unwrap();
        let from_zip = open_recipe(&zip_path, "recipe.yaml").load().unwrap();
        assert_eq!(from_yaml.records("SSp-ll"), from_zip.records("SSp-ll"));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = RecipeFile::new("/nonexistent/recipe.yaml").load().unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[test]
    fn missing_archive_entry_is_malformed() {
        let err = recipe_from_archive_bytes(&zipped("other.yaml", RECIPE), "recipe.yaml").unwrap_err();
        assert!(matches!(err, Error::MalformedSource(_)));
    }
}
