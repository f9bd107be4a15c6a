//! Session defaults and color configuration.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Result, flow::EDGE_OPACITY, grouping::GroupingSpec};

pub const DEFAULT_RECIPE_URL: &str =
    "https://portal.bluebrain.epfl.ch/wp-content/uploads/2019/02/white_matter_FULL_RECIPE_v1p15.yaml_-3.zip";
pub const DEFAULT_RECIPE_ENTRY: &str = "white_matter_FULL_RECIPE_v1p15.yaml";
pub const DEFAULT_TARGET_REGION: &str = "SSp-ll";

/// One level of a selection, as the strings a user picks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSetting {
    pub layers: String,
    pub grouping: String,
}

impl LevelSetting {
    fn new(layers: &str, grouping: &str) -> Self {
        Self { layers: layers.to_string(), grouping: grouping.to_string() }
    }
}

/// Session defaults. Any subset can be overridden from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub recipe_url: String,
    pub recipe_entry: String,
    pub target_region: String,
    pub levels: Vec<LevelSetting>,
    pub threshold: f64,
    pub edge_opacity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipe_url: DEFAULT_RECIPE_URL.to_string(),
            recipe_entry: DEFAULT_RECIPE_ENTRY.to_string(),
            target_region: DEFAULT_TARGET_REGION.to_string(),
            levels: vec![
                LevelSetting::new("Without layers", "By hemisphere"),
                LevelSetting::new("With layers", "All together"),
                LevelSetting::new("Without layers", "By projection class"),
                LevelSetting::new("Without layers", "By region"),
            ],
            threshold: 0.0,
            edge_opacity: EDGE_OPACITY,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> { parse_json(json, "settings") }

    pub fn from_json_file(path: &Path) -> Result<Self> { read_json(path, "settings") }

    /// Parsed level selection; levels whose grouping is "None" are skipped.
    pub fn selection(&self) -> Result<Vec<GroupingSpec>> {
        let pairs = self.levels.iter()
            .map(|l| (l.layers.as_str(), l.grouping.as_str()))
            .collect::<Vec<_>>();
        GroupingSpec::parse_selection(&pairs)
    }
}

/// Parcellation and color table, as stored in the color configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// module -> source regions it contains
    #[serde(rename = "BrainParcellation", default)]
    pub parcellation: BTreeMap<String, Vec<String>>,

    /// label key -> color string; "_default" is the fallback
    #[serde(rename = "Colors", default)]
    pub colors: BTreeMap<String, String>,
}

impl ColorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> { parse_json(json, "color configuration") }

    pub fn from_json_file(path: &Path) -> Result<Self> { read_json(path, "color configuration") }
}

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid {what}: {e}")))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {what} {}: {e}", path.display())))?;
    parse_json(&text, what)
}
