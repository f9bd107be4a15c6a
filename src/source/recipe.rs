use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    Dataset, Error, Result,
    profile::{LayerProfile, LayerProfiles, MixingRecipe},
    record::{Hemisphere, ProjectionDescriptor, extract_projections},
};

/// Parsed recipe document. Keys not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDocument {
    pub layer_profiles: Vec<ProfileEntry>,
    pub projections: Vec<ProjectionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub relative_densities: Vec<DensityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DensityEntry {
    pub layers: Vec<String>,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionEntry {
    pub source: String,
    #[serde(default)]
    pub targets: Option<Vec<TargetEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetEntry {
    pub population: String,
    pub hemisphere: Hemisphere,
    pub density: f64,
    pub target_layer_profiles: MixingRecipe,
}

impl RecipeDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::MalformedSource(format!("invalid recipe: {e}")))
    }

    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self> {
        serde_yaml::from_slice(bytes).map_err(|e| Error::MalformedSource(format!("invalid recipe: {e}")))
    }

    /// Layer profiles, with each density entry's layers joined by ',' as its label.
    pub fn layer_profiles(&self) -> Vec<LayerProfile> {
        self.layer_profiles.iter()
            .map(|p| LayerProfile {
                name: p.name.clone(),
                layers: p.relative_densities.iter().map(|d| d.layers.join(",")).collect(),
                values: p.relative_densities.iter().map(|d| d.value).collect(),
            })
            .collect()
    }

    /// One descriptor per (source, target) pair. Sources without targets are skipped.
    pub fn descriptors(&self) -> Vec<ProjectionDescriptor> {
        let mut out = Vec::new();
        for proj in &self.projections {
            let Some(targets) = &proj.targets else {
                warn!(source = %proj.source, "projection has no targets");
                continue;
            };
            out.extend(targets.iter().map(|t| ProjectionDescriptor {
                source: proj.source.clone(),
                target_population: t.population.clone(),
                hemisphere: t.hemisphere.clone(),
                density: t.density,
                recipe: t.target_layer_profiles.clone(),
            }));
        }
        out
    }

    /// Mix every projection and group the records by target region.
    pub fn to_dataset(&self) -> Result<Dataset> {
        let profiles = LayerProfiles::new(self.layer_profiles())?;
        let descriptors = self.descriptors();
        let regions = extract_projections(&descriptors, &profiles)?;

        info!(
            profiles = profiles.num_profiles(),
            layers = profiles.num_layers(),
            projections = descriptors.len(),
            regions = regions.len(),
            "loaded recipe"
        );
        Ok(Dataset::new(regions, profiles.labels().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE: &str = r#"
layer_profiles:
  - name: upper
    relative_densities:
      - layers: [l1]
        value: 2.0
      - layers: [l2, l3]
        value: 1.0
  - name: lower
    relative_densities:
      - layers: [l1]
        value: 0.0
      - layers: [l2, l3]
        value: 4.0
projections:
  - source: MOp_5it
    mapping_variance: 0.1
    targets:
      - population: SSp-ll_ALL_LAYERS
        hemisphere: ipsi
        density: 0.5
        target_layer_profiles:
          - name: upper
            fraction: 1.0
      - population: SSp-ll_ALL_LAYERS
        hemisphere: contra
        density: 1.0
        target_layer_profiles:
          - name: upper
            fraction: 0.5
          - name: lower
            fraction: 0.5
  - source: VISp_23
    targets:
"#;

    #[test]
    fn parses_profiles_and_descriptors() {
        let doc = RecipeDocument::from_yaml_str(RECIPE).unwrap();
        let profiles = doc.layer_profiles();
        assert_eq!(profiles[0].layers, vec!["l1", "l2,l3"]);
        assert_eq!(profiles[1].values, vec![0.0, 4.0]);

        let descs = doc.descriptors();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[1].hemisphere, Hemisphere::Contra);
        assert_eq!(descs[1].recipe.len(), 2);
    }

    #[test]
    fn builds_dataset() {
        let dataset = RecipeDocument::from_yaml_str(RECIPE).unwrap().to_dataset().unwrap();
        assert_eq!(dataset.regions().collect::<Vec<_>>(), vec!["SSp-ll"]);
        assert_eq!(dataset.layer_labels().iter().map(|l| &**l).collect::<Vec<_>>(), vec!["l1", "l2,l3"]);

        let records = dataset.records("SSp-ll").unwrap();
        let densities = records.iter().map(|r| r.density).collect::<Vec<_>>();
        assert_eq!(densities, vec![1.0, 0.5, 1.0, 2.5]);
        assert_eq!(&*records[0].class, "5it");
    }

    #[test]
    fn free_form_hemisphere_loads() {
        let yaml = RECIPE.replace("hemisphere: ipsi", "hemisphere: L");
        let dataset = RecipeDocument::from_yaml_str(&yaml).unwrap().to_dataset().unwrap();
        let records = dataset.records("SSp-ll").unwrap();
        assert_eq!(records[0].hemisphere, Hemisphere::from("L"));
        assert_eq!(records[2].hemisphere, Hemisphere::Contra);
    }

    #[test]
    fn unknown_profile_reference_fails() {
        let yaml = RECIPE.replace("- name: lower\n            fraction", "- name: middle\n            fraction");
        let doc = RecipeDocument::from_yaml_str(&yaml).unwrap();
        assert_eq!(doc.to_dataset().unwrap_err(), Error::UnknownProfile("middle".into()));
    }
}
