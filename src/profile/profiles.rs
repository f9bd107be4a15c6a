use std::sync::Arc;

use ahash::AHashMap;
use ndarray::Array1;

use crate::{Error, Result, profile::MixingRecipe};

/// A named vector of relative densities, one value per layer label.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerProfile {
    pub name: String,
    pub layers: Vec<String>,
    pub values: Vec<f64>,
}

/// Process-wide profile table. All profiles share one ordered list of layer labels.
#[derive(Clone, Debug, Default)]
pub struct LayerProfiles {
    labels: Vec<Arc<str>>,
    profiles: AHashMap<String, Array1<f64>>,
}

impl LayerProfiles {
    /// Build the table, checking that every profile declares the same ordered layer labels.
    pub fn new(profiles: Vec<LayerProfile>) -> Result<Self> {
        let expected = profiles.first().map(|p| p.layers.clone()).unwrap_or_default();
        let mut table = AHashMap::with_capacity(profiles.len());

        for profile in profiles {
            if profile.layers != expected {
                return Err(Error::InconsistentLayerLabels {
                    profile: profile.name,
                    expected,
                    found: profile.layers,
                });
            }
            if profile.values.len() != profile.layers.len() {
                return Err(Error::MalformedSource(format!(
                    "layer profile '{}' has {} values for {} layers",
                    profile.name, profile.values.len(), profile.layers.len()
                )));
            }
            if table.contains_key(&profile.name) {
                return Err(Error::MalformedSource(format!("duplicate layer profile '{}'", profile.name)));
            }
            table.insert(profile.name, Array1::from(profile.values));
        }

        let labels = expected.into_iter().map(Arc::from).collect();
        Ok(Self { labels, profiles: table })
    }

    /// Ordered layer labels shared by every profile.
    #[inline] pub fn labels(&self) -> &[Arc<str>] { &self.labels }

    #[inline] pub fn num_layers(&self) -> usize { self.labels.len() }

    #[inline] pub fn num_profiles(&self) -> usize { self.profiles.len() }

    #[inline] pub fn get(&self, name: &str) -> Option<&Array1<f64>> { self.profiles.get(name) }

    /// Weighted sum of the referenced profiles: Σ fraction_p × profile_p.
    pub fn mix(&self, recipe: &MixingRecipe) -> Result<Array1<f64>> {
        let mut out = Array1::zeros(self.num_layers());
        for entry in recipe.iter() {
            let profile = self.get(&entry.name)
                .ok_or_else(|| Error::UnknownProfile(entry.name.clone()))?;
            out.scaled_add(entry.fraction, profile);
        }
        Ok(out)
    }

    /// Mixed profile for one projection, scaled by its overall density.
    pub fn profile_for_projection(&self, recipe: &MixingRecipe, density: f64) -> Result<Array1<f64>> {
        Ok(self.mix(recipe)? * density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, layers: &[&str], values: &[f64]) -> LayerProfile {
        LayerProfile {
            name: name.to_string(),
            layers: layers.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn mix_single_profile_and_scale() {
        let table = LayerProfiles::new(vec![profile("P1", &["L1", "L2"], &[1.0, 2.0])]).unwrap();
        let recipe = MixingRecipe::from_pairs([("P1", 0.5)]);

        assert_eq!(table.mix(&recipe).unwrap().to_vec(), vec![0.5, 1.0]);
        assert_eq!(table.profile_for_projection(&recipe, 3.0).unwrap().to_vec(), vec![1.5, 3.0]);
    }

    #[test]
    fn mix_weighted_sum_of_profiles() {
        let table = LayerProfiles::new(vec![
            profile("a", &["l1", "l2", "l3"], &[1.0, 0.0, 2.0]),
            profile("b", &["l1", "l2", "l3"], &[0.0, 4.0, 2.0]),
        ]).unwrap();
        let recipe = MixingRecipe::from_pairs([("a", 1.0), ("b", 0.25)]);

        assert_eq!(table.mix(&recipe).unwrap().to_vec(), vec![1.0, 1.0, 2.5]);
    }

    #[test]
    fn empty_recipe_is_zero_vector() {
        let table = LayerProfiles::new(vec![profile("a", &["l1", "l2"], &[1.0, 1.0])]).unwrap();
        assert_eq!(table.mix(&MixingRecipe::default()).unwrap().to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn unknown_profile_fails() {
        let table = LayerProfiles::new(vec![profile("a", &["l1"], &[1.0])]).unwrap();
        let recipe = MixingRecipe::from_pairs([("a", 1.0), ("missing", 1.0)]);
        assert_eq!(table.mix(&recipe), Err(Error::UnknownProfile("missing".into())));
    }

    #[test]
    fn inconsistent_layer_labels_fail() {
        let err = LayerProfiles::new(vec![
            profile("a", &["l1", "l2"], &[1.0, 1.0]),
            profile("b", &["l2", "l1"], &[1.0, 1.0]),
        ]).unwrap_err();
        assert!(matches!(err, Error::InconsistentLayerLabels { ref profile, .. } if profile == "b"));
    }

    #[test]
    fn value_count_mismatch_is_malformed() {
        let err = LayerProfiles::new(vec![profile("a", &["l1", "l2"], &[1.0])]).unwrap_err();
        assert!(matches!(err, Error::MalformedSource(_)));
    }
}
