use std::{collections::BTreeMap, sync::Arc};

use crate::{Error, Result, profile::{LayerProfiles, MixingRecipe}, record::{Hemisphere, RawRecord}};

const ALL_LAYERS_SUFFIX: &str = "_ALL_LAYERS";
const DEFAULT_CLASS: &str = "ALL";

/// One projection from a source population into a target population.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionDescriptor {
    pub source: String,             // "REGION_CLASS", e.g. "MOp_5it"
    pub target_population: String,  // e.g. "SSp-ll_ALL_LAYERS"
    pub hemisphere: Hemisphere,
    pub density: f64,               // Overall density scale
    pub recipe: MixingRecipe,       // Target-layer mixing recipe
}

/// Split a source population name into (region, projection class).
/// The class is the second `_`-separated segment, or "ALL" when absent.
pub fn split_source_population(source: &str) -> (&str, &str) {
    let mut parts = source.split('_');
    let region = parts.next().unwrap_or(source);
    let class = parts.next().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_CLASS);
    (region, class)
}

/// Target region name for a target population (drops the all-layers suffix).
pub fn target_region_name(population: &str) -> String {
    population.replace(ALL_LAYERS_SUFFIX, "")
}

/// Expand projection descriptors into raw records, keyed by target region.
/// Each descriptor yields one record per layer label, in layer order.
pub fn extract_projections<'a, I>(descriptors: I, profiles: &LayerProfiles) -> Result<BTreeMap<String, Vec<RawRecord>>>
where I: IntoIterator<Item = &'a ProjectionDescriptor> {
    let mut output: BTreeMap<String, Vec<RawRecord>> = BTreeMap::new();

    for desc in descriptors {
        let densities = profiles.profile_for_projection(&desc.recipe, desc.density)?;
        if let Some(bad) = densities.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(Error::MalformedSource(format!(
                "projection {} -> {} has invalid mixed density {bad}",
                desc.source, desc.target_population
            )));
        }

        let (region, class) = split_source_population(&desc.source);
        let (region, class): (Arc<str>, Arc<str>) = (Arc::from(region), Arc::from(class));

        let records = output.entry(target_region_name(&desc.target_population)).or_default();
        records.extend(profiles.labels().iter().zip(densities.iter()).map(|(layer, &density)| RawRecord {
            region: region.clone(),
            class: class.clone(),
            hemisphere: desc.hemisphere.clone(),
            layer: layer.clone(),
            density,
        }));
    }

    Ok(output)
}
