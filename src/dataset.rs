use std::{collections::BTreeMap, sync::Arc};

use crate::{Error, Result, Session, record::RawRecord, source::ProjectionSource};

/// Records for every target region, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    regions: BTreeMap<String, Arc<[RawRecord]>>,
    layer_labels: Vec<Arc<str>>,
}

impl Dataset {
    pub fn new(regions: BTreeMap<String, Vec<RawRecord>>, layer_labels: Vec<Arc<str>>) -> Self {
        let regions = regions.into_iter().map(|(name, records)| (name, Arc::from(records))).collect();
        Self { regions, layer_labels }
    }

    /// Load a dataset from a projection source.
    pub fn load<S: ProjectionSource + ?Sized>(source: &S) -> Result<Self> { source.load() }

    /// Target region names, sorted.
    pub fn regions(&self) -> impl Iterator<Item = &str> + '_ { self.regions.keys().map(String::as_str) }

    #[inline] pub fn num_regions(&self) -> usize { self.regions.len() }

    /// Records targeting `region`.
    pub fn records(&self, region: &str) -> Option<&[RawRecord]> { self.regions.get(region).map(|r| &**r) }

    /// Ordered layer labels shared by every record.
    #[inline] pub fn layer_labels(&self) -> &[Arc<str>] { &self.layer_labels }

    /// Start a session over the records targeting `region`.
    pub fn session(&self, region: &str) -> Result<Session> {
        let records = self.regions.get(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))?;
        Session::new(region, records.clone(), self.layer_labels.clone())
    }
}
