use std::sync::Arc;

use tracing::debug;

use crate::{
    Error, Result,
    config::Settings,
    flow::{ColorLookup, EDGE_OPACITY, FlowGraph},
    grouping::{Grouping, GroupingCache, GroupingSpec},
    hierarchy::Hierarchy,
    record::RawRecord,
};

/// Explicit per-region state owned by the host: records, cached groupings,
/// and the current level selection and threshold.
#[derive(Debug, Clone)]
pub struct Session {
    region: String,
    records: Arc<[RawRecord]>,
    layer_labels: Vec<Arc<str>>,
    cache: GroupingCache,
    selection: Vec<GroupingSpec>,
    hierarchy: Hierarchy,
    threshold: f64,
    edge_opacity: f64,
}

impl Session {
    /// Create a session, precomputing every grouping. The selection starts empty.
    /// Fails with `MalformedSource` if any density is negative or not finite.
    pub fn new(region: impl Into<String>, records: impl Into<Arc<[RawRecord]>>, layer_labels: Vec<Arc<str>>) -> Result<Self> {
        let region = region.into();
        let records = records.into();
        if let Some((n, bad)) = records.iter().enumerate().find(|(_, r)| !r.density.is_finite() || r.density < 0.0) {
            return Err(Error::MalformedSource(format!(
                "record {n} of region {region} ({} -> layer {}) has invalid density {}",
                bad.region, bad.layer, bad.density
            )));
        }
        let cache = GroupingCache::new(&records)?;
        debug!(%region, records = records.len(), "session ready");

        Ok(Self {
            region,
            records,
            layer_labels,
            cache,
            selection: Vec::new(),
            hierarchy: Hierarchy::default(),
            threshold: 0.0,
            edge_opacity: EDGE_OPACITY,
        })
    }

    /// Apply the selection, threshold and edge opacity from `settings`.
    pub fn configure(&mut self, settings: &Settings) -> Result<()> {
        let selection = settings.selection()?;
        self.select(selection);
        self.set_threshold(settings.threshold);
        self.edge_opacity = settings.edge_opacity;
        Ok(())
    }

    #[inline] pub fn region(&self) -> &str { &self.region }

    #[inline] pub fn records(&self) -> &[RawRecord] { &self.records }

    #[inline] pub fn layer_labels(&self) -> &[Arc<str>] { &self.layer_labels }

    /// Cached grouping for `spec`.
    #[inline] pub fn grouping(&self, spec: GroupingSpec) -> &Grouping { self.cache.get(spec) }

    /// Build a hierarchy for `specs` without touching the current selection.
    pub fn build(&self, specs: &[GroupingSpec]) -> Hierarchy { Hierarchy::build(&self.cache, specs) }

    /// Replace the level selection and rebuild the current hierarchy.
    pub fn select(&mut self, specs: Vec<GroupingSpec>) -> &Hierarchy {
        self.hierarchy = Hierarchy::build(&self.cache, &specs);
        self.selection = specs;
        &self.hierarchy
    }

    #[inline] pub fn selection(&self) -> &[GroupingSpec] { &self.selection }

    #[inline] pub fn hierarchy(&self) -> &Hierarchy { &self.hierarchy }

    #[inline] pub fn threshold(&self) -> f64 { self.threshold }

    /// Change the display threshold. The hierarchy is left as is.
    #[inline] pub fn set_threshold(&mut self, threshold: f64) { self.threshold = threshold }

    /// Flow graph for the current selection and threshold.
    pub fn flow_graph<C: ColorLookup + ?Sized>(&self, colors: &C) -> FlowGraph {
        FlowGraph::emit_with_opacity(&self.hierarchy, colors, self.threshold, self.edge_opacity)
    }

    /// Total density of all records in the session.
    pub fn total_density(&self) -> f64 { self.records.iter().map(|r| r.density).sum() }
}
