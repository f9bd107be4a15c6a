use std::sync::Arc;

use tracing::debug;

use crate::{Result, grouping::{Grouping, GroupingSpec}, record::RawRecord};

/// Eagerly computed grouping for every (layer handling, grouping kind) pair.
#[derive(Debug, Clone)]
pub struct GroupingCache {
    groupings: Vec<Arc<Grouping>>,  // groupings[spec.index()]
    densities: Arc<[f64]>,          // densities[r] = records[r].density
}

impl GroupingCache {
    /// Group `records` under every spec up front.
    pub fn new(records: &[RawRecord]) -> Result<Self> {
        let groupings = GroupingSpec::all()
            .map(|spec| {
                let grouping = Grouping::for_spec(records, spec);
                grouping.check()?;
                debug!(%spec, groups = grouping.num_groups(), "cached grouping");
                Ok(Arc::new(grouping))
            })
            .collect::<Result<Vec<_>>>()?;

        let densities = records.iter().map(|r| r.density).collect();
        Ok(Self { groupings, densities })
    }

    /// Cached grouping for `spec`.
    #[inline] pub fn get(&self, spec: GroupingSpec) -> &Arc<Grouping> { &self.groupings[spec.index()] }

    /// Record densities, indexed like the records.
    #[inline] pub fn densities(&self) -> &[f64] { &self.densities }

    #[inline] pub fn num_records(&self) -> usize { self.densities.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grouping::{GroupingKind, LayerHandling}, record::Hemisphere};

    #[test]
    fn caches_every_spec() {
        let records = vec![
            RawRecord::new("A", "X", Hemisphere::Ipsi, "l1", 0.5),
            RawRecord::new("B", "Y", Hemisphere::Contra, "l2", 1.5),
        ];
        let cache = GroupingCache::new(&records).unwrap();

        assert_eq!(cache.num_records(), 2);
        assert_eq!(cache.densities(), &[0.5, 1.5]);
        for spec in GroupingSpec::all() {
            let grouping = cache.get(spec);
            assert_eq!(grouping.spec(), Some(spec));
            assert_eq!(**grouping, Grouping::for_spec(&records, spec));
        }

        let by_hemi = cache.get(GroupingSpec::new(LayerHandling::WithoutLayers, GroupingKind::ByHemisphere));
        assert_eq!(by_hemi.labels()[0].text(), "contra hemisphere");
    }
}
