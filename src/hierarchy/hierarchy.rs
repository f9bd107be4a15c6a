use std::sync::Arc;

use tracing::debug;

use crate::{
    grouping::{Grouping, GroupingCache, GroupingSpec, Label},
    hierarchy::FlowMatrix,
};

/// One level of a hierarchy: a cached grouping selected by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    spec: GroupingSpec,
    grouping: Arc<Grouping>,
}

impl Level {
    #[inline] pub fn spec(&self) -> GroupingSpec { self.spec }

    #[inline] pub fn grouping(&self) -> &Grouping { &self.grouping }

    #[inline] pub fn labels(&self) -> &[Label] { self.grouping.labels() }

    /// Aggregate density per label at this level (layers summed).
    #[inline] pub fn totals(&self) -> &[f64] { self.grouping.totals() }

    #[inline] pub fn len(&self) -> usize { self.grouping.num_groups() }

    #[inline] pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// An ordered chain of groupings with flow matrices between adjacent levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    levels: Vec<Level>,
    matrices: Vec<FlowMatrix>,  // matrices[k] = flow from levels[k] to levels[k + 1]
}

impl Hierarchy {
    /// Compose the cached groupings named by `specs` into a hierarchy.
    /// The first spec is the base level; each later level is matched against
    /// the level directly before it.
    pub fn build(cache: &GroupingCache, specs: &[GroupingSpec]) -> Self {
        let levels = specs.iter()
            .map(|&spec| Level { spec, grouping: cache.get(spec).clone() })
            .collect::<Vec<_>>();

        let matrices = levels.windows(2)
            .map(|pair| FlowMatrix::between(&pair[0].grouping, &pair[1].grouping, cache.densities()))
            .collect::<Vec<_>>();

        debug!(
            levels = levels.len(),
            nodes = levels.iter().map(Level::len).sum::<usize>(),
            "built hierarchy"
        );

        Self { levels, matrices }
    }

    #[inline] pub fn num_levels(&self) -> usize { self.levels.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.levels.is_empty() }

    #[inline] pub fn levels(&self) -> &[Level] { &self.levels }

    #[inline] pub fn level(&self, k: usize) -> &Level { &self.levels[k] }

    #[inline] pub fn matrices(&self) -> &[FlowMatrix] { &self.matrices }

    /// Flow matrix from level `k` to level `k + 1`.
    #[inline] pub fn matrix(&self, k: usize) -> &FlowMatrix { &self.matrices[k] }

    /// Specs of every level, in order.
    pub fn specs(&self) -> Vec<GroupingSpec> { self.levels.iter().map(Level::spec).collect() }

    /// Per-label aggregate of the base level (empty if there are no levels).
    pub fn base_totals(&self) -> &[f64] { self.levels.first().map(Level::totals).unwrap_or(&[]) }

    /// Total number of labels across all levels.
    pub fn num_nodes(&self) -> usize { self.levels.iter().map(Level::len).sum() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grouping::{GroupingKind, LayerHandling}, record::{Hemisphere, RawRecord}};

    fn spec(layers: LayerHandling, kind: GroupingKind) -> GroupingSpec { GroupingSpec::new(layers, kind) }

    fn example_cache() -> GroupingCache {
        GroupingCache::new(&[
            RawRecord::new("A", "X", Hemisphere::Ipsi, "L1", 0.4),
            RawRecord::new("A", "Y", Hemisphere::Ipsi, "L1", 0.6),
        ]).unwrap()
    }

    #[test]
    fn all_together_then_class() {
        let h = Hierarchy::build(&example_cache(), &[
            spec(LayerHandling::WithoutLayers, GroupingKind::AllTogether),
            spec(LayerHandling::WithoutLayers, GroupingKind::ByProjectionClass),
        ]);

        assert_eq!(h.num_levels(), 2);
        assert_eq!(h.base_totals(), &[1.0]);
        assert_eq!(h.level(1).labels().iter().map(Label::text).collect::<Vec<_>>(), vec!["Via X", "Via Y"]);
        assert_eq!(h.matrix(0).shape(), (1, 2));
        assert_eq!(h.matrix(0).get(0, 0), 0.4);
        assert_eq!(h.matrix(0).get(0, 1), 0.6);
        assert_eq!(h.num_nodes(), 3);
    }

    #[test]
    fn matrices_link_adjacent_levels_not_base() {
        let records = vec![
            RawRecord::new("A", "X", Hemisphere::Ipsi, "l1", 1.0),
            RawRecord::new("A", "Y", Hemisphere::Contra, "l2", 2.0),
            RawRecord::new("B", "Y", Hemisphere::Ipsi, "l1", 4.0),
        ];
        let cache = GroupingCache::new(&records).unwrap();
        let h = Hierarchy::build(&cache, &[
            spec(LayerHandling::WithoutLayers, GroupingKind::ByHemisphere),
            spec(LayerHandling::WithLayers, GroupingKind::AllTogether),
            spec(LayerHandling::WithoutLayers, GroupingKind::ByRegion),
        ]);

        assert_eq!(h.matrices().len(), 2);
        // second matrix: layers (l1, l2) x regions (A, B)
        assert_eq!(h.matrix(1).shape(), (2, 2));
        assert_eq!(h.matrix(1).get(0, 0), 1.0);
        assert_eq!(h.matrix(1).get(0, 1), 4.0);
        assert_eq!(h.matrix(1).get(1, 0), 2.0);
        assert_eq!(h.matrix(1).get(1, 1), 0.0);
    }

    #[test]
    fn matrices_conserve_mass() {
        let records = (0..24)
            .map(|n| RawRecord::new(
                ["A", "B", "C"][n % 3],
                ["X", "Y"][n % 2],
                if n % 5 < 2 { Hemisphere::Ipsi } else { Hemisphere::Contra },
                ["l1", "l23", "l4", "l5"][n % 4],
                0.125 * n as f64,
            ))
            .collect::<Vec<_>>();
        let cache = GroupingCache::new(&records).unwrap();
        let specs = GroupingSpec::all().collect::<Vec<_>>();
        let h = Hierarchy::build(&cache, &specs);

        for (k, matrix) in h.matrices().iter().enumerate() {
            for (row, total) in matrix.row_sums().iter().zip(h.level(k).totals()) {
                assert!((row - total).abs() < 1e-9);
            }
            for (col, total) in matrix.col_sums().iter().zip(h.level(k + 1).totals()) {
                assert!((col - total).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn build_is_idempotent() {
        let cache = example_cache();
        let specs = [
            spec(LayerHandling::WithoutLayers, GroupingKind::ByHemisphere),
            spec(LayerHandling::WithLayers, GroupingKind::AllTogether),
            spec(LayerHandling::WithoutLayers, GroupingKind::NoGrouping),
        ];
        assert_eq!(Hierarchy::build(&cache, &specs), Hierarchy::build(&cache, &specs));
        assert_eq!(Hierarchy::build(&cache, &specs).specs(), specs.to_vec());
    }

    #[test]
    fn empty_selection_is_empty_hierarchy() {
        let h = Hierarchy::build(&example_cache(), &[]);
        assert!(h.is_empty());
        assert!(h.matrices().is_empty());
        assert!(h.base_totals().is_empty());
    }
}
