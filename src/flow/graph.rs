use serde::Serialize;

use crate::{flow::{Color, ColorLookup}, hierarchy::Hierarchy};

/// Opacity applied to a source node's color when drawing its edges.
pub const EDGE_OPACITY: f64 = 0.6;

/// A weighted edge between two nodes of adjacent levels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub color: Color,
}

/// Flattened hierarchy for rendering: ordered nodes with per-level offsets,
/// and integer-indexed edges above a threshold.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    pub labels: Vec<String>,
    pub offsets: Vec<usize>,        // offsets[k] = index of the first node of level k
    pub colors: Vec<Color>,         // colors[n] = color of node n
    pub edge_color: Option<Color>,  // first node color at edge opacity
    pub edges: Vec<FlowEdge>,
    pub threshold: f64,
}

impl FlowGraph {
    /// Flatten `hierarchy`, keeping edges whose value is strictly greater than `threshold`.
    /// Empty cells never become edges, whatever the threshold.
    pub fn emit<C: ColorLookup + ?Sized>(hierarchy: &Hierarchy, colors: &C, threshold: f64) -> Self {
        Self::emit_with_opacity(hierarchy, colors, threshold, EDGE_OPACITY)
    }

    /// As [`FlowGraph::emit`], with an explicit edge opacity.
    pub fn emit_with_opacity<C: ColorLookup + ?Sized>(
        hierarchy: &Hierarchy,
        colors: &C,
        threshold: f64,
        opacity: f64,
    ) -> Self {
        let mut labels = Vec::with_capacity(hierarchy.num_nodes());
        let mut offsets = Vec::with_capacity(hierarchy.num_levels());
        let mut node_colors = Vec::with_capacity(hierarchy.num_nodes());

        for level in hierarchy.levels() {
            offsets.push(labels.len());
            labels.extend(level.labels().iter().map(|l| l.text().to_string()));
            node_colors.extend(colors.colors_for(level.labels()));
        }

        let edge_color = node_colors.first().map(|c| c.with_opacity(opacity));
        let mut graph = Self { labels, offsets, colors: node_colors, edge_color, edges: Vec::new(), threshold };
        graph.filter_edges(hierarchy, threshold, opacity);
        graph
    }

    /// Recompute the edge list for a new threshold, keeping nodes and colors.
    /// `hierarchy` must be the one this graph was emitted from.
    pub fn refilter(&mut self, hierarchy: &Hierarchy, threshold: f64) {
        let opacity = self.edge_color.map_or(EDGE_OPACITY, |c| c.a);
        self.filter_edges(hierarchy, threshold, opacity);
    }

    fn filter_edges(&mut self, hierarchy: &Hierarchy, threshold: f64, opacity: f64) {
        debug_assert_eq!(self.offsets.len(), hierarchy.num_levels(), "graph/hierarchy mismatch");

        self.threshold = threshold;
        self.edges.clear();
        for (k, matrix) in hierarchy.matrices().iter().enumerate() {
            let (o1, o2) = (self.offsets[k], self.offsets[k + 1]);
            for (i, j, value) in matrix.iter() {
                if value > threshold && value > 0.0 {
                    self.edges.push(FlowEdge {
                        source: o1 + i,
                        target: o2 + j,
                        value,
                        color: self.colors[o1 + i].with_opacity(opacity),
                    });
                }
            }
        }
    }

    #[inline] pub fn num_nodes(&self) -> usize { self.labels.len() }

    #[inline] pub fn num_edges(&self) -> usize { self.edges.len() }

    /// Level containing node `n`.
    pub fn level_of(&self, n: usize) -> usize {
        debug_assert!(n < self.labels.len(), "node out of range");
        self.offsets.partition_point(|&o| o <= n).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        flow::Uniform,
        grouping::{GroupingCache, GroupingSpec},
        record::{Hemisphere, RawRecord},
    };

    fn hierarchy(specs: &[&str]) -> Hierarchy {
        let cache = GroupingCache::new(&[
            RawRecord::new("A", "X", Hemisphere::Ipsi, "L1", 0.4),
            RawRecord::new("A", "Y", Hemisphere::Ipsi, "L1", 0.6),
        ]).unwrap();
        let specs = specs.iter().map(|s| s.parse::<GroupingSpec>().unwrap()).collect::<Vec<_>>();
        Hierarchy::build(&cache, &specs)
    }

    const BLUE: Uniform = Uniform(Color::rgb(0, 0, 255));

    #[test]
    fn nodes_offsets_and_edges() {
        let h = hierarchy(&["Without layers/All together", "Without layers/By projection class"]);
        let g = FlowGraph::emit(&h, &BLUE, 0.0);

        assert_eq!(g.labels, vec!["ALL", "Via X", "Via Y"]);
        assert_eq!(g.offsets, vec![0, 1]);
        assert_eq!(g.colors.len(), 3);
        assert_eq!(g.edge_color, Some(Color { r: 0, g: 0, b: 255, a: 0.6 }));
        assert_eq!(g.edges, vec![
            FlowEdge { source: 0, target: 1, value: 0.4, color: Color { r: 0, g: 0, b: 255, a: 0.6 } },
            FlowEdge { source: 0, target: 2, value: 0.6, color: Color { r: 0, g: 0, b: 255, a: 0.6 } },
        ]);
    }

    #[test]
    fn negative_threshold_skips_empty_cells() {
        let cache = GroupingCache::new(&[
            RawRecord::new("A", "X", Hemisphere::Ipsi, "L1", 0.4),
            RawRecord::new("B", "Y", Hemisphere::Ipsi, "L1", 0.6),
        ]).unwrap();
        let specs = ["Without layers/By region", "Without layers/By projection class"]
            .map(|s| s.parse::<GroupingSpec>().unwrap());
        let h = Hierarchy::build(&cache, &specs);

        let mut g = FlowGraph::emit(&h, &BLUE, -1.0);
        let edges = g.edges.iter().map(|e| (e.source, e.target, e.value)).collect::<Vec<_>>();
        assert_eq!(edges, vec![(0, 2, 0.4), (1, 3, 0.6)]);

        g.refilter(&h, f64::NEG_INFINITY);
        assert!(g.edges.iter().all(|e| e.value > 0.0));
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn threshold_is_strict() {
        let h = hierarchy(&["Without layers/All together", "Without layers/By projection class"]);

        let g = FlowGraph::emit(&h, &BLUE, 0.5);
        assert_eq!(g.edges.len(), 1);
        assert_eq!((g.edges[0].target, g.edges[0].value), (2, 0.6));

        assert_eq!(FlowGraph::emit(&h, &BLUE, 0.6).num_edges(), 0);
        assert_eq!(FlowGraph::emit(&h, &BLUE, 0.4).num_edges(), 1);
    }

    #[test]
    fn refilter_matches_fresh_emit() {
        let h = hierarchy(&["Without layers/By hemisphere", "With layers/All together", "Without layers/No grouping"]);
        let mut g = FlowGraph::emit(&h, &BLUE, 0.0);
        g.refilter(&h, 0.5);
        assert_eq!(g, FlowGraph::emit(&h, &BLUE, 0.5));
    }

    #[test]
    fn zero_cells_never_become_edges() {
        let h = hierarchy(&["Without layers/By projection class", "Without layers/By projection class"]);
        let g = FlowGraph::emit(&h, &BLUE, 0.0);
        assert_eq!(g.edges.iter().map(|e| (e.source, e.target)).collect::<Vec<_>>(), vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn level_of_uses_offsets() {
        let h = hierarchy(&["Without layers/All together", "Without layers/By projection class", "Without layers/By region"]);
        let g = FlowGraph::emit(&h, &BLUE, 0.0);
        assert_eq!(g.offsets, vec![0, 1, 3]);
        assert_eq!((0..g.num_nodes()).map(|n| g.level_of(n)).collect::<Vec<_>>(), vec![0, 1, 1, 2]);
    }

    #[test]
    fn empty_hierarchy_emits_nothing() {
        let g = FlowGraph::emit(&Hierarchy::default(), &BLUE, 0.0);
        assert_eq!(g, FlowGraph::default());
    }
}
