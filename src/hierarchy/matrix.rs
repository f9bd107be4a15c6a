use ndarray::{Array2, Axis};

use crate::grouping::Grouping;

/// Densities aggregated over the intersections of two adjacent levels' groups.
/// Entry [i, j] sums density over records in group i of `from` and group j of `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowMatrix {
    values: Array2<f64>,
}

impl FlowMatrix {
    /// Derive the flow matrix in one pass over the records, bucketing each
    /// record by its (from, to) group pair. Records sharing a cell are summed
    /// in ascending index order.
    pub fn between(from: &Grouping, to: &Grouping, densities: &[f64]) -> Self {
        debug_assert_eq!(from.num_records(), densities.len(), "record count mismatch");
        debug_assert_eq!(to.num_records(), densities.len(), "record count mismatch");

        let mut values = Array2::zeros((from.num_groups(), to.num_groups()));
        let pairs = from.assignments().iter().zip(to.assignments());
        for (&density, (&i, &j)) in densities.iter().zip(pairs) {
            values[[i, j]] += density;
        }
        Self { values }
    }

    /// (rows, cols) = (|from level|, |to level|).
    #[inline] pub fn shape(&self) -> (usize, usize) { self.values.dim() }

    #[inline] pub fn get(&self, i: usize, j: usize) -> f64 { self.values[[i, j]] }

    #[inline] pub fn values(&self) -> &Array2<f64> { &self.values }

    /// Outgoing flow per source group.
    pub fn row_sums(&self) -> Vec<f64> { self.values.sum_axis(Axis(1)).to_vec() }

    /// Incoming flow per target group.
    pub fn col_sums(&self) -> Vec<f64> { self.values.sum_axis(Axis(0)).to_vec() }

    /// Total flow across the matrix.
    pub fn total(&self) -> f64 { self.values.sum() }

    /// Iterator over `(i, j, value)` for every cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values.indexed_iter().map(|((i, j), &v)| (i, j, v))
    }
}
