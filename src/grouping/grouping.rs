use std::collections::BTreeMap;

use crate::{
    Error, Result,
    grouping::{GroupingSpec, Label, partition::IndexPartition},
    record::RawRecord,
};

/// A partition of record indices induced by a labeling function.
/// Groups are ordered by label text, so the result never depends on hashing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    spec: Option<GroupingSpec>,
    labels: Vec<Label>,
    partition: IndexPartition,
    totals: Vec<f64>,       // totals[g] = Σ density over group g
}

/// Partition `records` by the label `label_fn` assigns to each of them.
pub fn group<F>(records: &[RawRecord], label_fn: F) -> Grouping
where F: Fn(&RawRecord) -> Label {
    Grouping::build(None, records, label_fn)
}

impl Grouping {
    /// Grouping of `records` under one of the fixed label templates.
    pub fn for_spec(records: &[RawRecord], spec: GroupingSpec) -> Self {
        Self::build(Some(spec), records, |record| Label::for_record(spec, record))
    }

    fn build<F>(spec: Option<GroupingSpec>, records: &[RawRecord], label_fn: F) -> Self
    where F: Fn(&RawRecord) -> Label {
        let keyed = records.iter().map(label_fn).collect::<Vec<_>>();

        // Sorted distinct label texts -> group position.
        let mut positions: BTreeMap<&str, usize> = keyed.iter().map(|l| (l.text(), 0)).collect();
        for (pos, slot) in positions.values_mut().enumerate() { *slot = pos }

        let assignments = keyed.iter().map(|l| positions[l.text()]).collect::<Vec<_>>();
        let num_groups = positions.len();

        let mut labels: Vec<Option<Label>> = vec![None; num_groups];
        let mut totals = vec![0.0; num_groups];
        for ((label, record), &pos) in keyed.iter().zip(records).zip(&assignments) {
            if labels[pos].is_none() { labels[pos] = Some(label.clone()) }
            totals[pos] += record.density;
        }

        Self {
            spec,
            labels: labels.into_iter().flatten().collect(),
            partition: IndexPartition::new(num_groups, assignments),
            totals,
        }
    }

    /// The template spec this grouping was built from, if any.
    #[inline] pub fn spec(&self) -> Option<GroupingSpec> { self.spec }

    /// Number of groups.
    #[inline] pub fn num_groups(&self) -> usize { self.partition.num_sets() }

    /// Number of records partitioned.
    #[inline] pub fn num_records(&self) -> usize { self.partition.num_elems() }

    /// Group labels in sorted order.
    #[inline] pub fn labels(&self) -> &[Label] { &self.labels }

    #[inline] pub fn label(&self, group: usize) -> &Label { &self.labels[group] }

    /// Record indices belonging to `group`, ascending.
    #[inline] pub fn indices(&self, group: usize) -> &[usize] { self.partition.get(group) }

    /// Iterator over every group's index set.
    #[inline]
    pub fn iter_groups(&self) -> impl Iterator<Item = &[usize]> + '_ { self.partition.iter_sets() }

    /// Position of the group containing `record`.
    #[inline] pub fn group_of(&self, record: usize) -> usize { self.partition.find(record) }

    /// Reverse index: group position for every record.
    #[inline] pub fn assignments(&self) -> &[usize] { self.partition.assignments() }

    /// Summed density per group.
    #[inline] pub fn totals(&self) -> &[f64] { &self.totals }

    /// Verify that groups are non-empty and cover every record exactly once.
    pub fn check(&self) -> Result<()> {
        let spec = || self.spec.map_or_else(|| "custom".to_string(), |s| s.to_string());

        for (group, indices) in self.iter_groups().enumerate() {
            if indices.is_empty() {
                return Err(Error::EmptyGroup { spec: spec(), label: self.labels[group].to_string() });
            }
        }

        let mut seen = vec![false; self.num_records()];
        for elem in self.partition.iter_all() {
            if std::mem::replace(&mut seen[elem], true) {
                return Err(Error::PartitionCoverage { spec: spec(), detail: format!("record {elem} assigned twice") });
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(Error::PartitionCoverage { spec: spec(), detail: format!("record {missing} unassigned") });
        }
        Ok(())
    }
}
