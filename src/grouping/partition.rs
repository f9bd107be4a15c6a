/// IndexPartition is a total assignment of record indices to groups.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndexPartition {
    sets: Vec<Vec<usize>>,  // sets[s] = indices in group s, ascending
    index: Vec<usize>,      // index[e] = s when e is in sets[s]
}

impl IndexPartition {
    /// Build a partition with `num_sets` groups from a complete slice of assignments.
    pub(crate) fn new(num_sets: usize, assignments: Vec<usize>) -> Self {
        let mut sets = vec![Vec::new(); num_sets];
        for (elem, &set) in assignments.iter().enumerate() {
            assert!(set < num_sets, "set out of range");
            sets[set].push(elem);
        }
        Self { sets, index: assignments }
    }

    /// Build directly from sets and reverse index, without checking that they agree.
    #[cfg(test)]
    pub(crate) fn from_parts(sets: Vec<Vec<usize>>, index: Vec<usize>) -> Self { Self { sets, index } }

    /// Number of sets.
    #[inline] pub(crate) fn num_sets(&self) -> usize { self.sets.len() }

    /// Universe size (number of elements addressable by index).
    #[inline] pub(crate) fn num_elems(&self) -> usize { self.index.len() }

    /// Return the set that `elem` is in.
    #[inline]
    pub(crate) fn find(&self, elem: usize) -> usize {
        debug_assert!(elem < self.index.len(), "element out of range");
        self.index[elem]
    }

    /// Returns a reference to the elements in `set`.
    #[inline]
    pub(crate) fn get(&self, set: usize) -> &[usize] {
        debug_assert!(set < self.sets.len(), "set out of range");
        &self.sets[set]
    }

    /// Complete vector of assignments for each element.
    #[inline] pub(crate) fn assignments(&self) -> &[usize] { &self.index }

    /// Iterator over each set as a slice.
    #[inline]
    pub(crate) fn iter_sets(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.sets.iter().map(|v| v.as_slice())
    }

    /// Iterator over all elements in all sets.
    #[inline]
    pub(crate) fn iter_all(&self) -> impl Iterator<Item = usize> + '_ {
        self.sets.iter().flat_map(|v| v.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::IndexPartition;

    #[test]
    fn new_basic_assignment() {
        let assign = vec![0, 1, 2, 0, 2, 1];
        let ps = IndexPartition::new(3, assign.clone());

        assert_eq!(ps.num_sets(), 3);
        assert_eq!(ps.num_elems(), 6);
        assert_eq!(ps.get(0), &[0, 3]);
        assert_eq!(ps.get(1), &[1, 5]);
        assert_eq!(ps.get(2), &[2, 4]);
        assert_eq!(ps.assignments(), assign.as_slice());

        for (elem, &set) in assign.iter().enumerate() {
            assert_eq!(ps.find(elem), set);
        }
    }

    #[test]
    fn sets_cover_universe_once() {
        let ps = IndexPartition::new(3, vec![2, 2, 0, 1, 0, 2, 1]);

        let mut all = ps.iter_all().collect::<Vec<_>>();
        all.sort_unstable();
        assert_eq!(all, (0..7).collect::<Vec<_>>());

        // Each set is ascending
        for set in ps.iter_sets() {
            assert!(set.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn empty_universe() {
        let ps = IndexPartition::new(0, vec![]);
        assert_eq!(ps.num_sets(), 0);
        assert_eq!(ps.num_elems(), 0);
        assert_eq!(ps.iter_all().count(), 0);
    }

    #[test]
    #[should_panic(expected = "set out of range")]
    fn new_panics_on_set_oob() {
        IndexPartition::new(2, vec![0, 1, 2]);
    }
}
