use std::collections::BTreeMap;

use log::debug;

use hierbin_core::models::Interval;

use crate::plan::OverlapPlan;
use crate::scheme::{BinScheme, BinSchemeError};

/// An in-memory, bin-indexed interval store.
///
/// `BinnedIndex` is the reference storage backend for the bin scheme: it
/// runs the insert path (compute a bin per interval, persist the bin
/// alongside it) and the query path (scan the planned bin ranges, then
/// apply the exact coordinate filter). A relational backend does the same
/// thing with a `bin` column and the SQL fragment from [`crate::sql`];
/// here the "bin column scan" is a `BTreeMap` range scan.
///
/// # Examples
///
/// ```
/// use hierbin_index::{BinScheme, BinnedIndex, Interval};
///
/// let peaks = vec![
///     Interval { start: 100u32, end: 200, val: "peak1" },
///     Interval { start: 150, end: 300, val: "peak2" },
///     Interval { start: 400_000, end: 500_000, val: "peak3" },
/// ];
///
/// let index = BinnedIndex::build(BinScheme::ucsc(), peaks).unwrap();
///
/// let overlaps = index.find(180, 250).unwrap();
/// assert_eq!(overlaps.len(), 2); // peak1 and peak2
///
/// // or iterate without collecting
/// assert_eq!(index.find_iter(180, 250).unwrap().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BinnedIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    scheme: BinScheme,
    bins: BTreeMap<u32, Vec<Interval<T>>>,
    len: usize,
}

impl<T> BinnedIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Build an index over `intervals` with the given scheme.
    ///
    /// Fails on the first invalid interval; nothing is partially indexed
    /// in that case from the caller's point of view, the built value is
    /// simply never returned.
    pub fn build(scheme: BinScheme, intervals: Vec<Interval<T>>) -> Result<Self, BinSchemeError> {
        let mut index = BinnedIndex {
            scheme,
            bins: BTreeMap::new(),
            len: 0,
        };
        for interval in intervals {
            index.insert(interval)?;
        }
        debug!(
            "built binned index: {} intervals across {} occupied bins",
            index.len,
            index.bins.len()
        );
        Ok(index)
    }

    /// The insert path: compute the interval's bin and store it under
    /// that bin. Returns the assigned bin.
    pub fn insert(&mut self, interval: Interval<T>) -> Result<u32, BinSchemeError> {
        let bin = self.scheme.compute_bin(interval.start, interval.end)?;
        self.bins.entry(bin).or_default().push(interval);
        self.len += 1;
        Ok(bin)
    }

    /// The query path: plan the bin ranges for `[start, end)`, scan each
    /// one, and keep only intervals passing the exact overlap filter.
    pub fn find(&self, start: u32, end: u32) -> Result<Vec<Interval<T>>, BinSchemeError> {
        Ok(self.find_iter(start, end)?.cloned().collect())
    }

    /// Iterator form of [`find`](Self::find). Results come out grouped by
    /// bin range (finest tier first), not in coordinate order.
    pub fn find_iter(
        &self,
        start: u32,
        end: u32,
    ) -> Result<impl Iterator<Item = &Interval<T>>, BinSchemeError> {
        let plan = self.scheme.plan(start, end)?;
        Ok(self.scan(plan))
    }

    /// Count overlapping intervals without cloning them.
    pub fn count(&self, start: u32, end: u32) -> Result<usize, BinSchemeError> {
        Ok(self.find_iter(start, end)?.count())
    }

    fn scan(&self, plan: OverlapPlan) -> impl Iterator<Item = &Interval<T>> {
        let (q_start, q_end) = (plan.q_start, plan.q_end);
        plan.ranges
            .into_iter()
            .flat_map(move |range| self.bins.range(range.lo..=range.hi))
            .flat_map(|(_, intervals)| intervals.iter())
            .filter(move |interval| interval.overlap(q_start, q_end))
    }

    /// The scheme this index was built with.
    pub fn scheme(&self) -> &BinScheme {
        &self.scheme
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index has no intervals.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate all stored intervals in bin order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        self.bins.values().flat_map(|intervals| intervals.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::{assert_eq, assert_ne};
    use rstest::{fixture, rstest};

    #[fixture]
    fn intervals() -> Vec<Interval<&'static str>> {
        vec![
            Interval {
                start: 1,
                end: 5,
                val: "a",
            },
            Interval {
                start: 3,
                end: 7,
                val: "b",
            },
            Interval {
                start: 6,
                end: 10,
                val: "c",
            },
            Interval {
                start: 8,
                end: 12,
                val: "d",
            },
        ]
    }

    #[rstest]
    fn test_build_and_len(intervals: Vec<Interval<&'static str>>) {
        let index = BinnedIndex::build(BinScheme::ucsc(), intervals.clone()).unwrap();
        assert_eq!(index.len(), intervals.len());
        assert_ne!(index.is_empty(), true);
    }

    #[rstest]
    fn test_find_overlapping_intervals(intervals: Vec<Interval<&'static str>>) {
        let index = BinnedIndex::build(BinScheme::ucsc(), intervals).unwrap();

        // Query that overlaps with "a" and "b"
        let results = index.find(2, 4).unwrap();
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals.contains(&"a"), true);
        assert_eq!(vals.contains(&"b"), true);
        assert_eq!(vals.contains(&"c"), false);

        // Query that overlaps with "c" and "d"
        let results = index.find(9, 11).unwrap();
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals.contains(&"c"), true);
        assert_eq!(vals.contains(&"d"), true);
        assert_eq!(vals.contains(&"a"), false);
    }

    #[rstest]
    fn test_find_no_overlap(intervals: Vec<Interval<&'static str>>) {
        let index = BinnedIndex::build(BinScheme::ucsc(), intervals).unwrap();

        // All four intervals share the query's finest-tier cell, so the
        // pre-filter scans them and the exact filter drops every one
        let results = index.find(13, 15).unwrap();
        assert_eq!(results.is_empty(), true);
    }

    #[rstest]
    fn test_finds_across_tiers() {
        // one narrow interval and one spanning many finest-tier cells:
        // they land in different tiers but the same query must see both
        let intervals = vec![
            Interval {
                start: 200_000u32,
                end: 200_100,
                val: "narrow",
            },
            Interval {
                start: 100_000,
                end: 900_000,
                val: "wide",
            },
        ];
        let index = BinnedIndex::build(BinScheme::ucsc(), intervals).unwrap();

        let results = index.find(200_050, 200_060).unwrap();
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals.len(), 2);
        assert_eq!(vals.contains(&"narrow"), true);
        assert_eq!(vals.contains(&"wide"), true);
    }

    #[rstest]
    fn test_insert_after_build(intervals: Vec<Interval<&'static str>>) {
        let mut index = BinnedIndex::build(BinScheme::ucsc(), intervals).unwrap();
        let bin = index
            .insert(Interval {
                start: 0,
                end: 20,
                val: "e",
            })
            .unwrap();
        assert_eq!(bin, 585);
        assert_eq!(index.len(), 5);
        assert_eq!(index.count(1, 3).unwrap(), 2);
    }

    #[rstest]
    fn test_build_rejects_invalid_interval() {
        let intervals = vec![Interval {
            start: 10u32,
            end: 10,
            val: (),
        }];
        let err = BinnedIndex::build(BinScheme::ucsc(), intervals).unwrap_err();
        assert!(matches!(err, BinSchemeError::InvalidInterval { .. }));
    }

    #[rstest]
    fn test_query_rejects_invalid_interval(intervals: Vec<Interval<&'static str>>) {
        let index = BinnedIndex::build(BinScheme::ucsc(), intervals).unwrap();
        assert!(index.find(5, 5).is_err());
        assert!(index.find(5, 3).is_err());
    }

    #[rstest]
    fn test_empty_index() {
        let index: BinnedIndex<&str> = BinnedIndex::build(BinScheme::ucsc(), vec![]).unwrap();
        assert_eq!(index.len(), 0);
        assert_eq!(index.is_empty(), true);
        assert_eq!(index.find(1, 2).unwrap().is_empty(), true);
    }
}
