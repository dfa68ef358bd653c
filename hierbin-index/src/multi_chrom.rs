//! Genome-wide bin indexing for multi-chromosome overlap queries.
//!
//! Bins are computed per chromosome, so a genome-wide index is one
//! [`BinnedIndex`] per chromosome behind a name lookup. All indexes share
//! a single [`BinScheme`], which keeps the insert path and the query path
//! of the whole dataset on the same geometry.
//!
//! # Examples
//!
//! ```
//! use hierbin_index::{BinScheme, multi_chrom::IntoMultiChromBinIndex};
//! use hierbin_core::models::{Region, RegionSet};
//!
//! let genes = RegionSet::from(vec![
//!     Region { chr: "chr1".to_string(), start: 1000, end: 2000, rest: Some("BRCA1".to_string()) },
//!     Region { chr: "chr2".to_string(), start: 1000, end: 3000, rest: Some("EGFR".to_string()) },
//! ]);
//! let index = genes.into_multi_chrom_bin_index(BinScheme::ucsc()).unwrap();
//!
//! let queries = RegionSet::from(vec![
//!     Region { chr: "chr1".to_string(), start: 1500, end: 2500, rest: None },
//! ]);
//! let overlaps = index.find_overlaps(&queries).unwrap();
//! assert_eq!(overlaps.len(), 1);
//! ```

use std::collections::HashMap;

use hierbin_core::models::{Interval, Region, RegionSet};

use crate::scheme::{BinScheme, BinSchemeError};
use crate::store::BinnedIndex;

/// A genome-wide bin index: one [`BinnedIndex`] per chromosome.
pub struct MultiChromBinIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    index_maps: HashMap<String, BinnedIndex<T>>,
    scheme: BinScheme,
}

/// An iterator over intervals overlapping any of a set of query regions,
/// yielding `(chromosome, interval)` pairs.
///
/// Created by [`MultiChromBinIndex::find_overlaps_iter`], which validates
/// every query region up front so iteration itself cannot fail. Query
/// regions on chromosomes absent from the index are skipped.
pub struct IterFindOverlaps<'a, 'b, T>
where
    T: Eq + Clone + Send + Sync,
{
    inner: &'a HashMap<String, BinnedIndex<T>>,
    regions: &'b [Region],
    region_idx: usize,
    current_chr: Option<String>,
    current_iter: Option<Box<dyn Iterator<Item = &'a Interval<T>> + 'a>>,
}

impl<'a, 'b, T> Iterator for IterFindOverlaps<'a, 'b, T>
where
    T: Eq + Clone + Send + Sync,
{
    type Item = (String, &'a Interval<T>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // drain the current chromosome's iterator first
            if let Some(ref mut iter) = self.current_iter {
                if let Some(interval) = iter.next() {
                    return Some((self.current_chr.as_ref().unwrap().clone(), interval));
                }
            }

            // current iterator exhausted or doesn't exist, move to next region
            if self.region_idx >= self.regions.len() {
                return None;
            }

            let region = &self.regions[self.region_idx];
            self.region_idx += 1;

            if let Some(index) = self.inner.get(&region.chr) {
                // regions were validated when the iterator was built
                let iter = index
                    .find_iter(region.start, region.end)
                    .expect("query region validated before iteration");
                self.current_chr = Some(region.chr.clone());
                self.current_iter = Some(Box::new(iter));
            }
        }
    }
}

impl<T> MultiChromBinIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Build a genome-wide index from per-chromosome interval lists, all
    /// indexed with the same scheme.
    pub fn build(
        scheme: BinScheme,
        intervals_by_chr: HashMap<String, Vec<Interval<T>>>,
    ) -> Result<Self, BinSchemeError> {
        let mut index_maps = HashMap::new();
        for (chr, intervals) in intervals_by_chr {
            index_maps.insert(chr, BinnedIndex::build(scheme.clone(), intervals)?);
        }
        Ok(MultiChromBinIndex { index_maps, scheme })
    }

    /// The scheme shared by every per-chromosome index.
    pub fn scheme(&self) -> &BinScheme {
        &self.scheme
    }

    /// The per-chromosome index for `chr`, if any intervals were stored
    /// there.
    pub fn chrom_index(&self, chr: &str) -> Option<&BinnedIndex<T>> {
        self.index_maps.get(chr)
    }

    /// Returns an iterator over all overlapping intervals for the query
    /// regions. Each item is a tuple of (chromosome, interval reference).
    ///
    /// Every query region is validated against the scheme before the
    /// iterator is returned.
    pub fn find_overlaps_iter<'a, 'b>(
        &'a self,
        rs: &'b RegionSet,
    ) -> Result<IterFindOverlaps<'a, 'b, T>, BinSchemeError> {
        for region in &rs.regions {
            // only regions on indexed chromosomes will be scanned, but
            // a malformed query is a caller bug regardless of chromosome
            self.scheme.plan(region.start, region.end)?;
        }
        Ok(IterFindOverlaps {
            inner: &self.index_maps,
            regions: &rs.regions,
            region_idx: 0,
            current_chr: None,
            current_iter: None,
        })
    }

    /// Collect all overlaps into a Vec for convenience. You're almost
    /// always better off using the iterator form of this function,
    /// `find_overlaps_iter`.
    pub fn find_overlaps(
        &self,
        rs: &RegionSet,
    ) -> Result<Vec<(String, Interval<T>)>, BinSchemeError> {
        Ok(self
            .find_overlaps_iter(rs)?
            .map(|(chr, interval)| (chr, interval.clone()))
            .collect())
    }
}

/// A trait for converting region-based data into a [`MultiChromBinIndex`].
pub trait IntoMultiChromBinIndex {
    /// Group regions by chromosome and index each group with `scheme`.
    fn into_multi_chrom_bin_index(
        self,
        scheme: BinScheme,
    ) -> Result<MultiChromBinIndex<Option<String>>, BinSchemeError>;
}

impl IntoMultiChromBinIndex for RegionSet {
    fn into_multi_chrom_bin_index(
        self,
        scheme: BinScheme,
    ) -> Result<MultiChromBinIndex<Option<String>>, BinSchemeError> {
        let mut intervals_by_chr: HashMap<String, Vec<Interval<Option<String>>>> = HashMap::new();
        for region in self.regions {
            intervals_by_chr
                .entry(region.chr)
                .or_default()
                .push(Interval {
                    start: region.start,
                    end: region.end,
                    val: region.rest,
                });
        }
        MultiChromBinIndex::build(scheme, intervals_by_chr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn region(chr: &str, start: u32, end: u32, rest: Option<&str>) -> Region {
        Region {
            chr: chr.to_string(),
            start,
            end,
            rest: rest.map(|s| s.to_string()),
        }
    }

    #[fixture]
    fn gene_index() -> MultiChromBinIndex<Option<String>> {
        RegionSet::from(vec![
            region("chr1", 1000, 2000, Some("BRCA1")),
            region("chr1", 5000, 6000, Some("TP53")),
            region("chr2", 1000, 3000, Some("EGFR")),
        ])
        .into_multi_chrom_bin_index(BinScheme::ucsc())
        .unwrap()
    }

    #[rstest]
    fn test_find_overlaps_across_chromosomes(gene_index: MultiChromBinIndex<Option<String>>) {
        let queries = RegionSet::from(vec![
            region("chr1", 1500, 2500, None),
            region("chr2", 2000, 4000, None),
        ]);

        let overlaps = gene_index.find_overlaps(&queries).unwrap();
        let names: Vec<String> = overlaps
            .iter()
            .map(|(_, iv)| iv.val.clone().unwrap())
            .collect();
        assert_eq!(names.len(), 2);
        assert_eq!(names.contains(&"BRCA1".to_string()), true);
        assert_eq!(names.contains(&"EGFR".to_string()), true);
    }

    #[rstest]
    fn test_unknown_chromosome_is_skipped(gene_index: MultiChromBinIndex<Option<String>>) {
        let queries = RegionSet::from(vec![region("chrUn", 0, 10_000, None)]);
        let overlaps = gene_index.find_overlaps(&queries).unwrap();
        assert_eq!(overlaps.is_empty(), true);
    }

    #[rstest]
    fn test_same_coordinates_different_chromosome(gene_index: MultiChromBinIndex<Option<String>>) {
        // chr1:1000-2000 and chr2:1000-3000 share bins; the name lookup
        // must keep them apart
        let queries = RegionSet::from(vec![region("chr2", 1500, 1600, None)]);
        let overlaps = gene_index.find_overlaps(&queries).unwrap();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].0, "chr2");
        assert_eq!(overlaps[0].1.val.as_deref(), Some("EGFR"));
    }

    #[rstest]
    fn test_invalid_query_region_fails_fast(gene_index: MultiChromBinIndex<Option<String>>) {
        let queries = RegionSet::from(vec![region("chr1", 10, 10, None)]);
        assert!(gene_index.find_overlaps(&queries).is_err());
        // even when the chromosome isn't indexed at all
        let queries = RegionSet::from(vec![region("chrUn", 10, 5, None)]);
        assert!(gene_index.find_overlaps(&queries).is_err());
    }

    #[rstest]
    fn test_iterator_yields_chromosome_names(gene_index: MultiChromBinIndex<Option<String>>) {
        let queries = RegionSet::from(vec![region("chr1", 0, 10_000, None)]);
        let chrs: Vec<String> = gene_index
            .find_overlaps_iter(&queries)
            .unwrap()
            .map(|(chr, _)| chr)
            .collect();
        assert_eq!(chrs, vec!["chr1".to_string(), "chr1".to_string()]);
    }
}
