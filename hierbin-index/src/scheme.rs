use thiserror::Error;

use crate::plan::{BinRange, OverlapPlan};

/// Errors that can occur when constructing a [`BinScheme`] or computing
/// bins with one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BinSchemeError {
    /// The interval is empty, inverted, or extends past the coordinate
    /// space the scheme can represent.
    #[error(
        "invalid interval [{start}, {end}): end must be greater than start and at most {max_coord}"
    )]
    InvalidInterval {
        start: u32,
        end: u32,
        max_coord: u32,
    },
    /// The tier geometry itself is inconsistent.
    #[error("invalid tier geometry: {0}")]
    InvalidGeometry(String),
}

/// The tier geometry of a hierarchical bin scheme.
///
/// A scheme divides the coordinate space `[0, max_coord)` into a stack of
/// tiers, finest first. Cells at the finest tier span `2^shift_first`
/// positions; each coarser tier's cells span `2^shift_next` times the
/// previous tier's. Every tier gets a block of bin numbers starting at its
/// offset, so bins from different tiers never collide.
///
/// The geometry is fixed at construction and never mutated afterwards. A
/// dataset indexed with one scheme must be queried with the same scheme;
/// keeping a single `BinScheme` value per dataset makes that true by
/// construction.
///
/// # Examples
///
/// ```
/// use hierbin_index::BinScheme;
///
/// let scheme = BinScheme::ucsc();
/// assert_eq!(scheme.max_coord(), 1 << 29);
///
/// // an interval inside one finest-tier cell gets a finest-tier bin
/// assert_eq!(scheme.compute_bin(0, 1000).unwrap(), 585);
///
/// // one straddling a finest-tier cell boundary is pushed a tier up
/// assert_eq!(scheme.compute_bin(100_000, 300_000).unwrap(), 73);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinScheme {
    shift_first: u32,
    shift_next: u32,
    offsets: Vec<u32>,
}

impl BinScheme {
    /// The canonical UCSC genome-browser scheme: 5 tiers, finest cells of
    /// 128 kb (`2^17`), each coarser tier 8x wider, coordinates bounded at
    /// `2^29`.
    pub fn ucsc() -> Self {
        BinScheme {
            shift_first: 17,
            shift_next: 3,
            offsets: vec![512 + 64 + 8 + 1, 64 + 8 + 1, 8 + 1, 1, 0],
        }
    }

    /// Create a scheme with a custom tier geometry.
    ///
    /// `offsets` runs finest to coarsest. The geometry must be internally
    /// consistent: the coarsest tier is a single cell with offset 0, and
    /// each finer tier's offset leaves room for every cell of the coarser
    /// tiers below it. Anything else would let bins from two tiers collide,
    /// which silently breaks the no-false-negative guarantee, so it is
    /// rejected here rather than detected at query time.
    pub fn new(
        shift_first: u32,
        shift_next: u32,
        offsets: Vec<u32>,
    ) -> Result<Self, BinSchemeError> {
        if offsets.is_empty() {
            return Err(BinSchemeError::InvalidGeometry(
                "at least one tier is required".to_string(),
            ));
        }
        if shift_first == 0 || shift_next == 0 {
            return Err(BinSchemeError::InvalidGeometry(
                "tier shifts must be positive".to_string(),
            ));
        }

        let tiers = offsets.len() as u32;
        let total_shift = shift_first + (tiers - 1) * shift_next;
        if total_shift > 31 {
            return Err(BinSchemeError::InvalidGeometry(format!(
                "coarsest tier shift {} exceeds u32 coordinate space",
                total_shift
            )));
        }

        if *offsets.last().unwrap() != 0 {
            return Err(BinSchemeError::InvalidGeometry(
                "coarsest tier offset must be 0".to_string(),
            ));
        }

        let max_coord = 1u32 << total_shift;
        for i in 0..offsets.len() - 1 {
            // cells of the next-coarser tier, which occupy the bin numbers
            // between the two offsets
            let coarser_shift = shift_first + (i as u32 + 1) * shift_next;
            let coarser_cells = max_coord >> coarser_shift;
            if offsets[i] != offsets[i + 1] + coarser_cells {
                return Err(BinSchemeError::InvalidGeometry(format!(
                    "tier {} offset {} does not leave room for the {} cells of tier {}",
                    i,
                    offsets[i],
                    coarser_cells,
                    i + 1
                )));
            }
        }

        Ok(BinScheme {
            shift_first,
            shift_next,
            offsets,
        })
    }

    /// Number of tiers in the scheme.
    pub fn tier_count(&self) -> usize {
        self.offsets.len()
    }

    /// The right shift that maps a coordinate to its cell at tier `tier`
    /// (0 is the finest tier).
    #[inline]
    fn shift(&self, tier: usize) -> u32 {
        self.shift_first + tier as u32 * self.shift_next
    }

    /// The exclusive upper bound of the coordinate space: the span of the
    /// coarsest tier's single cell. Intervals ending past this are
    /// rejected rather than silently truncated.
    pub fn max_coord(&self) -> u32 {
        1 << self.shift(self.offsets.len() - 1)
    }

    /// The largest bin number the scheme can assign. Useful for sizing a
    /// backing store's bin column.
    pub fn max_bin(&self) -> u32 {
        self.offsets[0] + ((self.max_coord() - 1) >> self.shift_first)
    }

    #[inline]
    fn validate(&self, start: u32, end: u32) -> Result<(), BinSchemeError> {
        if end <= start || end > self.max_coord() {
            return Err(BinSchemeError::InvalidInterval {
                start,
                end,
                max_coord: self.max_coord(),
            });
        }
        Ok(())
    }

    /// Compute the bin for the half-open interval `[start, end)`.
    ///
    /// The interval is assigned to the first tier, finest to coarsest,
    /// whose single cell fully contains it. An interval straddling a cell
    /// boundary at one tier is pushed to the next coarser tier; that is
    /// the scheme working as intended, not a degenerate case. Since
    /// coordinates are bounded by [`max_coord`](Self::max_coord), the
    /// coarsest tier's single cell always qualifies as the last resort.
    ///
    /// ```
    /// use hierbin_index::BinScheme;
    ///
    /// let scheme = BinScheme::ucsc();
    /// // straddles the 2^17 cell boundary at the finest tier
    /// let bin = scheme.compute_bin(131_071, 131_073).unwrap();
    /// assert_eq!(bin, 73);
    /// ```
    pub fn compute_bin(&self, start: u32, end: u32) -> Result<u32, BinSchemeError> {
        self.validate(start, end)?;

        for (tier, offset) in self.offsets.iter().enumerate() {
            let shift = self.shift(tier);
            let start_cell = start >> shift;
            let end_cell = (end - 1) >> shift;
            if start_cell == end_cell {
                return Ok(offset + start_cell);
            }
        }

        // unreachable with a validated geometry: the coarsest tier is one
        // cell covering [0, max_coord)
        Ok(*self.offsets.last().unwrap())
    }

    /// Compute the bin ranges to scan for intervals overlapping the query
    /// `[q_start, q_end)`, one inclusive range per tier, finest to
    /// coarsest.
    ///
    /// Any stored interval overlapping the query was assigned, at some
    /// tier, to a cell intersecting the query's cell span at that tier, so
    /// its bin falls in that tier's range here. The ranges are a
    /// pre-filter only: the caller must still apply the exact test
    /// `stored.start < q_end && stored.end > q_start`.
    pub fn overlap_ranges(
        &self,
        q_start: u32,
        q_end: u32,
    ) -> Result<Vec<BinRange>, BinSchemeError> {
        self.validate(q_start, q_end)?;

        let ranges = self
            .offsets
            .iter()
            .enumerate()
            .map(|(tier, offset)| {
                let shift = self.shift(tier);
                BinRange {
                    lo: offset + (q_start >> shift),
                    hi: offset + ((q_end - 1) >> shift),
                }
            })
            .collect();

        Ok(ranges)
    }

    /// Build the full [`OverlapPlan`] for a query: the per-tier bin ranges
    /// plus the query bounds needed for the exact post-filter.
    pub fn plan(&self, q_start: u32, q_end: u32) -> Result<OverlapPlan, BinSchemeError> {
        let ranges = self.overlap_ranges(q_start, q_end)?;
        Ok(OverlapPlan {
            ranges,
            q_start,
            q_end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ucsc() -> BinScheme {
        BinScheme::ucsc()
    }

    #[rstest]
    fn test_ucsc_geometry(ucsc: BinScheme) {
        assert_eq!(ucsc.tier_count(), 5);
        assert_eq!(ucsc.max_coord(), 1 << 29);
        assert_eq!(ucsc.max_bin(), 585 + 4095);
    }

    #[rstest]
    fn test_ucsc_constants_are_a_valid_geometry() {
        let rebuilt = BinScheme::new(17, 3, vec![585, 73, 9, 1, 0]).unwrap();
        assert_eq!(rebuilt, BinScheme::ucsc());
    }

    // the worked examples from the UCSC scheme
    #[rstest]
    #[case(0, 1000, 585)] // fits the first finest-tier cell
    #[case(100_000, 300_000, 73)] // straddles finest cells 0..=2, fits tier-1 cell 0
    #[case(0, 1 << 29, 0)] // whole coordinate space lands in the catch-all
    #[case(1000, 1001, 585)] // length-1 interval
    #[case(131_071, 131_073, 73)] // straddles the 2^17 boundary
    #[case(131_072, 131_073, 586)] // just past the boundary, second finest cell
    #[case((1 << 29) - 1, 1 << 29, 585 + 4095)] // last position, last finest bin
    fn test_compute_bin(
        ucsc: BinScheme,
        #[case] start: u32,
        #[case] end: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(ucsc.compute_bin(start, end).unwrap(), expected);
    }

    #[rstest]
    #[case(5, 5)]
    #[case(5, 3)]
    #[case(0, (1 << 29) + 1)]
    #[case(1 << 29, 1 << 30)]
    fn test_compute_bin_rejects(ucsc: BinScheme, #[case] start: u32, #[case] end: u32) {
        let err = ucsc.compute_bin(start, end).unwrap_err();
        assert!(matches!(err, BinSchemeError::InvalidInterval { .. }));
        // planning validates identically
        assert!(ucsc.overlap_ranges(start, end).is_err());
    }

    #[rstest]
    fn test_compute_bin_is_deterministic(ucsc: BinScheme) {
        for (start, end) in [(0u32, 1000u32), (100_000, 300_000), (7, 8)] {
            assert_eq!(
                ucsc.compute_bin(start, end).unwrap(),
                ucsc.compute_bin(start, end).unwrap()
            );
            assert_eq!(
                ucsc.overlap_ranges(start, end).unwrap(),
                ucsc.overlap_ranges(start, end).unwrap()
            );
        }
    }

    #[rstest]
    fn test_finest_qualifying_tier_wins(ucsc: BinScheme) {
        // fits cell 1 of the finest tier, so no coarser tier may be chosen
        // even though those cells contain it too
        let bin = ucsc.compute_bin(1 << 17, (1 << 17) + 100).unwrap();
        assert_eq!(bin, 585 + 1);

        // every interval's bin is at least the offset of the finest tier
        // that contains it in one cell
        for width_log2 in [0u32, 10, 16] {
            let start = 12_345u32;
            let bin = ucsc.compute_bin(start, start + (1 << width_log2)).unwrap();
            assert!(bin >= 585, "narrow interval assigned to a coarse tier");
        }
    }

    #[rstest]
    fn test_overlap_ranges_worked_example(ucsc: BinScheme) {
        let ranges = ucsc.overlap_ranges(0, 1000).unwrap();
        assert_eq!(
            ranges,
            vec![
                BinRange { lo: 585, hi: 585 },
                BinRange { lo: 73, hi: 73 },
                BinRange { lo: 9, hi: 9 },
                BinRange { lo: 1, hi: 1 },
                BinRange { lo: 0, hi: 0 },
            ]
        );
    }

    #[rstest]
    fn test_plan_covers_own_bin(ucsc: BinScheme) {
        // self-consistency: an interval must match a query for its own
        // coordinates
        let cases = [
            (0u32, 1000u32),
            (100_000, 300_000),
            (131_071, 131_073),
            (0, 1 << 29),
            ((1 << 29) - 1, 1 << 29),
        ];
        for (start, end) in cases {
            let bin = ucsc.compute_bin(start, end).unwrap();
            let plan = ucsc.plan(start, end).unwrap();
            assert!(
                plan.covers_bin(bin),
                "bin {} for [{}, {}) not covered by its own plan",
                bin,
                start,
                end
            );
        }
    }

    #[rstest]
    fn test_custom_two_tier_geometry() {
        // finest cells of 2^10, one coarser catch-all of 2^13: 8 fine cells
        let scheme = BinScheme::new(10, 3, vec![1, 0]).unwrap();
        assert_eq!(scheme.max_coord(), 1 << 13);
        assert_eq!(scheme.compute_bin(0, 1024).unwrap(), 1);
        assert_eq!(scheme.compute_bin(1024, 2048).unwrap(), 2);
        assert_eq!(scheme.compute_bin(1000, 2000).unwrap(), 0);
    }

    #[rstest]
    #[case(17, 3, vec![])]
    #[case(17, 3, vec![585, 73, 9, 1, 1])] // coarsest offset must be 0
    #[case(17, 3, vec![584, 73, 9, 1, 0])] // tier 0 offset too small
    #[case(0, 3, vec![1, 0])]
    #[case(17, 0, vec![1, 0])]
    #[case(17, 4, vec![585, 73, 9, 1, 0])] // total shift 33 overflows u32
    fn test_invalid_geometries(
        #[case] shift_first: u32,
        #[case] shift_next: u32,
        #[case] offsets: Vec<u32>,
    ) {
        let err = BinScheme::new(shift_first, shift_next, offsets).unwrap_err();
        assert!(matches!(err, BinSchemeError::InvalidGeometry(_)));
    }
}
