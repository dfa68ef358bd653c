/// An inclusive range `[lo, hi]` of bin values to scan at one tier.
///
/// Produced by [`BinScheme::overlap_ranges`](crate::BinScheme::overlap_ranges);
/// a full query plan carries one of these per tier, finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub lo: u32,
    pub hi: u32,
}

impl BinRange {
    /// Check whether `bin` falls inside this range.
    #[inline]
    pub fn contains(&self, bin: u32) -> bool {
        self.lo <= bin && bin <= self.hi
    }

    /// Number of bin values the range covers.
    #[inline]
    pub fn width(&self) -> u32 {
        self.hi - self.lo + 1
    }
}

/// The full plan for one overlap query: the per-tier bin ranges plus the
/// query bounds for the exact post-filter.
///
/// A plan is ephemeral. It is computed fresh per query by
/// [`BinScheme::plan`](crate::BinScheme::plan), handed to whatever backend
/// executes the scan, and dropped. The two halves of the combined overlap
/// predicate are exposed separately: [`covers_bin`](Self::covers_bin) is
/// the coarse pre-filter and [`matches`](Self::matches) is the exact,
/// authoritative test. A backend must apply both.
///
/// # Examples
///
/// ```
/// use hierbin_index::BinScheme;
///
/// let scheme = BinScheme::ucsc();
/// let plan = scheme.plan(0, 1000).unwrap();
///
/// let bin = scheme.compute_bin(500, 600).unwrap();
/// assert!(plan.covers_bin(bin));
/// assert!(plan.matches(500, 600));
///
/// // bin coverage alone is not overlap: this interval shares the first
/// // 128 kb cell with the query but does not intersect it
/// let bin = scheme.compute_bin(2000, 3000).unwrap();
/// assert!(plan.covers_bin(bin));
/// assert!(!plan.matches(2000, 3000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapPlan {
    /// One inclusive bin range per tier, finest to coarsest.
    pub ranges: Vec<BinRange>,
    /// Query start, needed for the exact post-filter.
    pub q_start: u32,
    /// Query end (exclusive), needed for the exact post-filter.
    pub q_end: u32,
}

impl OverlapPlan {
    /// The coarse pre-filter: whether a stored bin value falls in any
    /// planned range. Necessary but not sufficient for overlap.
    #[inline]
    pub fn covers_bin(&self, bin: u32) -> bool {
        self.ranges.iter().any(|r| r.contains(bin))
    }

    /// The exact post-filter: whether a stored interval's true bounds
    /// overlap the query.
    #[inline]
    pub fn matches(&self, start: u32, end: u32) -> bool {
        start < self.q_end && end > self.q_start
    }

    /// Iterate the planned ranges, finest tier first.
    pub fn iter(&self) -> std::slice::Iter<'_, BinRange> {
        self.ranges.iter()
    }
}

impl<'a> IntoIterator for &'a OverlapPlan {
    type Item = &'a BinRange;
    type IntoIter = std::slice::Iter<'a, BinRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
