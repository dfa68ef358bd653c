use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represent a range from [start, end)
/// Inclusive of start, exclusive of end
///
/// Coordinates are `u32`, which comfortably covers genomic coordinate
/// space: the bin schemes built on top of this type bound coordinates at
/// `2^29` anyway (see `hierbin-index`).
#[derive(Eq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T>
where
    T: Eq + Clone + Send + Sync,
{
    pub start: u32,
    pub end: u32,
    pub val: T,
}

impl<T> Interval<T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Check if this interval overlaps the query range `[start, end)`.
    #[inline]
    pub fn overlap(&self, start: u32, end: u32) -> bool {
        self.start < end && self.end > start
    }

    /// Compute the number of overlapping positions between two intervals.
    #[inline]
    pub fn intersect(&self, other: &Interval<T>) -> u32 {
        std::cmp::min(self.end, other.end)
            .checked_sub(std::cmp::max(self.start, other.start))
            .unwrap_or(0)
    }

    /// Number of positions covered by this interval.
    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

impl<T> Ord for Interval<T>
where
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn cmp(&self, other: &Interval<T>) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Less => Ordering::Less,
            Ordering::Greater => Ordering::Greater,
            Ordering::Equal => self.end.cmp(&other.end),
        }
    }
}

impl<T> PartialOrd for Interval<T>
where
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Interval<T>
where
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}
