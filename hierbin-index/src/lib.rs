//! Hierarchical bin indexing for genomic interval overlap queries.
//!
//! This crate implements the classic UCSC-style "bin" scheme: every stored
//! interval is tagged with the integer bin of the smallest tier cell that
//! fully contains it, and an overlap query is answered by scanning a small
//! set of bin ranges (one per tier) plus an exact coordinate filter. The
//! bin test is a pre-filter: necessary, never sufficient, so the exact
//! filter is always applied on top of it.
//!
//! It is part of the [hierbin](https://github.com/databio/hierbin) project,
//! which provides bin-indexed storage helpers for genomic interval data.
//!
//! ## Quick Start
//!
//! ```rust
//! use hierbin_index::{BinScheme, BinnedIndex, Interval};
//!
//! let scheme = BinScheme::ucsc();
//!
//! // the insert path: compute a bin per stored interval
//! let bin = scheme.compute_bin(100_000, 300_000).unwrap();
//! assert_eq!(bin, 73);
//!
//! // the query path: one bin range per tier, finest to coarsest
//! let plan = scheme.plan(0, 1000).unwrap();
//! assert!(plan.covers_bin(585));
//!
//! // or let the in-memory backend drive both paths
//! let index = BinnedIndex::build(
//!     scheme,
//!     vec![
//!         Interval { start: 1000u32, end: 2000, val: "BRCA1" },
//!         Interval { start: 3000, end: 4000, val: "TP53" },
//!     ],
//! )
//! .unwrap();
//! let overlaps = index.find(1500, 3500).unwrap();
//! assert_eq!(overlaps.len(), 2);
//! ```
//!
//! ## Guarantees
//!
//! - **No false negatives**: every stored interval overlapping a query falls
//!   in at least one planned bin range.
//! - **Pure planning**: [`BinScheme::compute_bin`] and [`BinScheme::plan`]
//!   are deterministic, hold no mutable state, and are safe to call from any
//!   number of threads.
//! - **One geometry per dataset**: the tier geometry is immutable once a
//!   [`BinScheme`] is constructed, so the insert path and the query path of
//!   a dataset cannot silently disagree.

/// Tier geometry and bin assignment.
///
/// See [`BinScheme`] for details.
pub mod scheme;

/// Overlap query plans.
///
/// See [`OverlapPlan`] for details.
pub mod plan;

/// In-memory bin-indexed storage backend.
///
/// See [`BinnedIndex`] for details.
pub mod store;

/// Genome-wide indexing across chromosomes.
///
/// See the [`multi_chrom`] module for details.
pub mod multi_chrom;

/// SQL fragment generation for relational backends.
///
/// See [`sql::overlap_where_clause`] for details.
pub mod sql;

// re-exports
pub use self::multi_chrom::MultiChromBinIndex;
pub use self::plan::{BinRange, OverlapPlan};
pub use self::scheme::{BinScheme, BinSchemeError};
pub use self::store::BinnedIndex;

pub use hierbin_core::models::Interval;
