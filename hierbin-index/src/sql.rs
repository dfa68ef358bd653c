//! Render an [`OverlapPlan`] as a SQL `WHERE` fragment.
//!
//! This is the query-building collaborator for relational backends: the
//! planner stays a pure data producer and this module owns the translation
//! to filter syntax. No database driver is involved; the output is plain
//! text the caller splices into its own statement against a table that
//! stores the bin computed at insert time in an indexed integer column.

use std::fmt::Write;

use crate::plan::OverlapPlan;

/// Column names to use in a generated fragment.
///
/// Defaults match the conventional `bin`/`start`/`end` trio; genome
/// browser tables tend to use `chromStart`/`chromEnd` instead.
#[derive(Debug, Clone)]
pub struct SqlColumns {
    pub bin: String,
    pub start: String,
    pub end: String,
}

impl Default for SqlColumns {
    fn default() -> Self {
        SqlColumns {
            bin: "bin".to_string(),
            start: "start".to_string(),
            end: "end".to_string(),
        }
    }
}

/// Render the combined overlap predicate for `plan`:
///
/// ```text
/// (bin = 585 OR bin = 73 OR ... OR bin BETWEEN 9 AND 12) AND start < qEnd AND end > qStart
/// ```
///
/// Single-bin ranges render as equality, wider ones as `BETWEEN`. The bin
/// disjunction is the pre-filter the backend can satisfy from its bin
/// index; the trailing coordinate comparisons are the exact filter and
/// are always emitted.
///
/// # Examples
///
/// ```
/// use hierbin_index::{BinScheme, sql::{SqlColumns, overlap_where_clause}};
///
/// let plan = BinScheme::ucsc().plan(0, 1000).unwrap();
/// let clause = overlap_where_clause(&plan, &SqlColumns::default());
/// assert_eq!(
///     clause,
///     "(bin = 585 OR bin = 73 OR bin = 9 OR bin = 1 OR bin = 0) AND start < 1000 AND end > 0"
/// );
/// ```
pub fn overlap_where_clause(plan: &OverlapPlan, cols: &SqlColumns) -> String {
    let mut clause = String::from("(");

    for (i, range) in plan.iter().enumerate() {
        if i > 0 {
            clause.push_str(" OR ");
        }
        if range.lo == range.hi {
            write!(clause, "{} = {}", cols.bin, range.lo).unwrap();
        } else {
            write!(clause, "{} BETWEEN {} AND {}", cols.bin, range.lo, range.hi).unwrap();
        }
    }

    write!(
        clause,
        ") AND {} < {} AND {} > {}",
        cols.start, plan.q_end, cols.end, plan.q_start
    )
    .unwrap();

    clause
}
