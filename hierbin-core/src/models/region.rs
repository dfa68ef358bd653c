use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::RegionError;

///
/// Region struct, representation of one named-sequence interval,
/// e.g. one line of a BED-like file.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Option<String>,
}

impl Region {
    ///
    /// Get length of the region
    ///
    /// A hand-built `Region` with `end < start` is a caller bug; parsing
    /// and indexing validate bounds before they get here.
    ///
    pub fn width(&self) -> u32 {
        debug_assert!(self.end >= self.start, "inverted region {}", self);
        self.end - self.start
    }

    ///
    /// Get tab-separated string of Region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

impl FromStr for Region {
    type Err = RegionError;

    ///
    /// Parse a `chr:start-end` string into a [Region].
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RegionError::RegionParseError(s.to_string());

        let (chr, range) = s.rsplit_once(':').ok_or_else(err)?;
        let (start, end) = range.split_once('-').ok_or_else(err)?;

        if chr.is_empty() {
            return Err(err());
        }

        let start: u32 = start.replace(',', "").parse().map_err(|_| err())?;
        let end: u32 = end.replace(',', "").parse().map_err(|_| err())?;

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            rest: None,
        })
    }
}
