use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::RegionError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionSet struct, the representation of an interval region set file,
/// such as a bed file.
///
#[derive(Clone, Debug)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

impl TryFrom<&Path> for RegionSet {
    type Error = anyhow::Error;

    ///
    /// Create a new [RegionSet] from a bed file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk (plain or gzipped).
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;

        let mut new_regions: Vec<Region> = Vec::new();
        let mut header: String = String::new();

        for line in reader.lines() {
            let string_line = line?;

            if string_line.starts_with("browser")
                || string_line.starts_with("track")
                || string_line.starts_with('#')
            {
                header.push_str(&string_line);
                continue;
            }

            let mut fields = string_line.split('\t');

            let chr = fields
                .next()
                .ok_or_else(|| RegionError::RegionParseError(string_line.clone()))?;
            let start: u32 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| RegionError::RegionParseError(string_line.clone()))?;
            let end: u32 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| RegionError::RegionParseError(string_line.clone()))?;

            let rest = fields.collect::<Vec<&str>>().join("\t");

            new_regions.push(Region {
                chr: chr.to_string(),
                start,
                end,
                rest: if rest.is_empty() { None } else { Some(rest) },
            });
        }

        if new_regions.is_empty() {
            return Err(RegionError::EmptyRegionSet(value.display().to_string()).into());
        }

        Ok(RegionSet {
            regions: new_regions,
            header: if header.is_empty() {
                None
            } else {
                Some(header)
            },
            path: Some(value.to_path_buf()),
        })
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl RegionSet {
    /// Number of regions in the set.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Group regions by chromosome name, preserving input order within
    /// each chromosome.
    pub fn by_chromosome(&self) -> HashMap<String, Vec<&Region>> {
        let mut map: HashMap<String, Vec<&Region>> = HashMap::new();
        for region in &self.regions {
            map.entry(region.chr.clone()).or_default().push(region);
        }
        map
    }

    /// Write the set out as a plain bed file.
    pub fn to_bed(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        if let Some(header) = &self.header {
            writeln!(writer, "{}", header)?;
        }
        for region in &self.regions {
            writeln!(writer, "{}", region.as_string())?;
        }
        Ok(())
    }

    pub fn iter(&self) -> RegionSetIterator<'_> {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.region_set.regions.len() {
            let region = &self.region_set.regions[self.index];
            self.index += 1;
            Some(region)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
