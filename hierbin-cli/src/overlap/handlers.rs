use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;
use log::info;

use hierbin_core::models::RegionSet;
use hierbin_index::BinScheme;
use hierbin_index::multi_chrom::IntoMultiChromBinIndex;

pub fn run_overlap(matches: &ArgMatches) -> Result<()> {
    let query_file = matches
        .get_one::<String>("query")
        .expect("A path to a query file is required.");

    let universe_file = matches
        .get_one::<String>("universe")
        .expect("A path to a universe file is required.");

    let universe = RegionSet::try_from(Path::new(universe_file))?;
    info!(
        "indexing {} universe intervals from {}",
        universe.len(),
        universe_file
    );
    let index = universe.into_multi_chrom_bin_index(BinScheme::ucsc())?;

    let queries = RegionSet::try_from(Path::new(query_file))?;
    info!("scanning {} query intervals", queries.len());

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    for (chr, interval) in index.find_overlaps_iter(&queries)? {
        match &interval.val {
            Some(rest) => writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                chr, interval.start, interval.end, rest
            )?,
            None => writeln!(writer, "{}\t{}\t{}", chr, interval.start, interval.end)?,
        }
    }

    writer.flush()?;
    Ok(())
}
