use anyhow::Result;
use clap::ArgMatches;
use log::info;

use hierbin_core::models::Region;
use hierbin_index::BinScheme;
use hierbin_index::sql::{SqlColumns, overlap_where_clause};

fn parse_region_arg(matches: &ArgMatches) -> Result<Region> {
    let region_str = matches
        .get_one::<String>("region")
        .expect("A region is required.");
    let region: Region = region_str.parse()?;
    Ok(region)
}

pub fn run_bin(matches: &ArgMatches) -> Result<()> {
    let region = parse_region_arg(matches)?;
    let scheme = BinScheme::ucsc();

    let bin = scheme.compute_bin(region.start, region.end)?;
    info!("assigned {} to bin {}", region, bin);
    println!("{}", bin);

    Ok(())
}

pub fn run_plan(matches: &ArgMatches) -> Result<()> {
    let region = parse_region_arg(matches)?;
    let scheme = BinScheme::ucsc();

    let plan = scheme.plan(region.start, region.end)?;

    if matches.get_flag("sql") {
        println!("{}", overlap_where_clause(&plan, &SqlColumns::default()));
    } else {
        for range in &plan {
            println!("{}\t{}", range.lo, range.hi);
        }
    }

    Ok(())
}
