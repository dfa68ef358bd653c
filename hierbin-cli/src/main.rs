mod binner;
mod overlap;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use env_logger::{Builder, Target};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "hierbin";
    pub const BIN_NAME: &str = "hierbin";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Hierarchical bin indexing for genomic intervals: assign bins, plan overlap queries, and run bin-indexed overlap scans.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Logging verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(binner::cli::create_bin_cli())
        .subcommand(binner::cli::create_plan_cli())
        .subcommand(overlap::cli::create_overlap_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    // set the logging level
    let min_log_level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .target(Target::Stderr)
        .filter(None, min_log_level)
        .init();

    match matches.subcommand() {
        //
        // BIN ASSIGNMENT
        //
        Some((binner::cli::BIN_CMD, matches)) => {
            binner::handlers::run_bin(matches)?;
        }

        //
        // QUERY PLANNING
        //
        Some((binner::cli::PLAN_CMD, matches)) => {
            binner::handlers::run_plan(matches)?;
        }

        //
        // OVERLAP SCAN
        //
        Some((overlap::cli::OVERLAP_CMD, matches)) => {
            overlap::handlers::run_overlap(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
