use clap::{Command, arg};

pub const OVERLAP_CMD: &str = "overlap";

pub fn create_overlap_cli() -> Command {
    Command::new(OVERLAP_CMD)
        .about("Report universe intervals overlapping each query interval")
        .arg_required_else_help(true)
        .arg(arg!(-q <query> "Bed-like file of query intervals"))
        .arg(arg!(-u <universe> "Bed-like file of intervals to index and scan"))
}
