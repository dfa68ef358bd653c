use clap::{Command, arg};

pub const BIN_CMD: &str = "bin";
pub const PLAN_CMD: &str = "plan";

pub fn create_bin_cli() -> Command {
    Command::new(BIN_CMD)
        .about("Compute the bin for an interval")
        .arg_required_else_help(true)
        .arg(arg!(<region> "The interval, as chr:start-end (chr may be anything)"))
}

pub fn create_plan_cli() -> Command {
    Command::new(PLAN_CMD)
        .about("Print the bin ranges an overlap query must scan")
        .arg_required_else_help(true)
        .arg(arg!(<region> "The query interval, as chr:start-end"))
        .arg(arg!(--sql "Print the plan as a SQL WHERE fragment instead"))
}
