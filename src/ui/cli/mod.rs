// Mon Oct 19 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, CheckArgs, Command};
pub use handler::{exit_code, CommandHandler, EXIT_COMPATIBLE, EXIT_ERROR, EXIT_INCOMPATIBLE};

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<i32> {
    let args = parse_args();
    let handler = CommandHandler::new();
    handler.execute(args)
}
