mod scansplit;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "bnxtools";
    pub const BIN_NAME: &str = "bnxtools";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Tools for working with molecule data (BNX) from BioNano optical mapping instruments.")
        .subcommand_required(true)
        .subcommand(scansplit::cli::create_scansplit_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SCAN SPLITTING UTIL
        //
        Some((scansplit::cli::SCANSPLIT_CMD, matches)) => {
            scansplit::handlers::run_scansplit(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
