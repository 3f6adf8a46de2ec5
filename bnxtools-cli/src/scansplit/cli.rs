use clap::{Arg, ArgAction, Command, arg};

pub use bnxtools_scansplit::consts::*;

pub fn create_scansplit_cli() -> Command {
    Command::new(SCANSPLIT_CMD)
        .author("Databio")
        .about("Split a BNX file into new BNX files grouped by inferred acquisition scan.")
        .arg(
            Arg::new("bnx")
                .help("Path to the BNX file to split (.bnx or .bnx.gz)")
                .required(true),
        )
        .arg(
            Arg::new("by-scan")
                .long("by-scan")
                .short('s')
                .action(ArgAction::SetTrue)
                .help("Write one BNX file per scan. Incompatible with --scan-range"),
        )
        .arg(arg!(--"scan-range" <RANGES> "Scans to keep in a single output file, e.g. 1-10,15-20"))
        .arg(arg!(--prefix <PREFIX> "Output filename prefix"))
        .arg(arg!(--strategy <STRATEGY> "Scan inference strategy: column or cohort"))
        .arg(
            Arg::new("keep-counts")
                .long("keep-counts")
                .action(ArgAction::SetTrue)
                .help("Copy the molecule-count header line through unmodified"),
        )
}
