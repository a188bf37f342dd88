//! `meshfmt` command-line tool: convert between OBJ and STL and inspect
//! mesh files.

mod cli;

use clap::Parser;

fn main() {
    let args = cli::Args::parse();

    env_logger::builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    if let Err(e) = cli::exec(args.command) {
        eprintln!("meshfmt: {}", e);
        std::process::exit(1);
    }
}
