//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::filter::LevelFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::INFO)
        .init();

    if let Err(err) = waymark_cli::run() {
        eprintln!("waymark: {err}");
        std::process::exit(1);
    }
}
