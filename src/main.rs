// relaylog - main.rs
// Command-line front end over the file and remote logging facades

use clap::Parser;
use relaylog::cli::{run, Cli};
use std::process::exit;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.diagnostics_level())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("relaylog: {e:#}");
        exit(1);
    }
}
