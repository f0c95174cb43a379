//! dirhash: concurrent multi-algorithm directory hasher

use std::io;

use clap::Parser;
use dirhash_cli::Cli;
use dirhash_cli::commands::hash;
use dirhash_cli::logging::setup_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let stdout = io::stdout();
    hash::run(&cli, &mut stdout.lock())?;
    Ok(())
}
