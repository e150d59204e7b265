use anyhow::Result;
use clap::Parser;

use hotspotconv::cli::{self, Args, CliConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    // Conversion failures are reported on stderr; the process still exits 0
    let cli_config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            cli::handle_error(&e);
            return Ok(());
        }
    };

    cli::run(&cli_config);
    Ok(())
}
