// Author: Dustin Pilgrim
// License: MIT

use clap::Parser;
use eyre::{Result, WrapErr};

use pausy::{app, cli, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let config = Config::from_args(&args).wrap_err("invalid countdown duration")?;
    config.apply_logging();

    app::session::run(config).await
}
