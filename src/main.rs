extern crate anyhow;
extern crate clap;
#[macro_use]
extern crate prefixcode;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use crate::cli::Cli;
use clap::Parser;
use std::io;

mod cli;

fn main() -> anyhow::Result<()> {
    if_tracing! {{
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }}

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    cli::execute_command(cli, &mut stdout)?;
    Ok(())
}
