//! satwatch: track the International Space Station from the command line.
//!
//! ```text
//! satwatch distance 40.7128 -74.0060 51.5074 -0.1278 --unit mi
//! satwatch track --offline --polls 20 --no-wait --home-lat 33.749 --home-lon -84.388
//! satwatch history --limit 10 --home-lat 33.749 --home-lon -84.388
//! satwatch parse --kind fallback saved-response.json
//! ```

mod cli;
mod commands;
mod config;
mod logging;


use anyhow::Result;
use clap::Parser;
use sw_core::GeoPoint;

use cli::{Cli, Command};
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;
    print!("{}", run(cli)?);
    Ok(())
}

/// Run one command and return what it prints.  Only `track` and `history`
/// read the config file.
fn run(cli: Cli) -> Result<String> {
    let output = match cli.command {
        Command::Distance { lat1, lon1, lat2, lon2, unit } => {
            let line = commands::distance(GeoPoint::new(lat1, lon1), GeoPoint::new(lat2, lon2), unit)?;
            format!("{line}\n")
        }
        Command::Track(args) => {
            commands::track(AppConfig::load(cli.config.as_deref())?, &args)?;
            String::new()
        }
        Command::History(args) => commands::history(AppConfig::load(cli.config.as_deref())?, &args)?,
        Command::Parse { kind, file } => format!("{}\n", commands::parse(kind, &file)?),
    };
    Ok(output)
}
