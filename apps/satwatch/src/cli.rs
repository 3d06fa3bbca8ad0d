use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use sw_core::{DistanceUnit, GeoPoint};
use sw_feed::FeedKind;

use crate::config::{AppConfig, StoreKind};

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// JSON config file.  Flags and environment variables override it.
    #[arg(long, short, env = "SATWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Great-circle distance between two points.
    #[command(alias = "dist")]
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,

        /// km, mi, or m.
        #[arg(long, short, default_value = "km")]
        unit: DistanceUnit,
    },

    /// Poll the station position, store it, and alert on close passes.
    Track(TrackArgs),

    /// List stored positions (or sightings), newest first.
    History(HistoryArgs),

    /// Decode a saved feed response and print it as JSON.
    Parse {
        /// Which feed the body came from.
        #[arg(long, default_value = "primary")]
        kind: FeedKind,

        file: PathBuf,
    },
}

#[derive(Args)]
pub struct TrackArgs {
    /// Stop after this many polls.
    #[arg(long, env = "SATWATCH_POLLS")]
    pub polls: Option<u64>,

    /// Seconds between polls.
    #[arg(long, env = "SATWATCH_INTERVAL_SECS")]
    pub interval_secs: Option<u32>,

    /// Use the built-in ground-track model instead of the public feeds.
    #[arg(long)]
    pub offline: bool,

    /// Do not wait between polls; simulate the time instead.
    #[arg(long)]
    pub no_wait: bool,

    /// Do not check for close passes.
    #[arg(long)]
    pub no_alerts: bool,

    #[command(flatten)]
    pub home: HomeArgs,

    /// Alert radius around home, km.
    #[arg(long, env = "SATWATCH_RADIUS_KM")]
    pub radius_km: Option<f64>,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// How many rows to show.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub limit: usize,

    /// Show recorded sightings instead of positions.
    #[arg(long)]
    pub sightings: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub home: HomeArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

// `history` adds a distance column when both are set; `track` also takes
// either one alone.
#[derive(Args)]
pub struct HomeArgs {
    #[arg(long, env = "SATWATCH_HOME_LAT", allow_negative_numbers = true)]
    pub home_lat: Option<f64>,

    #[arg(long, env = "SATWATCH_HOME_LON", allow_negative_numbers = true)]
    pub home_lon: Option<f64>,
}

impl HomeArgs {
    /// Both coordinates, if both were given.  One without the other is an
    /// error.
    pub fn point(&self) -> Result<Option<GeoPoint>> {
        match (self.home_lat, self.home_lon) {
            (Some(lat), Some(lon)) => Ok(Some(GeoPoint::new(lat, lon))),
            (None, None) => Ok(None),
            _ => bail!("--home-lat and --home-lon must be given together"),
        }
    }
}

#[derive(Args)]
pub struct StoreArgs {
    /// Where positions and sightings are kept.
    #[arg(long, value_enum, env = "SATWATCH_STORE")]
    pub store: Option<StoreKind>,

    /// Directory for the CSV files or the database.
    #[arg(long, env = "SATWATCH_OUT")]
    pub out: Option<PathBuf>,
}

impl StoreArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(kind) = self.store {
            config.store = kind;
        }
        if let Some(out) = &self.out {
            config.out_dir.clone_from(out);
        }
    }
}

impl TrackArgs {
    /// Fold the flags into `config`.  Home coordinates given singly replace
    /// only that axis.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(n) = self.polls {
            config.poll.total_polls = Some(n);
        }
        if let Some(secs) = self.interval_secs {
            config.poll.interval_secs = secs;
        }
        if let Some(lat) = self.home.home_lat {
            config.alert.home.lat = lat;
        }
        if let Some(lon) = self.home.home_lon {
            config.alert.home.lon = lon;
        }
        if let Some(r) = self.radius_km {
            config.alert.radius_km = r;
        }
        if self.no_alerts {
            config.alerts_enabled = false;
        }
        self.store.apply(config);
    }
}
