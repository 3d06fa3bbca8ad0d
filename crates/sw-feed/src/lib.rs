//! `sw-feed`: where the satellite is, and how we find out.
//!
//! # Sources
//!
//! | Type                 | Behaviour                                          |
//! |----------------------|----------------------------------------------------|
//! | [`ScriptedSource`]   | replays queued results (tests, recorded payloads)  |
//! | [`GroundTrackSource`]| computes a circular-orbit ground track offline     |
//! | [`FailoverFeed`]     | primary with retries → fallback → short cache      |
//! | `HttpSource`         | the public JSON feeds (feature `http`)             |
//!
//! All implement [`PositionSource`].  Payload decoding for both public feeds
//! lives in [`payload`] and is usable without the `http` feature, e.g. for
//! bodies fetched by other means.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `http`  | Enables `HttpSource` (blocking `reqwest`).             |

pub mod error;
pub mod failover;
pub mod ground_track;
pub mod payload;
pub mod position;
pub mod retry;
pub mod source;

#[cfg(feature = "http")]
pub mod http;

#[cfg(test)]
mod tests;

pub use error::{FeedError, FeedResult};
pub use failover::{FailoverConfig, FailoverFeed};
pub use ground_track::{GroundTrackSource, OrbitParams};
pub use payload::{parse_fallback, parse_primary};
pub use position::{FeedKind, SatellitePosition};
pub use retry::{NoSleep, RetryPolicy, SimulatedTime, Sleeper, ThreadSleeper};
pub use source::{PositionSource, ScriptedSource};

#[cfg(feature = "http")]
pub use http::HttpSource;
