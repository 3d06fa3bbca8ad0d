//! `sw-alert`: tells the user when the station passes close to home.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`settings`] | `AlertSettings` (home + radius), `AlertPolicy` (range, cooldown) |
//! | [`notifier`] | `ProximityAlert`, `Notifier` trait, log/recording sinks |
//! | [`monitor`]  | `ProximityMonitor::evaluate` → `AlertOutcome`            |

pub mod error;
pub mod monitor;
pub mod notifier;
pub mod settings;


pub use error::{AlertError, AlertResult};
pub use monitor::{AlertOutcome, ProximityMonitor};
pub use notifier::{LogNotifier, Notifier, ProximityAlert, RecordingNotifier};
pub use settings::{
    AlertPolicy, AlertSettings, DEFAULT_COOLDOWN_SECS, DEFAULT_RADIUS_KM, MAX_RADIUS_KM,
    MIN_RADIUS_KM,
};
