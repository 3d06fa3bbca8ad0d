//! `sw-tracker`: the poll loop that ties feed, store, and alerts together.
//!
//! # Poll loop
//!
//! ```text
//! for poll in 0..config.total_polls (or forever):
//!   ① Fetch   : PositionSource::fetch(wall-clock time at poll start)
//!                 error → observer.on_poll_error, next poll
//!   ② Store   : RecordStore::insert_position, PositionHistory::push
//!                 (cache replays skip this and ③)
//!   ③ Alert   : ProximityMonitor::evaluate
//!                 Notified → RecordStore::insert_sighting
//!   ④ Wait    : one interval, except after the last poll
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_feed::GroundTrackSource;
//! use sw_store::MemoryStore;
//! use sw_tracker::{LogObserver, TrackerBuilder};
//!
//! let mut tracker = TrackerBuilder::new(config, GroundTrackSource::default(), MemoryStore::new())
//!     .build()?;
//! tracker.run(&mut LogObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod history;
pub mod observer;
pub mod tracker;


pub use builder::TrackerBuilder;
pub use error::{TrackerError, TrackerResult};
pub use history::PositionHistory;
pub use observer::{LogObserver, NoopObserver, TrackerObserver, TrackerStats};
pub use tracker::{BoxedMonitor, Tracker};
