//! `sw-store`: persistence for observed positions and notified sightings.
//!
//! | Feature   | Backend     | Files created                             |
//! |-----------|-------------|-------------------------------------------|
//! | *(none)*  | Memory      | none                                      |
//! | *(none)*  | CSV         | `iss_locations.csv`, `my_sightings.csv`   |
//! | `sqlite`  | SQLite      | `satwatch.db`                             |
//!
//! All backends implement [`RecordStore`].  Reads return newest rows first.

pub mod csv;
pub mod error;
pub mod memory;
pub mod record;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::{PositionRecord, SightingRecord};
pub use store::RecordStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
