use sw_alert::AlertError;
use sw_core::CoreError;
use sw_feed::FeedError;
use sw_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("position feed: {0}")]
    Feed(#[from] FeedError),

    #[error("record store: {0}")]
    Store(#[from] StoreError),

    #[error("proximity alert: {0}")]
    Alert(#[from] AlertError),
}

impl TrackerError {
    /// Feed and alert failures skip one poll; anything else stops the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TrackerError::Config(_) | TrackerError::Store(_))
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
