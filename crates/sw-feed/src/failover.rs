//! `FailoverFeed`: primary source with retries, fallback source, and a
//! short-lived cache.
//!
//! # Per-fetch decision
//!
//! ```text
//! primary healthy, or health check due?
//!   yes → primary under RetryPolicy
//!           ok   → mark healthy, cache, return
//!           err  → mark unhealthy, note probe time, go to fallback
//!   no  → cached position younger than cache_max_age_secs? → replay it
//!         otherwise go to fallback
//! fallback (single attempt)
//!   ok   → cache, return
//!   err  → fresh cache? replay it : AllSourcesFailed
//! ```

use rand::rngs::SmallRng;
use sw_core::Timestamp;
use tracing::{debug, info, warn};

use crate::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use crate::{FeedError, FeedResult, PositionSource, SatellitePosition};

/// Seconds between primary health probes while it is marked unhealthy.
pub const DEFAULT_HEALTH_CHECK_SECS: i64 = 60;

/// Oldest position the cache may replay, in seconds.
pub const DEFAULT_CACHE_MAX_AGE_SECS: i64 = 5 * 60;

/// Tunables for [`FailoverFeed`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FailoverConfig {
    pub retry:              RetryPolicy,
    pub health_check_secs:  i64,
    pub cache_max_age_secs: i64,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            retry:              RetryPolicy::default(),
            health_check_secs:  DEFAULT_HEALTH_CHECK_SECS,
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
        }
    }
}

/// A [`PositionSource`] combining a primary and a fallback source.
pub struct FailoverFeed<P: PositionSource, F: PositionSource> {
    primary:          P,
    fallback:         F,
    config:           FailoverConfig,
    sleeper:          Box<dyn Sleeper + Send>,
    rng:              SmallRng,
    primary_healthy:  bool,
    last_probe:       Option<Timestamp>,
    cached:           Option<SatellitePosition>,
}

impl<P: PositionSource, F: PositionSource> FailoverFeed<P, F> {
    pub fn new(primary: P, fallback: F, config: FailoverConfig) -> Self {
        let rng = config.retry.make_rng();
        Self {
            primary,
            fallback,
            config,
            sleeper: Box::new(ThreadSleeper),
            rng,
            primary_healthy: true,
            last_probe: None,
            cached: None,
        }
    }

    /// Replace the sleeper used between retries.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + Send + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn primary_healthy(&self) -> bool {
        self.primary_healthy
    }

    pub fn cached(&self) -> Option<&SatellitePosition> {
        self.cached.as_ref()
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    fn probe_due(&self, now: Timestamp) -> bool {
        self.primary_healthy
            || self
                .last_probe
                .is_none_or(|t| now.secs_since(t) >= self.config.health_check_secs)
    }

    fn fresh_cache(&self, now: Timestamp) -> Option<SatellitePosition> {
        self.cached
            .filter(|p| p.age_secs(now) <= self.config.cache_max_age_secs)
            .map(SatellitePosition::replayed)
    }

    fn fetch_primary(&mut self, now: Timestamp) -> FeedResult<SatellitePosition> {
        let Self { primary, config, sleeper, rng, .. } = self;
        let name = primary.name().to_owned();
        config.retry.run(&name, sleeper.as_mut(), rng, |_| primary.fetch(now))
    }
}

impl<P: PositionSource, F: PositionSource> PositionSource for FailoverFeed<P, F> {
    fn name(&self) -> &str {
        "failover"
    }

    fn fetch(&mut self, now: Timestamp) -> FeedResult<SatellitePosition> {
        let primary_err = if self.probe_due(now) {
            match self.fetch_primary(now) {
                Ok(pos) => {
                    if !self.primary_healthy {
                        info!(source = self.primary.name(), "primary source recovered");
                    }
                    self.primary_healthy = true;
                    self.last_probe = Some(now);
                    self.cached = Some(pos);
                    return Ok(pos);
                }
                Err(e) => {
                    warn!(source = self.primary.name(), "primary source unhealthy: {e}");
                    self.primary_healthy = false;
                    self.last_probe = Some(now);
                    e
                }
            }
        } else {
            if let Some(pos) = self.fresh_cache(now) {
                debug!(age_secs = pos.age_secs(now), "replaying cached position");
                return Ok(pos);
            }
            FeedError::PrimaryUnhealthy
        };

        match self.fallback.fetch(now) {
            Ok(pos) => {
                info!(source = self.fallback.name(), "using fallback source");
                self.cached = Some(pos);
                Ok(pos)
            }
            Err(fallback_err) => {
                if let Some(pos) = self.fresh_cache(now) {
                    warn!("all live sources failed; replaying cached position");
                    return Ok(pos);
                }
                Err(FeedError::AllSourcesFailed {
                    primary:  Box::new(primary_err),
                    fallback: Box::new(fallback_err),
                })
            }
        }
    }
}
