//! Exponential-backoff retry and the `Sleeper` abstraction.
//!
//! Attempt `k` (0-based) that fails is followed by a pause of
//! `base_delay_ms × 2^k`, stretched by up to `jitter × 100 %` when jitter is
//! enabled.  No pause follows the final attempt.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sw_core::{Timestamp, WallClock};
use tracing::warn;

use crate::{FeedError, FeedResult};

/// Retry configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first.  Values below 1 are treated as 1.
    pub attempts:      u32,
    /// Pause after the first failure.
    pub base_delay_ms: u64,
    /// Random stretch applied to each pause, in `[0, 1]`.  0 disables it.
    pub jitter:        f64,
    /// Seed for the jitter RNG so runs are reproducible.
    pub seed:          u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3, base_delay_ms: 1_000, jitter: 0.0, seed: 0 }
    }
}

impl RetryPolicy {
    /// A policy that tries once and never waits.
    pub fn once() -> Self {
        Self { attempts: 1, ..Self::default() }
    }

    #[inline]
    fn attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    /// Pause before attempt `attempt + 1`, without jitter.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Pause before attempt `attempt + 1`, with jitter drawn from `rng`.
    pub fn delay(&self, attempt: u32, rng: &mut SmallRng) -> Duration {
        let base = self.base_delay(attempt);
        let jitter = self.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 {
            return base;
        }
        base.mul_f64(1.0 + jitter * rng.gen_range(0.0..1.0))
    }

    /// Build the RNG used for jitter.
    pub fn make_rng(&self) -> SmallRng {
        SmallRng::seed_from_u64(self.seed)
    }

    /// Run `op` until it succeeds or the attempts are used up.
    ///
    /// `op` receives the 0-based attempt number.  On exhaustion the last
    /// error is wrapped in [`FeedError::RetriesExhausted`].
    pub fn run<T>(
        &self,
        source_name: &str,
        sleeper:     &mut dyn Sleeper,
        rng:         &mut SmallRng,
        mut op:      impl FnMut(u32) -> FeedResult<T>,
    ) -> FeedResult<T> {
        let attempts = self.attempts();
        let mut attempt = 0;
        loop {
            match op(attempt) {
                Ok(v) => return Ok(v),
                Err(e) if attempt + 1 >= attempts => {
                    return Err(FeedError::RetriesExhausted {
                        source_name: source_name.to_owned(),
                        attempts,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let pause = self.delay(attempt, rng);
                    warn!(source = source_name, attempt = attempt + 1, ?pause, "fetch failed: {e}");
                    sleeper.sleep(pause);
                    attempt += 1;
                }
            }
        }
    }
}

// ── Sleeper ───────────────────────────────────────────────────────────────────

/// Blocks the current thread for a while.  Swapped out in tests.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps with `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Returns immediately and remembers every requested pause.
#[derive(Debug, Default, Clone)]
pub struct NoSleep {
    pub requested: Vec<Duration>,
}

impl Sleeper for NoSleep {
    fn sleep(&mut self, duration: Duration) {
        self.requested.push(duration);
    }
}

/// A clock that only moves when something sleeps on it.
///
/// Clones share the same time, so one copy can pace a tracker while another
/// serves as its [`WallClock`].  Sub-second pauses accumulate in
/// milliseconds.
#[derive(Debug, Clone)]
pub struct SimulatedTime {
    millis: Arc<AtomicI64>,
}

impl SimulatedTime {
    pub fn starting_at(start: Timestamp) -> Self {
        Self { millis: Arc::new(AtomicI64::new(start.0.saturating_mul(1_000))) }
    }

    /// Move the clock forward without sleeping on it.
    pub fn advance(&self, duration: Duration) {
        let ms = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Sleeper for SimulatedTime {
    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

impl WallClock for SimulatedTime {
    fn now(&self) -> Timestamp {
        Timestamp(self.millis.load(Ordering::SeqCst).div_euclid(1_000))
    }
}
