//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time_ms = start_unix_ms + tick * tick_duration_ms
//!
//! Using an integer tick as the canonical time unit means all throttle and
//! cooldown arithmetic is exact (no floating-point drift) and comparisons
//! are O(1).
//!
//! The default tick duration is 50 ms (20 simulation steps per second) —
//! fine enough that a vehicle at urban speed moves well under a car length
//! per tick.  Applications that want a coarser or finer step set
//! `tick_duration_ms`; the rest of the framework only consumes `dt_secs()`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 20 ticks/second a u64 lasts ~29
/// billion years, far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and wall-clock time.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp in milliseconds of tick 0.
    pub start_unix_ms: i64,
    /// How many milliseconds one tick represents.  Default: 50.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_ms` with the given resolution.
    pub fn new(start_unix_ms: i64, tick_duration_ms: u32) -> Self {
        Self {
            start_unix_ms,
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// The fixed integration step in seconds.
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        self.tick_duration_ms as f32 / 1_000.0
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_ms as f64 / 1_000.0
    }

    /// Unix timestamp in milliseconds corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_ms(&self) -> i64 {
        self.start_unix_ms + self.current_tick.0 as i64 * self.tick_duration_ms as i64
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` seconds? (rounds up — a timer never fires
    /// early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        ((secs * 1_000.0) / self.tick_duration_ms as f32).ceil() as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp in milliseconds for tick 0.
    pub start_unix_ms: i64,

    /// Milliseconds per tick.  Default: 50 (20 steps/second).
    pub tick_duration_ms: u32,

    /// Total ticks to simulate.  For 10 minutes at 50 ms/tick: 12,000.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Write output every N ticks.  0 disables snapshots entirely;
    /// 1 = every tick; 20 = once per simulated second at 50 ms ticks.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_ms:         0,
            tick_duration_ms:      50,
            total_ticks:           12_000,
            seed:                  0,
            output_interval_ticks: 20,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_ms, self.tick_duration_ms)
    }
}
