//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter supplied
//! by the host loop.  The mapping to calendar time is held in `SimClock`:
//!
//!   time_at(tick) = start + tick * tick_duration_secs
//!
//! Ticks whose instant falls outside chrono's calendar range have no time
//! and are never in session.
//!
//! The mapping is a pure function of the tick.  `SimClock` holds no "current
//! tick"; the host owns that.  Meeting recurrences plug in through the
//! [`Recurrence`] trait so the clock can answer "is this meeting in session at
//! tick T" without knowing how meetings are encoded.
//!
//! The default tick duration is 3,600 s (1 simulated hour), which lines up
//! exactly with hourly class periods.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 1 s per tick a u64 lasts ~585
/// billion years.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default,
    serde::Serialize, serde::Deserialize,
)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
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

// ── Recurrence ────────────────────────────────────────────────────────────────

/// A recurring calendar pattern that either contains an instant or not.
///
/// Implemented by `campus_schedule::MeetingTime`.
pub trait Recurrence {
    /// `true` if the recurrence is in session at `at`.
    fn contains(&self, at: NaiveDateTime) -> bool;
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to calendar time.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimClock {
    /// Calendar instant of tick 0.
    pub start: NaiveDateTime,
    /// How many simulated seconds one tick represents.  Default: 3600.
    pub tick_duration_secs: u32,
}

impl SimClock {
    /// Create a clock anchored at `start` with the given resolution.
    pub fn new(start: NaiveDateTime, tick_duration_secs: u32) -> Self {
        Self { start, tick_duration_secs }
    }

    /// The reference anchor every run starts from unless configured
    /// otherwise: Tuesday 2015-10-27 00:00:00.
    pub fn default_start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 10, 27)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    /// Elapsed simulated seconds from tick 0 to `tick`, or `None` if that
    /// does not fit in an `i64`.
    #[inline]
    pub fn elapsed_secs(&self, tick: Tick) -> Option<i64> {
        i64::try_from(tick.0)
            .ok()?
            .checked_mul(self.tick_duration_secs as i64)
    }

    /// Calendar instant corresponding to `tick`.
    ///
    /// Fails with [`CoreError::TickOutOfRange`] when the instant lies beyond
    /// the representable calendar.
    pub fn time_at(&self, tick: Tick) -> CoreResult<NaiveDateTime> {
        self.elapsed_secs(tick)
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| self.start.checked_add_signed(delta))
            .ok_or(CoreError::TickOutOfRange(tick))
    }

    /// ISO-8601 rendering of `time_at(tick)`, e.g. `2015-10-27T14:00:00`.
    pub fn format_time(&self, tick: Tick) -> CoreResult<String> {
        Ok(self.time_at(tick)?.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    /// `true` if `recurrence` is in session at `time_at(tick)`.  A tick with
    /// no calendar instant is never in session.
    #[inline]
    pub fn is_active<R: Recurrence + ?Sized>(&self, recurrence: &R, tick: Tick) -> bool {
        self.time_at(tick).is_ok_and(|at| recurrence.contains(at))
    }

    /// Break elapsed time into (day, hour, minute) components from tick 0.
    pub fn elapsed_dhm(&self, tick: Tick) -> (u64, u32, u32) {
        let total_secs = tick.0 as u128 * self.tick_duration_secs as u128;
        let days = u64::try_from(total_secs / 86_400).unwrap_or(u64::MAX);
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(self.tick_duration_secs as u64)
    }

    #[inline]
    pub fn ticks_for_days(&self, days: u64) -> u64 {
        self.ticks_for_secs(days * 86_400)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(Self::default_start(), 3_600)
    }
}
