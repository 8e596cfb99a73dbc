//! Top-level simulation configuration.
//!
//! Loaded from TOML by the host application:
//!
//! ```toml
//! start                 = "2015-10-27T00:00:00"
//! tick_duration_secs    = 3600
//! total_ticks           = 168
//! seed                  = 42
//! report_interval_ticks = 24
//! ```
//!
//! Every field has a default, so an empty document is a valid configuration.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, SimClock, Tick};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Calendar instant of tick 0.
    pub start: NaiveDateTime,

    /// Seconds per tick.  Must be non-zero.  Default: 3600.
    pub tick_duration_secs: u32,

    /// Total ticks the host should drive.  One week at 1 tick/hour: 168.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a report every N ticks.  0 disables periodic reports.
    pub report_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start:                 SimClock::default_start(),
            tick_duration_secs:    3_600,
            total_ticks:           7 * 24,
            seed:                  42,
            report_interval_ticks: 24,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> CoreResult<Self> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(CoreError::Config("tick_duration_secs must be > 0".into()));
        }
        Ok(())
    }

    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// `true` if a report is due at `tick`.
    #[inline]
    pub fn is_report_tick(&self, tick: Tick) -> bool {
        self.report_interval_ticks > 0 && tick.0.is_multiple_of(self.report_interval_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start, self.tick_duration_secs)
    }
}
