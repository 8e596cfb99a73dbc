use std::fmt;

use serde::Serialize;

use campus_core::Tick;

/// Point-in-time summary of a running schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CampusReport {
    pub tick:           Tick,
    /// ISO-8601 wall-clock time of `tick`.
    pub time:           String,
    pub healthy:        usize,
    pub infected:       usize,
    /// Rosters in session at `tick`, including empty ones.
    pub active_rosters: usize,
}

impl CampusReport {
    /// Infected share of the population, `0.0` for an empty campus.
    pub fn infected_fraction(&self) -> f64 {
        let total = self.healthy + self.infected;
        if total == 0 {
            0.0
        } else {
            self.infected as f64 / total as f64
        }
    }
}

impl fmt::Display for CampusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] healthy={} infected={} active_rosters={}",
            self.tick, self.time, self.healthy, self.infected, self.active_rosters
        )
    }
}
