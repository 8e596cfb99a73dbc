//! `campus-core` — foundational types for the campus contact simulator.
//!
//! This crate is a dependency of every other `campus-*` crate.  It has no
//! `campus-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StudentId`, `RosterId`                               |
//! | [`time`]        | `Tick`, `SimClock`, `Recurrence`                      |
//! | [`config`]      | `SimConfig` (TOML loading and validation)             |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{RosterId, StudentId};
pub use rng::SimRng;
pub use time::{Recurrence, SimClock, Tick};
