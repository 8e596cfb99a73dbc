//! `campus-sim` — schedule construction and the per-tick contact driver.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`builder`]   | `ScheduleBuilder`, `FixtureSpec`, `RosterTemplate`, `PopulationSpec` |
//! | [`schedule`]  | `GlobalSchedule<M>` — the `step(tick)` driver                 |
//! | [`observer`]  | `SimObserver` hooks, `NoopObserver`                           |
//! | [`report`]    | `CampusReport`                                                |
//! | [`error`]     | `SimError`, `SimResult`                                       |
//!
//! # Control flow
//!
//! ```text
//! ScheduleBuilder::build(rng) ──► Campus ──► GlobalSchedule::initialize
//!                                                   │
//!      host loop ──step(tick)──► active rosters ──► TransmissionModel::on_contact
//! ```
//!
//! The host owns the tick loop.  [`GlobalSchedule::run_ticks`] is a minimal
//! loop for tests and demos.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use campus_contact::NoopTransmission;
//! use campus_core::{SimConfig, SimRng, Tick};
//! use campus_sim::{FixtureSpec, GlobalSchedule, NoopObserver, ScheduleBuilder};
//!
//! let config = SimConfig::default();
//! let campus = ScheduleBuilder::fixture(FixtureSpec::bcb100x())
//!     .build(&mut SimRng::new(config.seed))?;
//! let mut schedule = GlobalSchedule::from_config(&config, NoopTransmission)?;
//! schedule.initialize(campus)?;
//! schedule.run_ticks(Tick::ZERO, config.total_ticks, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use builder::{FixtureSpec, PopulationSpec, RosterTemplate, ScheduleBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::CampusReport;
pub use schedule::GlobalSchedule;
