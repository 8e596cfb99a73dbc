//! Driver observer trait for progress reporting and data collection.

use campus_core::Tick;

use crate::CampusReport;

/// Callbacks invoked by
/// [`GlobalSchedule::run_ticks`][crate::GlobalSchedule::run_ticks] at key
/// points in the host loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_report(&mut self, _tick: Tick, report: &CampusReport) {
///         println!("{report}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any contact event.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the number of contact events it
    /// produced.
    fn on_tick_end(&mut self, _tick: Tick, _contact_events: usize) {}

    /// Called at report intervals, after `on_tick_end`.
    fn on_report(&mut self, _tick: Tick, _report: &CampusReport) {}

    /// Called once after the final tick; `final_tick` is one past it.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `run_ticks` but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
