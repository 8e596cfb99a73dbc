//! `GlobalSchedule` — the per-tick contact driver.
//!
//! # Lifecycle
//!
//! ```text
//!   new ──► Uninitialized ──initialize(campus)──► Running ──step(t)──► Running …
//!              │    ▲                                 │
//!              └────┘ add_roster                      └─ add_roster allowed only
//!                                                       until the first step
//! ```
//!
//! # One step
//!
//! ```text
//! step(tick):
//!   for roster in schedule order:
//!     if clock.is_active(roster.meeting, tick) and roster is non-empty:
//!       model.on_contact(ContactEvent { tick, roster, students }, health, rng)
//!   model.on_tick_end(tick, health, rng)
//! ```
//!
//! The driver never writes student health itself; the model receives a
//! `HealthWriter` and nothing else mutable.

use tracing::{info, trace};

use campus_contact::{ContactEvent, TransmissionModel};
use campus_core::{CoreError, RosterId, SimClock, SimConfig, SimRng, Tick};
use campus_schedule::{Campus, Roster, ScheduleError};

use crate::{CampusReport, SimError, SimObserver, SimResult};

/// Offset of the driver's RNG stream from the run seed.  The builder uses
/// the root stream.
const DRIVER_STREAM: u64 = 1;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum DriverState {
    Uninitialized,
    Running,
}

pub struct GlobalSchedule<M: TransmissionModel> {
    clock:           SimClock,
    model:           M,
    rng:             SimRng,
    state:           DriverState,
    campus:          Campus,
    /// Roster IDs in schedule order; rebuilt whenever the roster set changes.
    order:           Vec<RosterId>,
    /// Set by the first `step`; no rosters may be added afterwards.
    frozen:          bool,
    report_interval: u64,
}

impl<M: TransmissionModel> GlobalSchedule<M> {
    /// A driver in the `Uninitialized` state with no rosters and periodic
    /// reports disabled.
    pub fn new(clock: SimClock, model: M, rng: SimRng) -> Self {
        Self {
            clock,
            model,
            rng,
            state: DriverState::Uninitialized,
            campus: Campus::new(),
            order: Vec::new(),
            frozen: false,
            report_interval: 0,
        }
    }

    /// A driver whose clock, RNG stream and report interval come from
    /// `config`.
    pub fn from_config(config: &SimConfig, model: M) -> SimResult<Self> {
        config.validate().map_err(|e| SimError::Config(e.to_string()))?;
        let rng = SimRng::new(config.seed).child(DRIVER_STREAM);
        let mut driver = Self::new(config.make_clock(), model, rng);
        driver.report_interval = config.report_interval_ticks;
        Ok(driver)
    }

    /// Report every `ticks` ticks from [`run_ticks`][Self::run_ticks]; `0`
    /// disables periodic reports.
    pub fn with_report_interval(mut self, ticks: u64) -> Self {
        self.report_interval = ticks;
        self
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register one roster.
    ///
    /// Accepted until the first [`step`][Self::step].  A roster added here
    /// has no students unless it came out of a campus, so this is mostly for
    /// placeholder or late-declared meetings.
    pub fn add_roster(&mut self, roster: Roster) -> SimResult<()> {
        if self.frozen {
            return Err(SimError::RosterSetFrozen);
        }
        self.campus.add_roster(roster)?;
        if self.state == DriverState::Running {
            self.reorder();
        }
        Ok(())
    }

    /// Take ownership of the built campus and enter `Running`.
    ///
    /// Rosters registered earlier through `add_roster` are merged in.  An ID
    /// clash fails with `DuplicateRosterId` before anything is merged: the
    /// driver stays uninitialized and keeps its pending rosters.
    pub fn initialize(&mut self, mut campus: Campus) -> SimResult<()> {
        if self.state == DriverState::Running {
            return Err(SimError::AlreadyInitialized);
        }
        if let Some(clash) = self.campus.rosters().find(|r| campus.roster(r.id().as_str()).is_some()) {
            return Err(ScheduleError::DuplicateRosterId(clash.id().clone()).into());
        }
        campus.check_consistency()?;
        for roster in std::mem::take(&mut self.campus).into_rosters() {
            campus.add_roster(roster)?;
        }

        self.campus = campus;
        self.reorder();
        self.state = DriverState::Running;

        let counts = self.campus.health_counts();
        info!(
            students = self.campus.student_count(),
            rosters = self.order.len(),
            infected = counts.infected,
            "schedule initialized"
        );
        Ok(())
    }

    fn reorder(&mut self) {
        self.order = self
            .campus
            .rosters_ordered()
            .into_iter()
            .map(|r| r.id().clone())
            .collect();
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Emit one contact event per active, non-empty roster and return how
    /// many were emitted.  A tick with nothing in session returns `Ok(0)`;
    /// so does a tick too large to map to a calendar instant.
    pub fn step(&mut self, tick: Tick) -> SimResult<usize> {
        if self.state != DriverState::Running {
            return Err(SimError::NotInitialized);
        }
        self.frozen = true;

        let clock = self.clock;
        let (rosters, mut health) = self.campus.rosters_with_health();
        let mut events = 0;
        for id in &self.order {
            let Some(roster) = rosters.get(id) else {
                continue;
            };
            if roster.is_empty() || !clock.is_active(roster.meeting(), tick) {
                continue;
            }
            let event = ContactEvent::from_roster(tick, roster);
            trace!(%tick, roster = %id, students = event.len(), "contact event");
            self.model.on_contact(&event, &mut health, &mut self.rng);
            events += 1;
        }
        self.model.on_tick_end(tick, &mut health, &mut self.rng);
        Ok(events)
    }

    /// Minimal host loop: step ticks `start..start + n`, invoking `observer`
    /// around each tick, and return the tick after the last one stepped.
    ///
    /// Fails up front with `TickOutOfRange` if `start + n` overflows, and at a
    /// report tick whose calendar time is out of range.
    pub fn run_ticks<O: SimObserver>(
        &mut self,
        start:    Tick,
        n:        u64,
        observer: &mut O,
    ) -> SimResult<Tick> {
        let end = start.0.checked_add(n).ok_or(CoreError::TickOutOfRange(start))?;
        for t in start.0..end {
            let tick = Tick(t);
            observer.on_tick_start(tick);
            let events = self.step(tick)?;
            observer.on_tick_end(tick, events);
            if self.report_interval > 0 && t.is_multiple_of(self.report_interval) {
                observer.on_report(tick, &self.report(tick)?);
            }
        }
        observer.on_sim_end(Tick(end));
        Ok(Tick(end))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// IDs of rosters in session at `tick`, in schedule order.  Empty rosters
    /// are included; they simply produce no contact event.
    pub fn active_rosters(&self, tick: Tick) -> Vec<&RosterId> {
        self.order
            .iter()
            .filter(|id| {
                self.campus
                    .roster(id.as_str())
                    .is_some_and(|r| self.clock.is_active(r.meeting(), tick))
            })
            .collect()
    }

    /// A read-only health and activity summary at `tick`.
    pub fn report(&self, tick: Tick) -> SimResult<CampusReport> {
        let counts = self.campus.health_counts();
        Ok(CampusReport {
            tick,
            time: self.clock.format_time(tick)?,
            healthy: counts.healthy,
            infected: counts.infected,
            active_rosters: self.active_rosters(tick).len(),
        })
    }

    pub fn current_time(&self, tick: Tick) -> SimResult<String> {
        Ok(self.clock.format_time(tick)?)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn campus(&self) -> &Campus {
        &self.campus
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }
}
