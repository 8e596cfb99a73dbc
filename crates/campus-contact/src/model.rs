//! The `TransmissionModel` trait — the main extension point for user code.

use campus_core::{SimRng, Tick};
use campus_schedule::HealthWriter;

use crate::ContactEvent;

/// Pluggable transmission model.
///
/// The tick driver calls [`on_contact`][Self::on_contact] once for every
/// roster in session, in roster schedule order, then
/// [`on_tick_end`][Self::on_tick_end] once.  Calls are sequential; a model may
/// keep mutable state of its own.
///
/// # Contract
///
/// - Must be deterministic given the same `rng` state.
/// - Must not block or perform I/O.
/// - Health is the only simulation state it may change.
///
/// # Example
///
/// ```rust,ignore
/// struct OneInTen;
///
/// impl TransmissionModel for OneInTen {
///     fn on_contact(&mut self, event: &ContactEvent<'_>, health: &mut HealthWriter<'_>, rng: &mut SimRng) {
///         let exposed = event.students.iter().any(|&s| health.is_sick(s));
///         if !exposed { return; }
///         for &s in event.students {
///             if rng.gen_bool(0.1) { health.set_sick(s, true); }
///         }
///     }
/// }
/// ```
pub trait TransmissionModel {
    /// Called once per active roster per tick.
    fn on_contact(
        &mut self,
        event:  &ContactEvent<'_>,
        health: &mut HealthWriter<'_>,
        rng:    &mut SimRng,
    );

    /// Called once after every active roster of `tick` has been visited.
    ///
    /// Default: does nothing.
    fn on_tick_end(
        &mut self,
        _tick:   Tick,
        _health: &mut HealthWriter<'_>,
        _rng:    &mut SimRng,
    ) {
    }
}

impl<M: TransmissionModel + ?Sized> TransmissionModel for &mut M {
    fn on_contact(&mut self, event: &ContactEvent<'_>, health: &mut HealthWriter<'_>, rng: &mut SimRng) {
        (**self).on_contact(event, health, rng);
    }

    fn on_tick_end(&mut self, tick: Tick, health: &mut HealthWriter<'_>, rng: &mut SimRng) {
        (**self).on_tick_end(tick, health, rng);
    }
}
