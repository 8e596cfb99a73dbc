//! A no-op transmission model — contacts never change health.

use campus_core::SimRng;
use campus_schedule::HealthWriter;

use crate::{ContactEvent, TransmissionModel};

/// A [`TransmissionModel`] that ignores every contact.
///
/// Useful as a placeholder in tests, or to exercise the schedule alone.
pub struct NoopTransmission;

impl TransmissionModel for NoopTransmission {
    fn on_contact(
        &mut self,
        _event:  &ContactEvent<'_>,
        _health: &mut HealthWriter<'_>,
        _rng:    &mut SimRng,
    ) {
    }
}
