//! One contact event: the students sharing an active roster at a tick.

use std::collections::BTreeSet;

use campus_core::{RosterId, StudentId, Tick};
use campus_schedule::{MeetingTime, Roster};

/// Borrowed view of an active roster, valid for one `on_contact` call.
#[derive(Copy, Clone, Debug)]
pub struct ContactEvent<'a> {
    pub tick:     Tick,
    pub roster:   &'a RosterId,
    pub meeting:  &'a MeetingTime,
    /// Every enrolled student, ascending by ID.
    pub students: &'a BTreeSet<StudentId>,
}

impl<'a> ContactEvent<'a> {
    pub fn from_roster(tick: Tick, roster: &'a Roster) -> Self {
        Self {
            tick,
            roster:   roster.id(),
            meeting:  roster.meeting(),
            students: roster.enrolled(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
