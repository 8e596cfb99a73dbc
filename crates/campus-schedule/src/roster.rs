//! `Roster` — a named, capacity-bounded recurring meeting (a lecture).
//!
//! # Identity and order
//!
//! A roster *is* its [`RosterId`]: `==` compares IDs only.  The ordering used
//! for deterministic iteration is
//!
//! 1. meeting time ([`MeetingTime::schedule_cmp`]),
//! 2. capacity, descending (raw value, so unlimited `0` sorts last),
//! 3. ID, ascending.
//!
//! The final ID tiebreak makes the order total and consistent with `==`.
//!
//! Rosters are created empty.  Students are added only through
//! `Campus::enroll`, which keeps both sides of the membership in step.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use campus_core::{RosterId, StudentId};

use crate::{MeetingTime, Student};

// ── RosterSpec ────────────────────────────────────────────────────────────────

/// The declarative description of a roster, as read from a fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterSpec {
    pub id:       RosterId,
    pub meeting:  MeetingTime,
    /// `0` means unlimited.
    pub capacity: u32,
}

impl RosterSpec {
    pub fn new(id: impl Into<RosterId>, meeting: MeetingTime, capacity: u32) -> Self {
        Self { id: id.into(), meeting, capacity }
    }

    pub fn into_roster(self) -> Roster {
        Roster::with_capacity(self.meeting, self.id, self.capacity)
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Roster {
    id:       RosterId,
    meeting:  MeetingTime,
    capacity: u32,
    enrolled: BTreeSet<StudentId>,
}

impl Roster {
    /// An empty roster with unlimited capacity.
    pub fn new(meeting: MeetingTime, id: impl Into<RosterId>) -> Self {
        Self::with_capacity(meeting, id, 0)
    }

    /// An empty roster holding at most `capacity` students (`0` = unlimited).
    pub fn with_capacity(meeting: MeetingTime, id: impl Into<RosterId>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            meeting,
            capacity,
            enrolled: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &RosterId {
        &self.id
    }

    #[inline]
    pub fn meeting(&self) -> &MeetingTime {
        &self.meeting
    }

    /// Declared capacity; `0` means unlimited.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.capacity == 0
    }

    /// Enrolled students, ascending by ID.
    pub fn enrolled(&self) -> &BTreeSet<StudentId> {
        &self.enrolled
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.enrolled.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.enrolled.is_empty()
    }

    pub fn contains(&self, student: StudentId) -> bool {
        self.enrolled.contains(&student)
    }

    /// `false` for unlimited rosters; otherwise `len() >= capacity`.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.enrolled.len() >= self.capacity as usize
    }

    /// Seats left, or `None` if unlimited.
    pub fn remaining(&self) -> Option<u32> {
        (!self.is_unlimited()).then(|| self.capacity.saturating_sub(self.enrolled.len() as u32))
    }

    pub(crate) fn insert(&mut self, student: StudentId) -> bool {
        self.enrolled.insert(student)
    }

    /// Fraction of enrolled students who are infected.
    ///
    /// Returns `None` for an empty roster: the score of zero students is
    /// undefined, not `0.0`.  `students` is indexed by `StudentId`.
    pub fn sickness_score(&self, students: &[Student]) -> Option<f64> {
        if self.enrolled.is_empty() {
            return None;
        }
        let sick = self
            .enrolled
            .iter()
            .filter(|s| students.get(s.index()).is_some_and(Student::is_sick))
            .count();
        Some(sick as f64 / self.enrolled.len() as f64)
    }

    /// The deterministic roster order (see module docs).
    pub fn schedule_cmp(&self, other: &Roster) -> Ordering {
        self.meeting
            .schedule_cmp(&other.meeting)
            .then_with(|| other.capacity.cmp(&self.capacity))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialEq for Roster {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Roster {}

impl PartialOrd for Roster {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Roster {
    fn cmp(&self, other: &Self) -> Ordering {
        // Same ID is the same roster, even if compared across two campuses.
        if self.id == other.id {
            return Ordering::Equal;
        }
        self.schedule_cmp(other)
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roster [{} @ {}, capacity={}, students={}]",
            self.id,
            self.meeting,
            self.capacity,
            self.enrolled.len()
        )
    }
}
