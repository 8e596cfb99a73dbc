//! `Student` — a population agent — and the narrow health-write capability.

use std::collections::BTreeSet;

use campus_core::{RosterId, StudentId};

// ── Health ────────────────────────────────────────────────────────────────────

/// The minimal health state the scheduling core tracks.
///
/// Richer epidemiological state belongs to the transmission model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Health {
    #[default]
    Healthy,
    Infected,
}

impl Health {
    #[inline]
    pub fn is_sick(self) -> bool {
        self == Health::Infected
    }

    #[inline]
    pub fn from_sick(sick: bool) -> Self {
        if sick { Health::Infected } else { Health::Healthy }
    }
}

// ── Student ───────────────────────────────────────────────────────────────────

/// A student and the rosters it is enrolled in.
///
/// Membership is written only by `Campus::enroll`; health only through a
/// [`HealthWriter`].
#[derive(Debug)]
pub struct Student {
    id:      StudentId,
    health:  Health,
    rosters: BTreeSet<RosterId>,
}

impl Student {
    pub(crate) fn new(id: StudentId, health: Health) -> Self {
        Self { id, health, rosters: BTreeSet::new() }
    }

    #[inline]
    pub fn id(&self) -> StudentId {
        self.id
    }

    #[inline]
    pub fn health(&self) -> Health {
        self.health
    }

    #[inline]
    pub fn is_sick(&self) -> bool {
        self.health.is_sick()
    }

    /// Rosters this student is enrolled in, ascending by ID.
    pub fn rosters(&self) -> &BTreeSet<RosterId> {
        &self.rosters
    }

    pub fn is_enrolled_in(&self, roster: &str) -> bool {
        self.rosters.contains(roster)
    }

    pub(crate) fn register(&mut self, roster: RosterId) -> bool {
        self.rosters.insert(roster)
    }
}

// ── HealthWriter ──────────────────────────────────────────────────────────────

/// Write access to student health and nothing else.
///
/// This is the only mutation handle the tick driver lends to a transmission
/// model.  Roster membership stays read-only for the whole run.
pub struct HealthWriter<'a> {
    students: &'a mut [Student],
}

impl<'a> HealthWriter<'a> {
    pub(crate) fn new(students: &'a mut [Student]) -> Self {
        Self { students }
    }

    /// `true` if `student` exists and is infected.
    pub fn is_sick(&self, student: StudentId) -> bool {
        self.students
            .get(student.index())
            .is_some_and(Student::is_sick)
    }

    pub fn health(&self, student: StudentId) -> Option<Health> {
        self.students.get(student.index()).map(Student::health)
    }

    /// Set `student`'s health.  Returns `true` if the state changed; unknown
    /// students are ignored and return `false`.
    pub fn set_sick(&mut self, student: StudentId, sick: bool) -> bool {
        let Some(s) = self.students.get_mut(student.index()) else {
            return false;
        };
        let next = Health::from_sick(sick);
        let changed = s.health != next;
        s.health = next;
        changed
    }
}
