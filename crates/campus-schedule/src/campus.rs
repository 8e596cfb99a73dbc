//! `Campus` — the student/roster graph for one run.
//!
//! Rosters are keyed by [`RosterId`] in a `BTreeMap`; students live in a
//! `Vec` indexed by [`StudentId`].  Enrollment is a method on the registry
//! rather than on either endpoint so that it can update both sides of the
//! membership in one step:
//!
//! ```text
//! enroll(r, s):
//!   s already in r      → no-op, Enrollment::AlreadyEnrolled (warning logged)
//!   r finite and full   → Err(CapacityExceeded), nothing modified
//!   otherwise           → r.enrolled += s ; s.rosters += r
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use campus_core::{RosterId, StudentId};

use crate::{Health, HealthWriter, Roster, ScheduleError, ScheduleResult, Student};

/// Outcome of a successful [`Campus::enroll`] call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Enrollment {
    Added,
    /// The student was already on the roster; nothing changed.
    AlreadyEnrolled,
}

/// Healthy/infected head-count.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct HealthCounts {
    pub healthy:  usize,
    pub infected: usize,
}

impl HealthCounts {
    pub fn total(&self) -> usize {
        self.healthy + self.infected
    }
}

#[derive(Debug, Default)]
pub struct Campus {
    students: Vec<Student>,
    rosters:  BTreeMap<RosterId, Roster>,
}

impl Campus {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a student and return its ID (the next free index).
    pub fn add_student(&mut self, health: Health) -> StudentId {
        let id = StudentId(self.students.len() as u32);
        self.students.push(Student::new(id, health));
        id
    }

    /// Register an empty roster.  Fails if the ID is already taken.
    pub fn add_roster(&mut self, roster: Roster) -> ScheduleResult<()> {
        if self.rosters.contains_key(roster.id()) {
            return Err(ScheduleError::DuplicateRosterId(roster.id().clone()));
        }
        debug!(roster = %roster.id(), meeting = %roster.meeting(), capacity = roster.capacity(), "roster registered");
        self.rosters.insert(roster.id().clone(), roster);
        Ok(())
    }

    /// Enroll `student` in `roster`, updating both sides together.
    ///
    /// Membership is checked before capacity: re-enrolling a student who is
    /// already in the roster returns `AlreadyEnrolled` even when the roster
    /// is full.  Only a new student can fail with `CapacityExceeded`.
    pub fn enroll(&mut self, roster: &str, student: StudentId) -> ScheduleResult<Enrollment> {
        let Some(s) = self.students.get_mut(student.index()) else {
            return Err(ScheduleError::UnknownStudent(student));
        };
        let Some(r) = self.rosters.get_mut(roster) else {
            return Err(ScheduleError::UnknownRoster(RosterId::from(roster)));
        };

        if r.contains(student) {
            warn!(roster = %r.id(), %student, "duplicate enrollment ignored");
            return Ok(Enrollment::AlreadyEnrolled);
        }
        if r.is_full() {
            return Err(ScheduleError::CapacityExceeded {
                roster:   r.id().clone(),
                capacity: r.capacity(),
            });
        }

        r.insert(student);
        s.register(r.id().clone());
        Ok(Enrollment::Added)
    }

    /// Consume the campus, yielding its rosters ascending by ID.  Students
    /// are dropped.
    pub fn into_rosters(self) -> impl Iterator<Item = Roster> {
        self.rosters.into_values()
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// All students, indexed by `StudentId`.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(id.index())
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn roster(&self, id: &str) -> Option<&Roster> {
        self.rosters.get(id)
    }

    /// All rosters, ascending by ID.
    pub fn rosters(&self) -> impl Iterator<Item = &Roster> + '_ {
        self.rosters.values()
    }

    pub fn roster_count(&self) -> usize {
        self.rosters.len()
    }

    /// All rosters in the deterministic schedule order.
    pub fn rosters_ordered(&self) -> Vec<&Roster> {
        let mut ordered: Vec<&Roster> = self.rosters.values().collect();
        ordered.sort_by(|a, b| a.schedule_cmp(b));
        ordered
    }

    /// Fraction of `roster`'s students who are infected.  `Ok(None)` means
    /// the roster is empty and the score is undefined.
    pub fn sickness_score(&self, roster: &str) -> ScheduleResult<Option<f64>> {
        self.rosters
            .get(roster)
            .map(|r| r.sickness_score(&self.students))
            .ok_or_else(|| ScheduleError::UnknownRoster(RosterId::from(roster)))
    }

    pub fn health_counts(&self) -> HealthCounts {
        let infected = self.students.iter().filter(|s| s.is_sick()).count();
        HealthCounts {
            healthy: self.students.len() - infected,
            infected,
        }
    }

    /// Verify that every roster/student membership is mirrored on the other
    /// side.
    pub fn check_consistency(&self) -> ScheduleResult<()> {
        for roster in self.rosters.values() {
            for &sid in roster.enrolled() {
                let mirrored = self
                    .students
                    .get(sid.index())
                    .is_some_and(|s| s.is_enrolled_in(roster.id().as_str()));
                if !mirrored {
                    return Err(ScheduleError::InconsistentMembership {
                        roster:  roster.id().clone(),
                        student: sid,
                    });
                }
            }
        }
        for student in &self.students {
            for rid in student.rosters() {
                let mirrored = self
                    .rosters
                    .get(rid)
                    .is_some_and(|r| r.contains(student.id()));
                if !mirrored {
                    return Err(ScheduleError::InconsistentMembership {
                        roster:  rid.clone(),
                        student: student.id(),
                    });
                }
            }
        }
        Ok(())
    }

    // ── Health access ─────────────────────────────────────────────────────

    /// Borrow the roster map read-only alongside a [`HealthWriter`].
    ///
    /// Used by the tick driver to hand contact events and health access to
    /// the transmission model at the same time.
    pub fn rosters_with_health(&mut self) -> (&BTreeMap<RosterId, Roster>, HealthWriter<'_>) {
        (&self.rosters, HealthWriter::new(&mut self.students))
    }

    /// A [`HealthWriter`] over every student.
    pub fn health_writer(&mut self) -> HealthWriter<'_> {
        HealthWriter::new(&mut self.students)
    }
}
