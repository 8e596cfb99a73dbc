//! `ScheduleBuilder` — constructs the student/roster graph for a run.
//!
//! # Policies
//!
//! | Constructor                       | Policy                                      |
//! |-----------------------------------|---------------------------------------------|
//! | [`ScheduleBuilder::fixture`]      | Hand-specified rosters, students, enrollments |
//! | [`ScheduleBuilder::randomized`]   | `n` students assigned from a seeded RNG      |
//!
//! # Randomized assignment
//!
//! ```text
//! 1. students 0..n, the first `initial_infected` infected
//! 2. roster pool: generated from RosterTemplate, or supplied explicitly
//! 3. no unlimited roster and Σ capacity < n  → InsufficientCapacity
//! 4. pass 1: each student (ascending) joins one roster with room
//! 5. pass 2: each student (ascending) joins up to courses_per_student − 1
//!            more rosters, skipping time conflicts unless allow_overlap
//! ```
//!
//! Candidates are always scanned in roster schedule order; the RNG only picks
//! *which* eligible candidate.  Same seed and `n` → identical graph.

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use campus_core::{RosterId, SimRng, StudentId};
use campus_schedule::{
    load_enrollments_reader, load_rosters_reader, Campus, Health, MeetingTime, RosterSpec,
    WeeklyWindow,
};

use crate::{SimError, SimResult};

// ── FixtureSpec ───────────────────────────────────────────────────────────────

/// A hand-specified campus: used for repeatable tests and small demos.
#[derive(Clone, Debug, Default)]
pub struct FixtureSpec {
    /// Initial health per student; the index is the `StudentId`.
    pub students:    Vec<Health>,
    pub rosters:     Vec<RosterSpec>,
    /// `(student, roster)` pairs, applied in order.
    pub enrollments: Vec<(StudentId, RosterId)>,
}

impl FixtureSpec {
    /// Three students and three lectures:
    ///
    /// | Roster    | Meets      | Students |
    /// |-----------|------------|----------|
    /// | `CS1102`  | daily 14:00 | 0, 1    |
    /// | `MA1024`  | daily 14:00 | 2       |
    /// | `BCB100x` | daily 15:00 | 0, 1, 2 |
    pub fn bcb100x() -> Self {
        let (a, b, c) = (StudentId(0), StudentId(1), StudentId(2));
        Self {
            students: vec![Health::Healthy; 3],
            rosters: vec![
                RosterSpec::new("CS1102", MeetingTime::SimpleDaily { period: 14 }, 0),
                RosterSpec::new("MA1024", MeetingTime::SimpleDaily { period: 14 }, 0),
                RosterSpec::new("BCB100x", MeetingTime::SimpleDaily { period: 15 }, 0),
            ],
            enrollments: vec![
                (a, "CS1102".into()),
                (a, "BCB100x".into()),
                (b, "CS1102".into()),
                (b, "BCB100x".into()),
                (c, "BCB100x".into()),
                (c, "MA1024".into()),
            ],
        }
    }

    /// Build a fixture from roster and enrollment CSVs (see
    /// [`campus_schedule::loader`]).  `student_count` healthy students are
    /// created.
    pub fn from_csv_readers<R1: Read, R2: Read>(
        rosters:       R1,
        enrollments:   R2,
        student_count: usize,
    ) -> SimResult<Self> {
        Ok(Self {
            students:    vec![Health::Healthy; student_count],
            rosters:     load_rosters_reader(rosters)?,
            enrollments: load_enrollments_reader(enrollments)?,
        })
    }

    /// Mark `students` as initially infected.  Unknown IDs are ignored.
    pub fn infect(mut self, students: &[StudentId]) -> Self {
        for s in students {
            if let Some(h) = self.students.get_mut(s.index()) {
                *h = Health::Infected;
            }
        }
        self
    }
}

// ── RosterTemplate ────────────────────────────────────────────────────────────

/// Parameters for generating a roster pool and assigning students to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterTemplate {
    /// Daily periods (hours) at which rosters meet.
    pub periods:             Vec<u8>,
    pub rosters_per_period:  u32,
    /// Capacity is drawn uniformly from `min_capacity..=max_capacity`.
    /// A draw of 0 yields an unlimited roster.
    pub min_capacity:        u32,
    pub max_capacity:        u32,
    /// Target rosters per student.  The first is guaranteed, the rest are
    /// best-effort.
    pub courses_per_student: u32,
    /// Permit one student in two rosters that meet at the same time.
    pub allow_overlap:       bool,
}

impl Default for RosterTemplate {
    fn default() -> Self {
        Self {
            periods:             vec![8, 9, 10, 11, 13, 14, 15, 16],
            rosters_per_period:  60,
            min_capacity:        30,
            max_capacity:        300,
            courses_per_student: 4,
            allow_overlap:       false,
        }
    }
}

impl RosterTemplate {
    pub fn validate(&self) -> SimResult<()> {
        if self.periods.is_empty() {
            return Err(SimError::Config("roster template has no periods".into()));
        }
        if self.rosters_per_period == 0 {
            return Err(SimError::Config("rosters_per_period must be > 0".into()));
        }
        if self.min_capacity > self.max_capacity {
            return Err(SimError::Config(format!(
                "min_capacity {} exceeds max_capacity {}",
                self.min_capacity, self.max_capacity
            )));
        }
        if self.courses_per_student == 0 {
            return Err(SimError::Config("courses_per_student must be >= 1".into()));
        }
        Ok(())
    }

    /// Generate the roster pool: ascending period, then index, IDs
    /// `P{period:02}-{index:03}`.
    pub fn generate(&self, rng: &mut SimRng) -> SimResult<Vec<RosterSpec>> {
        let mut periods = self.periods.clone();
        periods.sort_unstable();
        periods.dedup();

        let mut specs = Vec::with_capacity(periods.len() * self.rosters_per_period as usize);
        for period in periods {
            let meeting = MeetingTime::daily(period)?;
            for index in 0..self.rosters_per_period {
                let capacity = rng.gen_range(self.min_capacity..=self.max_capacity);
                specs.push(RosterSpec::new(
                    format!("P{period:02}-{index:03}"),
                    meeting.clone(),
                    capacity,
                ));
            }
        }
        Ok(specs)
    }
}

// ── PopulationSpec ────────────────────────────────────────────────────────────

/// Size and seeding of a randomized population.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationSpec {
    pub students:         usize,
    /// The first `initial_infected` students (by ID) start infected.
    pub initial_infected: usize,
}

impl Default for PopulationSpec {
    fn default() -> Self {
        Self { students: 50_000, initial_infected: 1 }
    }
}

// ── ScheduleBuilder ───────────────────────────────────────────────────────────

enum Policy {
    Fixture(FixtureSpec),
    Randomized {
        population: PopulationSpec,
        template:   RosterTemplate,
        pool:       Option<Vec<RosterSpec>>,
    },
}

/// Builds a [`Campus`] under one of two policies.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(config.seed);
/// let campus = ScheduleBuilder::randomized(population, RosterTemplate::default())
///     .build(&mut rng)?;
/// ```
pub struct ScheduleBuilder {
    policy: Policy,
}

impl ScheduleBuilder {
    pub fn fixture(spec: FixtureSpec) -> Self {
        Self { policy: Policy::Fixture(spec) }
    }

    pub fn randomized(population: PopulationSpec, template: RosterTemplate) -> Self {
        Self {
            policy: Policy::Randomized { population, template, pool: None },
        }
    }

    /// Replace the generated roster pool with `rosters`.  The template's
    /// assignment settings still apply.  No effect on a fixture builder.
    pub fn roster_pool(mut self, rosters: Vec<RosterSpec>) -> Self {
        if let Policy::Randomized { pool, .. } = &mut self.policy {
            *pool = Some(rosters);
        }
        self
    }

    /// Construct the campus.  The fixture policy ignores `rng`.
    pub fn build(self, rng: &mut SimRng) -> SimResult<Campus> {
        let campus = match self.policy {
            Policy::Fixture(spec) => build_fixture(spec)?,
            Policy::Randomized { population, template, pool } => {
                build_randomized(&population, &template, pool, rng)?
            }
        };

        if let Some(s) = campus.students().iter().find(|s| s.rosters().is_empty()) {
            return Err(SimError::UnenrolledStudent(s.id()));
        }
        campus.check_consistency()?;

        let counts = campus.health_counts();
        info!(
            students = campus.student_count(),
            rosters = campus.roster_count(),
            infected = counts.infected,
            "campus built"
        );
        Ok(campus)
    }
}

// ── Fixture policy ────────────────────────────────────────────────────────────

fn build_fixture(spec: FixtureSpec) -> SimResult<Campus> {
    let mut campus = Campus::new();
    for health in spec.students {
        campus.add_student(health);
    }
    for roster in spec.rosters {
        campus.add_roster(roster.into_roster())?;
    }
    for (student, roster) in &spec.enrollments {
        campus.enroll(roster.as_str(), *student)?;
    }
    Ok(campus)
}

// ── Randomized policy ─────────────────────────────────────────────────────────

fn build_randomized(
    population: &PopulationSpec,
    template:   &RosterTemplate,
    pool:       Option<Vec<RosterSpec>>,
    rng:        &mut SimRng,
) -> SimResult<Campus> {
    template.validate()?;
    let n = population.students;
    let specs = match pool {
        Some(p) => p,
        None => template.generate(rng)?,
    };

    // ── Feasibility, before any enrollment ────────────────────────────────
    let unlimited = specs.iter().any(|s| s.capacity == 0);
    let capacity: u64 = specs.iter().map(|s| s.capacity as u64).sum();
    if n > 0 && (specs.is_empty() || (!unlimited && capacity < n as u64)) {
        return Err(SimError::InsufficientCapacity { students: n, capacity });
    }

    let mut campus = Campus::new();
    for i in 0..n {
        let health = if i < population.initial_infected { Health::Infected } else { Health::Healthy };
        campus.add_student(health);
    }
    for spec in specs {
        campus.add_roster(spec.into_roster())?;
    }

    let mut slots = Slots::new(&campus, template.allow_overlap);
    let mut scratch = Vec::with_capacity(slots.len());
    let mut blocked = vec![false; slots.len()];

    // ── Pass 1: one guaranteed roster per student ─────────────────────────
    let mut first = Vec::with_capacity(n);
    for sid in (0..n as u32).map(StudentId) {
        let idx = slots
            .pick(rng, &[], &blocked, &mut scratch)
            .ok_or(SimError::InsufficientCapacity { students: n, capacity })?;
        slots.take(&mut campus, sid, idx)?;
        first.push(idx);
    }
    debug!(students = n, "assignment pass 1 complete");

    // ── Pass 2: best-effort extra rosters ─────────────────────────────────
    let extra = template.courses_per_student.saturating_sub(1) as usize;
    if extra > 0 {
        let mut taken = Vec::with_capacity(extra + 1);
        for (sid, &first_idx) in (0..n as u32).map(StudentId).zip(&first) {
            taken.clear();
            taken.push(first_idx);
            blocked.fill(false);
            slots.block(&mut blocked, first_idx);

            for _ in 0..extra {
                let Some(idx) = slots.pick(rng, &taken, &blocked, &mut scratch) else {
                    break;
                };
                slots.take(&mut campus, sid, idx)?;
                slots.block(&mut blocked, idx);
                taken.push(idx);
            }
        }
        debug!(students = n, extra, "assignment pass 2 complete");
    }

    Ok(campus)
}

/// Assignment bookkeeping over rosters in schedule order.
struct Slots {
    ids:       Vec<RosterId>,
    /// Seats left; `None` = unlimited.
    remaining: Vec<Option<u32>>,
    /// Indices of rosters with room, ascending.
    open:      Vec<usize>,
    /// Row-major `len × len` time-conflict matrix; `None` when overlap is allowed.
    conflicts: Option<Vec<bool>>,
}

impl Slots {
    fn new(campus: &Campus, allow_overlap: bool) -> Self {
        let ordered = campus.rosters_ordered();
        let ids: Vec<RosterId> = ordered.iter().map(|r| r.id().clone()).collect();
        let remaining: Vec<Option<u32>> = ordered.iter().map(|r| r.remaining()).collect();
        let open = (0..ids.len()).filter(|&i| remaining[i] != Some(0)).collect();

        let conflicts = (!allow_overlap).then(|| {
            let windows: Vec<Vec<WeeklyWindow>> =
                ordered.iter().map(|r| r.meeting().windows()).collect();
            let n = windows.len();
            let mut matrix = vec![false; n * n];
            for i in 0..n {
                for j in 0..n {
                    matrix[i * n + j] = windows[i]
                        .iter()
                        .any(|a| windows[j].iter().any(|b| a.overlaps(b)));
                }
            }
            matrix
        });

        Self { ids, remaining, open, conflicts }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    /// Uniformly pick an open roster not in `taken` and not `blocked`.
    fn pick(
        &self,
        rng:     &mut SimRng,
        taken:   &[usize],
        blocked: &[bool],
        scratch: &mut Vec<usize>,
    ) -> Option<usize> {
        scratch.clear();
        scratch.extend(
            self.open
                .iter()
                .copied()
                .filter(|&i| !blocked[i] && !taken.contains(&i)),
        );
        rng.choose(scratch).copied()
    }

    fn take(&mut self, campus: &mut Campus, student: StudentId, idx: usize) -> SimResult<()> {
        campus.enroll(self.ids[idx].as_str(), student)?;
        if let Some(left) = &mut self.remaining[idx] {
            *left -= 1;
            if *left == 0 {
                self.open.retain(|&i| i != idx);
            }
        }
        Ok(())
    }

    /// Mark every roster that conflicts with `idx` as blocked.
    fn block(&self, blocked: &mut [bool], idx: usize) {
        let Some(matrix) = &self.conflicts else {
            return;
        };
        let n = self.len();
        for (j, b) in blocked.iter_mut().enumerate() {
            *b |= matrix[idx * n + j];
        }
    }
}
