//! Integration tests for campus-sim.

use campus_contact::{ContactEvent, NoopTransmission, TransmissionModel};
use campus_core::{CoreError, RosterId, SimClock, SimConfig, SimRng, StudentId, Tick};
use campus_schedule::{Campus, Health, HealthWriter, MeetingTime, Roster, RosterSpec, ScheduleError};

use crate::{
    CampusReport, FixtureSpec, GlobalSchedule, NoopObserver, PopulationSpec, RosterTemplate,
    ScheduleBuilder, SimError, SimObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn bcb_campus() -> Campus {
    ScheduleBuilder::fixture(FixtureSpec::bcb100x())
        .build(&mut SimRng::new(0))
        .unwrap()
}

fn driver<M: TransmissionModel>(model: M) -> GlobalSchedule<M> {
    GlobalSchedule::new(SimClock::default(), model, SimRng::new(7))
}

fn population(students: usize, initial_infected: usize) -> PopulationSpec {
    PopulationSpec { students, initial_infected }
}

/// Records every contact event as `(tick, roster, students)`.
#[derive(Default)]
struct Recorder {
    events:    Vec<(Tick, String, Vec<StudentId>)>,
    tick_ends: usize,
}

impl TransmissionModel for Recorder {
    fn on_contact(&mut self, event: &ContactEvent<'_>, _health: &mut HealthWriter<'_>, _rng: &mut SimRng) {
        self.events.push((
            event.tick,
            event.roster.to_string(),
            event.students.iter().copied().collect(),
        ));
    }

    fn on_tick_end(&mut self, _tick: Tick, _health: &mut HealthWriter<'_>, _rng: &mut SimRng) {
        self.tick_ends += 1;
    }
}

/// Infects each exposed healthy student with probability one half.
struct CoinFlip;

impl TransmissionModel for CoinFlip {
    fn on_contact(&mut self, event: &ContactEvent<'_>, health: &mut HealthWriter<'_>, rng: &mut SimRng) {
        if !event.students.iter().any(|&s| health.is_sick(s)) {
            return;
        }
        for &s in event.students {
            if !health.is_sick(s) && rng.gen_bool(0.5) {
                health.set_sick(s, true);
            }
        }
    }
}

// ── Fixture policy ────────────────────────────────────────────────────────────

#[cfg(test)]
mod fixture_tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn bcb100x_membership() {
        let campus = bcb_campus();
        assert_eq!(campus.student_count(), 3);
        assert_eq!(campus.roster_count(), 3);
        let members = |id: &str| -> Vec<StudentId> {
            campus.roster(id).unwrap().enrolled().iter().copied().collect()
        };
        assert_eq!(members("CS1102"), vec![StudentId(0), StudentId(1)]);
        assert_eq!(members("BCB100x"), vec![StudentId(0), StudentId(1), StudentId(2)]);
        assert_eq!(members("MA1024"), vec![StudentId(2)]);
        assert_eq!(campus.student(StudentId(2)).unwrap().rosters().len(), 2);
        campus.check_consistency().unwrap();
    }

    #[test]
    fn sickness_score_half() {
        let campus = ScheduleBuilder::fixture(FixtureSpec::bcb100x().infect(&[StudentId(0)]))
            .build(&mut SimRng::new(0))
            .unwrap();
        assert_eq!(campus.sickness_score("CS1102").unwrap(), Some(0.5));
        assert_eq!(campus.sickness_score("MA1024").unwrap(), Some(0.0));
    }

    #[test]
    fn infect_ignores_unknown_ids() {
        let spec = FixtureSpec::bcb100x().infect(&[StudentId(1), StudentId(99)]);
        assert_eq!(spec.students, vec![Health::Healthy, Health::Infected, Health::Healthy]);
    }

    #[test]
    fn unenrolled_student_rejected() {
        let mut spec = FixtureSpec::bcb100x();
        spec.students.push(Health::Healthy);
        let err = ScheduleBuilder::fixture(spec).build(&mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, SimError::UnenrolledStudent(StudentId(3))));
    }

    #[test]
    fn fixture_capacity_enforced() {
        let spec = FixtureSpec {
            students: vec![Health::Healthy; 2],
            rosters: vec![RosterSpec::new("SEM", MeetingTime::SimpleDaily { period: 9 }, 1)],
            enrollments: vec![(StudentId(0), "SEM".into()), (StudentId(1), "SEM".into())],
        };
        let err = ScheduleBuilder::fixture(spec).build(&mut SimRng::new(0)).unwrap_err();
        assert!(matches!(
            err,
            SimError::Schedule(ScheduleError::CapacityExceeded { capacity: 1, .. })
        ));
    }

    #[test]
    fn duplicate_fixture_enrollment_is_noop() {
        let mut spec = FixtureSpec::bcb100x();
        spec.enrollments.push((StudentId(0), "CS1102".into()));
        let campus = ScheduleBuilder::fixture(spec).build(&mut SimRng::new(0)).unwrap();
        assert_eq!(campus.roster("CS1102").unwrap().len(), 2);
    }

    #[test]
    fn from_csv_readers() {
        let rosters = "roster_id,meeting,capacity\nCS1102,daily:14,0\nBCB100x,daily:15,0\n";
        let enrollments = "student_id,roster_id\n0,CS1102\n1,BCB100x\n1,CS1102\n";
        let spec = FixtureSpec::from_csv_readers(Cursor::new(rosters), Cursor::new(enrollments), 2)
            .unwrap();
        let campus = ScheduleBuilder::fixture(spec).build(&mut SimRng::new(0)).unwrap();
        assert_eq!(campus.roster("CS1102").unwrap().len(), 2);
        assert_eq!(campus.roster("BCB100x").unwrap().len(), 1);
    }
}

// ── Randomized policy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod randomized_tests {
    use super::*;

    fn enrollments(campus: &Campus) -> Vec<Vec<RosterId>> {
        campus
            .students()
            .iter()
            .map(|s| s.rosters().iter().cloned().collect())
            .collect()
    }

    #[test]
    fn same_seed_same_graph() {
        let build = || {
            ScheduleBuilder::randomized(population(50_000, 1), RosterTemplate::default())
                .build(&mut SimRng::new(42))
                .unwrap()
        };
        let (a, b) = (build(), build());
        assert_eq!(a.student_count(), 50_000);
        assert_eq!(enrollments(&a), enrollments(&b));
    }

    #[test]
    fn different_seed_different_graph() {
        let build = |seed| {
            ScheduleBuilder::randomized(population(2_000, 0), RosterTemplate::default())
                .build(&mut SimRng::new(seed))
                .unwrap()
        };
        assert_ne!(enrollments(&build(1)), enrollments(&build(2)));
    }

    #[test]
    fn capacity_and_membership_invariants() {
        let campus = ScheduleBuilder::randomized(population(5_000, 3), RosterTemplate::default())
            .build(&mut SimRng::new(42))
            .unwrap();
        campus.check_consistency().unwrap();
        for roster in campus.rosters() {
            assert!(roster.capacity() >= 30 && roster.capacity() <= 300);
            assert!(roster.len() <= roster.capacity() as usize, "{roster}");
        }
        for student in campus.students() {
            let n = student.rosters().len();
            assert!((1..=4).contains(&n), "{} has {n} rosters", student.id());
        }
        assert_eq!(campus.health_counts().infected, 3);
        assert!(campus.student(StudentId(2)).unwrap().is_sick());
        assert!(!campus.student(StudentId(3)).unwrap().is_sick());
    }

    #[test]
    fn generated_ids_and_periods() {
        let template = RosterTemplate {
            periods: vec![15, 9],
            rosters_per_period: 2,
            ..RosterTemplate::default()
        };
        let specs = template.generate(&mut SimRng::new(0)).unwrap();
        let ids: Vec<&str> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["P09-000", "P09-001", "P15-000", "P15-001"]);
        assert_eq!(specs[3].meeting, MeetingTime::SimpleDaily { period: 15 });
    }

    #[test]
    fn insufficient_capacity_fails_before_enrollment() {
        let template = RosterTemplate {
            periods: vec![9],
            rosters_per_period: 1,
            min_capacity: 5,
            max_capacity: 5,
            ..RosterTemplate::default()
        };
        let err = ScheduleBuilder::randomized(population(10, 0), template)
            .build(&mut SimRng::new(42))
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::InsufficientCapacity { students: 10, capacity: 5 }
        ));
    }

    #[test]
    fn exact_capacity_fills_every_seat() {
        let template = RosterTemplate {
            periods: vec![9],
            rosters_per_period: 2,
            min_capacity: 5,
            max_capacity: 5,
            courses_per_student: 1,
            ..RosterTemplate::default()
        };
        let campus = ScheduleBuilder::randomized(population(10, 0), template)
            .build(&mut SimRng::new(3))
            .unwrap();
        assert!(campus.rosters().all(|r| r.is_full()));
    }

    #[test]
    fn unlimited_roster_always_feasible() {
        let pool = vec![
            RosterSpec::new("TINY", MeetingTime::SimpleDaily { period: 9 }, 1),
            RosterSpec::new("HALL", MeetingTime::SimpleDaily { period: 10 }, 0),
        ];
        let campus = ScheduleBuilder::randomized(population(100, 0), RosterTemplate::default())
            .roster_pool(pool)
            .build(&mut SimRng::new(0))
            .unwrap();
        assert_eq!(campus.roster("TINY").unwrap().len(), 1);
        assert_eq!(campus.roster("HALL").unwrap().len(), 100);
    }

    #[test]
    fn empty_pool_is_infeasible() {
        let err = ScheduleBuilder::randomized(population(1, 0), RosterTemplate::default())
            .roster_pool(Vec::new())
            .build(&mut SimRng::new(0))
            .unwrap_err();
        assert!(matches!(err, SimError::InsufficientCapacity { students: 1, capacity: 0 }));
    }

    #[test]
    fn non_overlap_policy_one_roster_per_period() {
        let template = RosterTemplate {
            periods: vec![9, 10],
            rosters_per_period: 3,
            min_capacity: 0,
            max_capacity: 0,
            courses_per_student: 4,
            allow_overlap: false,
        };
        let campus = ScheduleBuilder::randomized(population(200, 0), template)
            .build(&mut SimRng::new(11))
            .unwrap();
        for student in campus.students() {
            let rosters: Vec<&Roster> = student
                .rosters()
                .iter()
                .map(|id| campus.roster(id.as_str()).unwrap())
                .collect();
            assert_eq!(rosters.len(), 2);
            assert!(!rosters[0].meeting().conflicts_with(rosters[1].meeting()));
        }
    }

    #[test]
    fn overlap_policy_allows_same_period() {
        let template = RosterTemplate {
            periods: vec![9],
            rosters_per_period: 3,
            min_capacity: 0,
            max_capacity: 0,
            courses_per_student: 2,
            allow_overlap: true,
        };
        let campus = ScheduleBuilder::randomized(population(50, 0), template)
            .build(&mut SimRng::new(5))
            .unwrap();
        assert!(campus.students().iter().all(|s| s.rosters().len() == 2));
    }

    #[test]
    fn invalid_template_rejected() {
        let template = RosterTemplate { min_capacity: 10, max_capacity: 5, ..RosterTemplate::default() };
        let err = ScheduleBuilder::randomized(population(1, 0), template)
            .build(&mut SimRng::new(0))
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));

        let template = RosterTemplate { periods: vec![], ..RosterTemplate::default() };
        assert!(template.validate().is_err());
        let template = RosterTemplate { courses_per_student: 0, ..RosterTemplate::default() };
        assert!(template.validate().is_err());
    }

    #[test]
    fn template_from_toml() {
        let template: RosterTemplate =
            toml::from_str("periods = [9, 10]\nrosters_per_period = 2\nallow_overlap = true\n").unwrap();
        assert_eq!(template.periods, vec![9, 10]);
        assert_eq!(template.rosters_per_period, 2);
        assert!(template.allow_overlap);
        assert_eq!(template.max_capacity, RosterTemplate::default().max_capacity);

        assert!(toml::from_str::<RosterTemplate>("lecture_halls = 3\n").is_err());

        let pop: PopulationSpec = toml::from_str("students = 120\n").unwrap();
        assert_eq!(pop, population(120, 1));
    }
}

// ── Driver lifecycle ──────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn step_before_initialize_fails() {
        let mut schedule = driver(NoopTransmission);
        assert!(!schedule.is_running());
        assert!(matches!(schedule.step(Tick(14)), Err(SimError::NotInitialized)));
    }

    #[test]
    fn initialize_twice_fails() {
        let mut schedule = driver(NoopTransmission);
        schedule.initialize(bcb_campus()).unwrap();
        assert!(schedule.is_running());
        assert!(matches!(
            schedule.initialize(bcb_campus()),
            Err(SimError::AlreadyInitialized)
        ));
    }

    #[test]
    fn duplicate_roster_id_in_add_roster() {
        let mut schedule = driver(NoopTransmission);
        schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 9 }, "X")).unwrap();
        let err = schedule
            .add_roster(Roster::new(MeetingTime::SimpleDaily { period: 10 }, "X"))
            .unwrap_err();
        assert!(matches!(err, SimError::Schedule(ScheduleError::DuplicateRosterId(ref id)) if id.as_str() == "X"));
    }

    #[test]
    fn duplicate_roster_id_on_initialize() {
        let mut schedule = driver(NoopTransmission);
        schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 9 }, "CS1102")).unwrap();
        let err = schedule.initialize(bcb_campus()).unwrap_err();
        assert!(matches!(err, SimError::Schedule(ScheduleError::DuplicateRosterId(ref id)) if id.as_str() == "CS1102"));
        assert!(!schedule.is_running());
    }

    #[test]
    fn failed_initialize_keeps_pending_rosters() {
        let mut schedule = driver(NoopTransmission);
        schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 9 }, "CS1102")).unwrap();
        schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 8 }, "EARLY")).unwrap();
        assert!(schedule.initialize(bcb_campus()).is_err());
        assert_eq!(schedule.campus().roster_count(), 2);
        assert!(schedule.campus().roster("CS1102").is_some());

        // A campus without the clashing ID is accepted and gets both rosters.
        let mut campus = Campus::new();
        let s = campus.add_student(Health::Healthy);
        campus.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 15 }, "BCB100x")).unwrap();
        campus.enroll("BCB100x", s).unwrap();
        schedule.initialize(campus).unwrap();
        assert_eq!(schedule.campus().roster_count(), 3);
        assert!(schedule.campus().roster("EARLY").is_some());
    }

    #[test]
    fn roster_set_frozen_after_first_step() {
        let mut schedule = driver(NoopTransmission);
        schedule.initialize(bcb_campus()).unwrap();
        schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 8 }, "EARLY")).unwrap();
        assert_eq!(schedule.campus().roster_count(), 4);
        schedule.step(Tick(0)).unwrap();
        assert!(matches!(
            schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 9 }, "LATE")),
            Err(SimError::RosterSetFrozen)
        ));
    }

    #[test]
    fn from_config_uses_config() {
        let config = SimConfig { tick_duration_secs: 900, report_interval_ticks: 4, ..SimConfig::default() };
        let schedule = GlobalSchedule::from_config(&config, NoopTransmission).unwrap();
        assert_eq!(schedule.clock().tick_duration_secs, 900);
        assert_eq!(schedule.current_time(Tick(4)).unwrap(), "2015-10-27T01:00:00");

        let bad = SimConfig { tick_duration_secs: 0, ..SimConfig::default() };
        assert!(matches!(
            GlobalSchedule::from_config(&bad, NoopTransmission),
            Err(SimError::Config(_))
        ));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn bcb100x_event_forwarded_once() {
        let mut schedule = driver(Recorder::default());
        schedule.initialize(bcb_campus()).unwrap();

        assert_eq!(schedule.step(Tick(15)).unwrap(), 1);
        let events = &schedule.model().events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, Tick(15));
        assert_eq!(events[0].1, "BCB100x");
        assert_eq!(events[0].2, vec![StudentId(0), StudentId(1), StudentId(2)]);
        assert_eq!(schedule.model().tick_ends, 1);
    }

    #[test]
    fn idle_tick_produces_no_events() {
        let mut schedule = driver(Recorder::default());
        schedule.initialize(bcb_campus()).unwrap();
        assert_eq!(schedule.step(Tick(3)).unwrap(), 0);
        assert!(schedule.model().events.is_empty());
        assert_eq!(schedule.model().tick_ends, 1);
    }

    #[test]
    fn concurrent_rosters_visited_in_order() {
        let mut schedule = driver(Recorder::default());
        schedule.initialize(bcb_campus()).unwrap();
        assert_eq!(schedule.step(Tick(14)).unwrap(), 2);
        let ids: Vec<&str> = schedule.model().events.iter().map(|e| e.1.as_str()).collect();
        assert_eq!(ids, vec!["CS1102", "MA1024"]);
    }

    #[test]
    fn recurrence_repeats_next_day() {
        let mut schedule = driver(Recorder::default());
        schedule.initialize(bcb_campus()).unwrap();
        assert_eq!(schedule.step(Tick(24 + 15)).unwrap(), 1);
    }

    #[test]
    fn empty_active_roster_skipped() {
        let mut schedule = driver(Recorder::default());
        schedule.add_roster(Roster::new(MeetingTime::SimpleDaily { period: 15 }, "AAA")).unwrap();
        schedule.initialize(bcb_campus()).unwrap();

        let active: Vec<&str> = schedule.active_rosters(Tick(15)).iter().map(|id| id.as_str()).collect();
        assert_eq!(active, vec!["AAA", "BCB100x"]);
        assert_eq!(schedule.step(Tick(15)).unwrap(), 1);
    }

    #[test]
    fn tick_beyond_calendar_is_idle() {
        let mut schedule = driver(Recorder::default());
        schedule.initialize(bcb_campus()).unwrap();

        for tick in [Tick(3_000_000_000), Tick(u64::MAX)] {
            assert_eq!(schedule.step(tick).unwrap(), 0);
            assert!(schedule.active_rosters(tick).is_empty());
            assert!(matches!(
                schedule.report(tick),
                Err(SimError::Core(CoreError::TickOutOfRange(t))) if t == tick
            ));
            assert!(schedule.current_time(tick).is_err());
        }
        assert!(schedule.model().events.is_empty());
        assert_eq!(schedule.model().tick_ends, 2);
    }

    #[test]
    fn run_ticks_rejects_overflowing_range() {
        let mut schedule = driver(NoopTransmission);
        schedule.initialize(bcb_campus()).unwrap();
        let err = schedule.run_ticks(Tick(u64::MAX - 1), 5, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Core(CoreError::TickOutOfRange(_))));
        // The last representable tick is still steppable.
        assert_eq!(
            schedule.run_ticks(Tick(u64::MAX - 1), 1, &mut NoopObserver).unwrap(),
            Tick(u64::MAX)
        );
    }

    #[test]
    fn unspecified_meeting_never_active() {
        let mut schedule = driver(Recorder::default());
        let mut campus = Campus::new();
        let s = campus.add_student(Health::Healthy);
        campus.add_roster(Roster::new(MeetingTime::Unspecified, "TBA")).unwrap();
        campus.enroll("TBA", s).unwrap();
        schedule.initialize(campus).unwrap();
        for t in 0..48 {
            assert_eq!(schedule.step(Tick(t)).unwrap(), 0);
        }
    }

    #[test]
    fn driver_does_not_touch_health() {
        let mut schedule = driver(NoopTransmission);
        let campus = ScheduleBuilder::fixture(FixtureSpec::bcb100x().infect(&[StudentId(0)]))
            .build(&mut SimRng::new(0))
            .unwrap();
        schedule.initialize(campus).unwrap();
        schedule.run_ticks(Tick::ZERO, 48, &mut NoopObserver).unwrap();
        assert_eq!(schedule.campus().health_counts().infected, 1);
    }

    #[test]
    fn model_spreads_through_shared_roster() {
        struct InfectAll;
        impl TransmissionModel for InfectAll {
            fn on_contact(&mut self, e: &ContactEvent<'_>, h: &mut HealthWriter<'_>, _r: &mut SimRng) {
                if e.students.iter().any(|&s| h.is_sick(s)) {
                    for &s in e.students {
                        h.set_sick(s, true);
                    }
                }
            }
        }

        let campus = ScheduleBuilder::fixture(FixtureSpec::bcb100x().infect(&[StudentId(2)]))
            .build(&mut SimRng::new(0))
            .unwrap();
        let mut schedule = driver(InfectAll);
        schedule.initialize(campus).unwrap();

        // 14:00: C is alone in MA1024, nobody else exposed.
        schedule.step(Tick(14)).unwrap();
        assert_eq!(schedule.campus().health_counts().infected, 1);
        // 15:00: BCB100x brings everyone together.
        schedule.step(Tick(15)).unwrap();
        assert_eq!(schedule.campus().health_counts().infected, 3);
        assert_eq!(schedule.campus().sickness_score("CS1102").unwrap(), Some(1.0));
    }

    #[test]
    fn same_seed_same_epidemic() {
        let run = || {
            let mut rng = SimRng::new(42);
            let campus = ScheduleBuilder::randomized(population(2_000, 20), RosterTemplate::default())
                .build(&mut rng)
                .unwrap();
            let mut schedule = GlobalSchedule::new(SimClock::default(), CoinFlip, rng.child(1));
            schedule.initialize(campus).unwrap();
            schedule.run_ticks(Tick::ZERO, 48, &mut NoopObserver).unwrap();
            schedule
                .campus()
                .students()
                .iter()
                .map(|s| s.health())
                .collect::<Vec<Health>>()
        };
        let (a, b) = (run(), run());
        assert_eq!(a, b);
        assert!(a.iter().filter(|h| h.is_sick()).count() > 20);
    }
}

// ── Observer and reports ──────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:  usize,
        ends:    usize,
        events:  usize,
        reports: Vec<CampusReport>,
        end:     Option<Tick>,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, contact_events: usize) {
            self.ends += 1;
            self.events += contact_events;
        }
        fn on_report(&mut self, _t: Tick, report: &CampusReport) {
            self.reports.push(report.clone());
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.end = Some(final_tick);
        }
    }

    #[test]
    fn run_ticks_calls_hooks() {
        let mut schedule = driver(NoopTransmission).with_report_interval(24);
        schedule.initialize(bcb_campus()).unwrap();
        let mut obs = Counter::default();

        let next = schedule.run_ticks(Tick::ZERO, 48, &mut obs).unwrap();
        assert_eq!(next, Tick(48));
        assert_eq!(obs.starts, 48);
        assert_eq!(obs.ends, 48);
        assert_eq!(obs.events, 6, "three events per day");
        assert_eq!(obs.reports.len(), 2);
        assert_eq!(obs.reports[1].tick, Tick(24));
        assert_eq!(obs.end, Some(Tick(48)));
    }

    #[test]
    fn run_ticks_resumes() {
        let mut schedule = driver(NoopTransmission);
        schedule.initialize(bcb_campus()).unwrap();
        let next = schedule.run_ticks(Tick::ZERO, 10, &mut NoopObserver).unwrap();
        let next = schedule.run_ticks(next, 6, &mut NoopObserver).unwrap();
        assert_eq!(next, Tick(16));
    }

    #[test]
    fn reports_disabled_by_default() {
        let mut schedule = driver(NoopTransmission);
        schedule.initialize(bcb_campus()).unwrap();
        let mut obs = Counter::default();
        schedule.run_ticks(Tick::ZERO, 30, &mut obs).unwrap();
        assert!(obs.reports.is_empty());
    }

    #[test]
    fn report_contents() {
        let campus = ScheduleBuilder::fixture(FixtureSpec::bcb100x().infect(&[StudentId(0)]))
            .build(&mut SimRng::new(0))
            .unwrap();
        let mut schedule = driver(NoopTransmission);
        schedule.initialize(campus).unwrap();

        let report = schedule.report(Tick(14)).unwrap();
        assert_eq!(report.time, "2015-10-27T14:00:00");
        assert_eq!(report.healthy, 2);
        assert_eq!(report.infected, 1);
        assert_eq!(report.active_rosters, 2);
        assert!((report.infected_fraction() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(
            report.to_string(),
            "T14 [2015-10-27T14:00:00] healthy=2 infected=1 active_rosters=2"
        );
    }
}
