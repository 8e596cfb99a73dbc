//! `campus-schedule` — meeting times, rosters, students, and the campus graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`meeting`]  | `MeetingTime`, `WeeklyWindow`, `DaySet`                    |
//! | [`roster`]   | `Roster`, `RosterSpec`                                     |
//! | [`student`]  | `Student`, `Health`, `HealthWriter`                        |
//! | [`campus`]   | `Campus` registry, `Enrollment`, `HealthCounts`            |
//! | [`loader`]   | `load_rosters_csv`, `load_enrollments_csv` (+ reader forms) |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Mutation model
//!
//! The graph is built once through [`Campus::add_student`],
//! [`Campus::add_roster`], and [`Campus::enroll`].  After that, the only
//! mutation entry point is [`HealthWriter`], which can flip a student's
//! health but cannot touch membership.

pub mod campus;
pub mod error;
pub mod loader;
pub mod meeting;
pub mod roster;
pub mod student;


pub use campus::{Campus, Enrollment, HealthCounts};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{
    load_enrollments_csv, load_enrollments_reader, load_rosters_csv, load_rosters_reader,
};
pub use meeting::{DaySet, MeetingTime, WeeklyWindow};
pub use roster::{Roster, RosterSpec};
pub use student::{Health, HealthWriter, Student};
