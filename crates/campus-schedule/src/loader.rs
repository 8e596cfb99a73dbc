//! CSV fixture loaders.
//!
//! # Roster CSV
//!
//! ```csv
//! roster_id,meeting,capacity
//! CS1102,daily:14,0
//! MA1024,daily:14,0
//! BCB100x,daily:15,0
//! ES3001,weekly:MWF:09:00-09:50,30
//! ```
//!
//! `meeting` uses the [`MeetingTime`] text form; `capacity` 0 is unlimited.
//!
//! # Enrollment CSV
//!
//! ```csv
//! student_id,roster_id
//! 0,CS1102
//! 0,BCB100x
//! ```
//!
//! Rows are returned in file order; the loader does not check that rosters
//! or students exist.  That happens when the fixture is built.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use campus_core::{RosterId, StudentId};

use crate::{MeetingTime, RosterSpec, ScheduleError};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    roster_id: String,
    meeting:   String,
    capacity:  u32,
}

#[derive(Deserialize)]
struct EnrollmentRecord {
    student_id: u32,
    roster_id:  String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load roster descriptions from a CSV file.
pub fn load_rosters_csv(path: &Path) -> Result<Vec<RosterSpec>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_rosters_reader(file)
}

/// Like [`load_rosters_csv`] but accepts any `Read` source.
pub fn load_rosters_reader<R: Read>(reader: R) -> Result<Vec<RosterSpec>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<RosterRecord>()
        .map(|result| {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            let meeting: MeetingTime = row.meeting.parse()?;
            Ok(RosterSpec::new(row.roster_id.trim(), meeting, row.capacity))
        })
        .collect()
}

/// Load `(student, roster)` enrollment pairs from a CSV file.
pub fn load_enrollments_csv(path: &Path) -> Result<Vec<(StudentId, RosterId)>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_enrollments_reader(file)
}

/// Like [`load_enrollments_csv`] but accepts any `Read` source.
pub fn load_enrollments_reader<R: Read>(
    reader: R,
) -> Result<Vec<(StudentId, RosterId)>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<EnrollmentRecord>()
        .map(|result| {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            Ok((StudentId(row.student_id), RosterId::from(row.roster_id.trim())))
        })
        .collect()
}
