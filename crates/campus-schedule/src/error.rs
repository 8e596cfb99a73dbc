use thiserror::Error;

use campus_core::{RosterId, StudentId};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("roster {roster} is full (capacity {capacity})")]
    CapacityExceeded { roster: RosterId, capacity: u32 },

    #[error("duplicate roster ID {0}")]
    DuplicateRosterId(RosterId),

    #[error("unknown roster {0}")]
    UnknownRoster(RosterId),

    #[error("unknown student {0}")]
    UnknownStudent(StudentId),

    #[error("membership of {student} in roster {roster} is not mirrored on both sides")]
    InconsistentMembership { roster: RosterId, student: StudentId },

    #[error("invalid meeting time: {0}")]
    InvalidMeeting(String),

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
