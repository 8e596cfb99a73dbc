use campus_core::{CoreError, StudentId};
use campus_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("schedule driver is not initialized")]
    NotInitialized,

    #[error("schedule driver is already initialized")]
    AlreadyInitialized,

    #[error("rosters cannot be added after the first step")]
    RosterSetFrozen,

    #[error("cannot place {students} students in rosters with total capacity {capacity}")]
    InsufficientCapacity { students: usize, capacity: u64 },

    #[error("{0} is not enrolled in any roster")]
    UnenrolledStudent(StudentId),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
