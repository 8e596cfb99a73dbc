//! Identifier types for students and rosters.
//!
//! `StudentId` is a zero-cost integer wrapper whose inner value doubles as the
//! student's index in `Campus` storage.  `RosterId` is a string (course codes
//! such as `"CS1102"`) and is the *only* source of roster identity: two
//! rosters with the same `RosterId` are the same roster.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── StudentId ─────────────────────────────────────────────────────────────────

/// Index of a student in campus storage.  Max ~4.3 billion students.
///
/// Ascending `StudentId` order is the canonical processing order wherever the
/// simulation must be reproducible.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
pub struct StudentId(pub u32);

impl StudentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({})", self.0)
    }
}

// ── RosterId ──────────────────────────────────────────────────────────────────

/// Globally unique roster (lecture) identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterId(String);

impl RosterId {
    pub fn new(id: impl Into<String>) -> Self {
        RosterId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RosterId {
    fn from(s: &str) -> Self {
        RosterId(s.to_owned())
    }
}

impl From<String> for RosterId {
    fn from(s: String) -> Self {
        RosterId(s)
    }
}

impl Borrow<str> for RosterId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
