//! `MeetingTime` — when a roster meets.
//!
//! # Kinds
//!
//! | Variant        | Meaning                                                  |
//! |----------------|----------------------------------------------------------|
//! | `SimpleDaily`  | One-hour slot starting at `period:00`, every day         |
//! | `Weekly`       | Set of weekdays × `[start_minute, end_minute)` window    |
//! | `Composite`    | In session whenever any component is in session          |
//! | `Unspecified`  | Never in session                                         |
//!
//! # Ordering
//!
//! [`MeetingTime::compare`] only orders values of the *same* comparable kind
//! and returns `None` otherwise.  [`MeetingTime::schedule_cmp`] extends that
//! to a total order by ranking kinds first; roster ordering builds on it.
//!
//! # Text form
//!
//! ```text
//! daily:14                 SimpleDaily { period: 14 }
//! weekly:MWF:09:00-09:50   Weekly, Mon/Wed/Fri 09:00–09:50
//! none                     Unspecified
//! daily:9|weekly:R:13:00-15:00   Composite of the two
//! ```
//!
//! Day letters: `M T W R F S U` (Monday … Sunday).
//!
//! `Display` writes the [normal form](MeetingTime::normalized), so parsing
//! the text of any value gives back its normal form.  A `SimpleDaily` period
//! outside `0..24` is never in session and is written as `none`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use campus_core::Recurrence;

use crate::ScheduleError;

const MINUTES_PER_DAY: u16 = 24 * 60;
const DAY_LETTERS: [char; 7] = ['M', 'T', 'W', 'R', 'F', 'S', 'U'];

// ── DaySet ────────────────────────────────────────────────────────────────────

/// A set of weekdays, one bit per day (bit 0 = Monday).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);
    pub const EVERY_DAY: DaySet = DaySet(0b111_1111);
    pub const WEEKDAYS: DaySet = DaySet(0b001_1111);

    pub fn from_days(days: &[Weekday]) -> Self {
        DaySet(days.iter().fold(0, |bits, d| bits | Self::bit(*d)))
    }

    #[inline]
    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    #[inline]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    #[inline]
    pub fn intersects(self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Days from Monday of the earliest day in the set.
    pub fn first(self) -> Option<u8> {
        (!self.is_empty()).then(|| self.0.trailing_zeros() as u8)
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, letter) in DAY_LETTERS.iter().enumerate() {
            if self.0 & (1 << i) != 0 {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for DaySet {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0u8;
        for c in s.trim().chars() {
            let idx = DAY_LETTERS
                .iter()
                .position(|&l| l == c.to_ascii_uppercase())
                .ok_or_else(|| ScheduleError::Parse(format!("invalid day letter {c:?} in {s:?}")))?;
            bits |= 1 << idx;
        }
        if bits == 0 {
            return Err(ScheduleError::Parse(format!("empty day set {s:?}")));
        }
        Ok(DaySet(bits))
    }
}

// ── WeeklyWindow ──────────────────────────────────────────────────────────────

/// A time-of-day window repeated on a set of weekdays.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct WeeklyWindow {
    pub days: DaySet,
    /// Minutes after midnight, inclusive.
    pub start_minute: u16,
    /// Minutes after midnight, exclusive.  At most 1440.
    pub end_minute: u16,
}

impl WeeklyWindow {
    pub fn new(days: DaySet, start_minute: u16, end_minute: u16) -> Result<Self, ScheduleError> {
        if days.is_empty() {
            return Err(ScheduleError::InvalidMeeting("weekly window has no days".into()));
        }
        if start_minute >= end_minute || end_minute > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidMeeting(format!(
                "weekly window {start_minute}..{end_minute} is not a valid minute range"
            )));
        }
        Ok(Self { days, start_minute, end_minute })
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let minute = (at.hour() * 60 + at.minute()) as u16;
        self.days.contains(at.weekday())
            && minute >= self.start_minute
            && minute < self.end_minute
    }

    /// `true` if the two windows share at least one minute of some weekday.
    pub fn overlaps(&self, other: &WeeklyWindow) -> bool {
        self.days.intersects(other.days)
            && self.start_minute < other.end_minute
            && other.start_minute < self.end_minute
    }

    fn sort_key(&self) -> (u8, u16, u16, u8) {
        (
            self.days.first().unwrap_or(u8::MAX),
            self.start_minute,
            self.end_minute,
            self.days.bits(),
        )
    }
}

// ── MeetingTime ───────────────────────────────────────────────────────────────

/// When a recurring meeting is in session.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum MeetingTime {
    /// Hour-long slot beginning at `period:00` every day.  `period` in `0..24`.
    SimpleDaily { period: u8 },
    Weekly(WeeklyWindow),
    Composite(Vec<MeetingTime>),
    #[default]
    Unspecified,
}

impl MeetingTime {
    /// A validated `SimpleDaily` meeting.
    pub fn daily(period: u8) -> Result<Self, ScheduleError> {
        if period >= 24 {
            return Err(ScheduleError::InvalidMeeting(format!(
                "daily period {period} is outside 0..24"
            )));
        }
        Ok(MeetingTime::SimpleDaily { period })
    }

    /// In session whenever any of `parts` is.
    ///
    /// Nested composites are flattened and parts that are never in session
    /// dropped; no parts left gives `Unspecified`, one gives that part.
    pub fn composite(parts: impl IntoIterator<Item = MeetingTime>) -> MeetingTime {
        let mut flat = Vec::new();
        for part in parts {
            part.flatten_into(&mut flat);
        }
        if flat.len() > 1 {
            MeetingTime::Composite(flat)
        } else {
            flat.pop().unwrap_or(MeetingTime::Unspecified)
        }
    }

    fn flatten_into(self, out: &mut Vec<MeetingTime>) {
        match self {
            MeetingTime::Composite(parts) => {
                for part in parts {
                    part.flatten_into(out);
                }
            }
            m if m.is_never() => {}
            m => out.push(m),
        }
    }

    /// `true` for meetings that can never be in session: `Unspecified` and
    /// a `SimpleDaily` period outside `0..24`.
    fn is_never(&self) -> bool {
        match self {
            MeetingTime::SimpleDaily { period } => *period >= 24,
            MeetingTime::Unspecified => true,
            _ => false,
        }
    }

    /// Same schedule in canonical shape: composites as built by
    /// [`composite`](Self::composite), never-in-session meetings as
    /// `Unspecified`.
    pub fn normalized(&self) -> MeetingTime {
        match self {
            MeetingTime::Composite(parts) => Self::composite(parts.iter().cloned()),
            m if m.is_never() => MeetingTime::Unspecified,
            m => m.clone(),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            MeetingTime::SimpleDaily { .. } => 0,
            MeetingTime::Weekly(_) => 1,
            MeetingTime::Composite(_) => 2,
            MeetingTime::Unspecified => 3,
        }
    }

    /// Order two meeting times of the same comparable kind.
    ///
    /// Returns `None` when the kinds differ or either side is `Unspecified`.
    pub fn compare(&self, other: &MeetingTime) -> Option<Ordering> {
        match (self, other) {
            (MeetingTime::SimpleDaily { period: a }, MeetingTime::SimpleDaily { period: b }) => {
                Some(a.cmp(b))
            }
            (MeetingTime::Weekly(a), MeetingTime::Weekly(b)) => {
                Some(a.sort_key().cmp(&b.sort_key()))
            }
            (MeetingTime::Composite(a), MeetingTime::Composite(b)) => Some(
                a.iter()
                    .zip(b)
                    .map(|(x, y)| x.schedule_cmp(y))
                    .find(|o| o.is_ne())
                    .unwrap_or_else(|| a.len().cmp(&b.len())),
            ),
            _ => None,
        }
    }

    /// Total order over all meeting times: kind rank first, then
    /// [`compare`](Self::compare).  Incomparable pairs of the same kind
    /// (`Unspecified`) are `Equal`.
    pub fn schedule_cmp(&self, other: &MeetingTime) -> Ordering {
        self.kind_rank()
            .cmp(&other.kind_rank())
            .then_with(|| self.compare(other).unwrap_or(Ordering::Equal))
    }

    /// Flatten into the weekly windows this meeting occupies.
    pub fn windows(&self) -> Vec<WeeklyWindow> {
        match self {
            MeetingTime::SimpleDaily { period } if *period >= 24 => Vec::new(),
            MeetingTime::SimpleDaily { period } => {
                let start = *period as u16 * 60;
                vec![WeeklyWindow {
                    days:         DaySet::EVERY_DAY,
                    start_minute: start,
                    end_minute:   start + 60,
                }]
            }
            MeetingTime::Weekly(w) => vec![*w],
            MeetingTime::Composite(parts) => parts.iter().flat_map(|p| p.windows()).collect(),
            MeetingTime::Unspecified => Vec::new(),
        }
    }

    /// `true` if the two meetings are ever in session at the same instant.
    pub fn conflicts_with(&self, other: &MeetingTime) -> bool {
        let theirs = other.windows();
        self.windows()
            .iter()
            .any(|mine| theirs.iter().any(|t| mine.overlaps(t)))
    }
}

impl Recurrence for MeetingTime {
    fn contains(&self, at: NaiveDateTime) -> bool {
        match self {
            MeetingTime::SimpleDaily { period } => at.hour() == *period as u32,
            MeetingTime::Weekly(w) => w.contains(at),
            MeetingTime::Composite(parts) => parts.iter().any(|p| p.contains(at)),
            MeetingTime::Unspecified => false,
        }
    }
}

// ── Text form ─────────────────────────────────────────────────────────────────

impl fmt::Display for MeetingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            m if m.is_never() => f.write_str("none"),
            MeetingTime::SimpleDaily { period } => write!(f, "daily:{period}"),
            MeetingTime::Weekly(w) => write!(
                f,
                "weekly:{}:{:02}:{:02}-{:02}:{:02}",
                w.days,
                w.start_minute / 60,
                w.start_minute % 60,
                w.end_minute / 60,
                w.end_minute % 60,
            ),
            MeetingTime::Composite(_) => match self.normalized() {
                MeetingTime::Composite(parts) => {
                    for (i, part) in parts.iter().enumerate() {
                        if i > 0 {
                            f.write_str("|")?;
                        }
                        write!(f, "{part}")?;
                    }
                    Ok(())
                }
                single => write!(f, "{single}"),
            },
            MeetingTime::Unspecified => f.write_str("none"),
        }
    }
}

impl FromStr for MeetingTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('|') {
            let parts = s
                .split('|')
                .map(str::parse)
                .collect::<Result<Vec<MeetingTime>, _>>()?;
            return Ok(MeetingTime::composite(parts));
        }
        if s.eq_ignore_ascii_case("none") {
            return Ok(MeetingTime::Unspecified);
        }
        if let Some(period) = s.strip_prefix("daily:") {
            let period = period
                .parse::<u8>()
                .map_err(|_| ScheduleError::Parse(format!("invalid daily period in {s:?}")))?;
            return MeetingTime::daily(period);
        }
        if let Some(rest) = s.strip_prefix("weekly:") {
            let (days, range) = rest
                .split_once(':')
                .ok_or_else(|| ScheduleError::Parse(format!("missing day set in {s:?}")))?;
            let (start, end) = range
                .split_once('-')
                .ok_or_else(|| ScheduleError::Parse(format!("missing time range in {s:?}")))?;
            let window = WeeklyWindow::new(days.parse()?, parse_hhmm(start)?, parse_hhmm(end)?)?;
            return Ok(MeetingTime::Weekly(window));
        }
        Err(ScheduleError::Parse(format!(
            "invalid meeting time {s:?}: expected \"daily:P\", \"weekly:DAYS:HH:MM-HH:MM\", or \"none\""
        )))
    }
}

fn parse_hhmm(s: &str) -> Result<u16, ScheduleError> {
    let invalid = || ScheduleError::Parse(format!("invalid clock time {s:?}"));
    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    let h: u16 = h.parse().map_err(|_| invalid())?;
    let m: u16 = m.parse().map_err(|_| invalid())?;
    if h > 24 || m >= 60 || (h == 24 && m != 0) {
        return Err(invalid());
    }
    Ok(h * 60 + m)
}
