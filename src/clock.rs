//! Time source used for issuing and checking expirations.
//!
//! The `exp` header is a zone-less wall-clock string, so a clock is both a
//! source of "now" and the zone that wall times are rendered in and read back
//! from. Issuer and checker must agree on that zone or expirations drift by
//! the offset difference.

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};

pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Renders an instant as wall-clock time in this clock's zone.
    fn to_wall_time(&self, instant: DateTime<Utc>) -> NaiveDateTime;

    /// Interprets a wall-clock time in this clock's zone.
    fn from_wall_time(&self, wall: NaiveDateTime) -> Option<DateTime<Utc>>;
}

/// Process clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn to_wall_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&Local).naive_local()
    }

    fn from_wall_time(&self, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        resolve_local(&Local, wall)
    }
}

/// Clock frozen at one instant with a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        FixedClock { instant, offset }
    }

    /// Fixed clock reading UTC wall times.
    pub fn utc(instant: DateTime<Utc>) -> Self {
        FixedClock::new(instant, Utc.fix())
    }

    /// Copy of this clock moved by `seconds` (negative moves back).
    pub fn advance(&self, seconds: i64) -> Self {
        FixedClock {
            instant: self.instant + Duration::seconds(seconds),
            offset: self.offset,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn to_wall_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }

    fn from_wall_time(&self, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        resolve_local(&self.offset, wall)
    }
}

// Earliest instant for a DST fold; times inside a DST gap are read with the
// offset in force just before the gap, which lands them after it.
fn resolve_local<Tz: TimeZone>(zone: &Tz, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = wall.checked_sub_signed(Duration::hours(1))?;
            let offset = zone.offset_from_utc_datetime(&before).fix();
            let utc = wall.checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))?;
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}
