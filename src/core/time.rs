use serde::{Serialize, Serializer};
use std::fmt;

/// Hour/minute pair used for event timestamps and accumulated durations.
///
/// Fields are not clamped: `hour` may exceed 23 and, for durations, `minute`
/// may exceed 59 (see [`Time::accumulate_stay`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
    pub hour: u16,
    pub minute: u16,
}

impl Time {
    pub const ZERO: Time = Time { hour: 0, minute: 0 };

    pub fn new(hour: u16, minute: u16) -> Self {
        Self { hour, minute }
    }

    /// Parse a strict `HH:MM` field.
    ///
    /// Every character except position 2 must be an ASCII digit and position
    /// 2 must be `:`. Returns `None` for anything else, including slices that
    /// are not exactly five bytes long.
    pub fn parse_field(field: &str) -> Option<Time> {
        let bytes = field.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }

        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !digits_ok {
            return None;
        }

        let two = |hi: u8, lo: u8| u16::from(hi - b'0') * 10 + u16::from(lo - b'0');
        Some(Time {
            hour: two(bytes[0], bytes[1]),
            minute: two(bytes[3], bytes[4]),
        })
    }

    /// Add the stay `start..end` to this accumulated duration.
    ///
    /// Minute deltas carry into the hour at most once and only when the
    /// minute delta is non-negative. A negative minute delta borrows an hour
    /// and adds `60 + dm` minutes without a carry. A stay that ends before it
    /// starts contributes nothing.
    pub fn accumulate_stay(&mut self, start: Time, end: Time) {
        if end < start {
            return;
        }

        let dh = i32::from(end.hour) - i32::from(start.hour);
        let dm = i32::from(end.minute) - i32::from(start.minute);

        if dm >= 0 {
            self.minute = self.minute.saturating_add(dm as u16);
            if self.minute >= 60 {
                self.minute -= 60;
                self.hour = self.hour.saturating_add(1);
            }
            self.hour = self.hour.saturating_add(dh as u16);
        } else {
            self.minute = self.minute.saturating_add((60 + dm) as u16);
            self.hour = self.hour.saturating_add((dh - 1) as u16);
        }
    }

    /// Hours charged for a stay `start..end`.
    ///
    /// `dh + 1` whenever `end.minute >= start.minute`, so a stay of exactly N
    /// whole hours is charged N + 1 hours. Zero when `end` precedes `start`.
    pub fn billed_hours(start: Time, end: Time) -> u32 {
        if end < start {
            return 0;
        }
        let dh = u32::from(end.hour - start.hour);
        let extra = if end.minute >= start.minute { 1 } else { 0 };
        dh + extra
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
