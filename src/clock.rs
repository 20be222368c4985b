//! Wall clock and the time/date strings drawn on the face.
//!
//! The clock keeps UTC milliseconds plus the host's current UTC offset.
//! It is advanced on every render and on timezone broadcasts; the renderer
//! only reads it.

use core::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, Timelike, Utc};
use heapless::String;

use crate::error::{Error, Result};

/// `"H:MM"` or `"HH:MM"`.
pub type TimeText = String<8>;

/// `"Mon, 5 Jan"` or `"Mon, Jan 5"`.
pub type DateText = String<16>;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    utc_ms: i64,
    offset: FixedOffset,
}

impl Clock {
    pub fn new(utc_ms: i64, offset: FixedOffset) -> Self {
        Self { utc_ms, offset }
    }

    /// Clock pinned to UTC, used until the host reports a timezone.
    pub fn utc(utc_ms: i64) -> Self {
        Self::new(utc_ms, Utc.fix())
    }

    pub fn set_time(&mut self, utc_ms: i64) {
        self.utc_ms = utc_ms;
    }

    pub fn set_timezone(&mut self, offset: FixedOffset) {
        self.offset = offset;
    }

    pub fn timezone(&self) -> FixedOffset {
        self.offset
    }

    pub fn utc_millis(&self) -> i64 {
        self.utc_ms
    }

    /// Local wall time. Timestamps chrono cannot represent fall back to the epoch.
    pub fn local(&self) -> NaiveDateTime {
        DateTime::from_timestamp_millis(self.utc_ms)
            .map(|utc| utc.with_timezone(&self.offset).naive_local())
            .unwrap_or_default()
    }

    /// Hour and minute, zero-padded hour only in 24-hour mode.
    pub fn time_text(&self, use_24_hour_time: bool) -> Result<TimeText> {
        let local = self.local();
        let hour = display_hour(local.hour(), use_24_hour_time);
        let mut text = TimeText::new();
        let written = if use_24_hour_time {
            write!(text, "{:02}:{:02}", hour, local.minute())
        } else {
            write!(text, "{}:{:02}", hour, local.minute())
        };
        written.map_err(|_| Error::TextOverflow)?;
        Ok(text)
    }

    /// Weekday, day and month with the named fields cut to three letters.
    pub fn date_text(&self, european: bool) -> Result<DateText> {
        let local = self.local();
        let weekday = WEEKDAYS[local.weekday().num_days_from_monday() as usize];
        let month = MONTHS[local.month0() as usize];
        let mut text = DateText::new();
        let written = if european {
            write!(text, "{}, {} {}", weekday, local.day(), month)
        } else {
            write!(text, "{}, {} {}", weekday, month, local.day())
        };
        written.map_err(|_| Error::TextOverflow)?;
        Ok(text)
    }
}

/// Hour as shown on the face: `0..=23` in 24-hour mode, `1..=12` otherwise.
pub fn display_hour(hour: u32, use_24_hour_time: bool) -> u32 {
    if use_24_hour_time {
        hour
    } else {
        match hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn twelve_hour_wraps_midnight_and_noon() {
        assert_eq!(display_hour(0, false), 12);
        assert_eq!(display_hour(12, false), 12);
        assert_eq!(display_hour(13, false), 1);
        assert_eq!(display_hour(23, false), 11);
        for hour in 0..24 {
            let shown = display_hour(hour, false);
            assert!((1..=12).contains(&shown));
        }
    }

    #[test]
    fn time_text_padding_follows_mode() {
        let clock = Clock::utc(at(2024, 1, 1, 0, 0));
        assert_eq!(clock.time_text(false).unwrap().as_str(), "12:00");
        assert_eq!(clock.time_text(true).unwrap().as_str(), "00:00");

        let clock = Clock::utc(at(2024, 1, 1, 13, 0));
        assert_eq!(clock.time_text(false).unwrap().as_str(), "1:00");
        assert_eq!(clock.time_text(true).unwrap().as_str(), "13:00");

        let clock = Clock::utc(at(2024, 1, 1, 9, 5));
        assert_eq!(clock.time_text(true).unwrap().as_str(), "09:05");
        assert_eq!(clock.time_text(false).unwrap().as_str(), "9:05");
    }

    #[test]
    fn twenty_four_hour_text_always_has_two_hour_digits() {
        for hour in 0..24 {
            let clock = Clock::utc(at(2024, 1, 1, hour, 7));
            let text = clock.time_text(true).unwrap();
            assert_eq!(text.len(), 5, "{}", text);
        }
    }

    #[test]
    fn date_text_word_order() {
        // 2024-01-01 was a Monday.
        let clock = Clock::utc(at(2024, 1, 1, 12, 0));
        assert_eq!(clock.date_text(true).unwrap().as_str(), "Mon, 1 Jan");
        assert_eq!(clock.date_text(false).unwrap().as_str(), "Mon, Jan 1");

        let clock = Clock::utc(at(2025, 12, 31, 12, 0));
        assert_eq!(clock.date_text(true).unwrap().as_str(), "Wed, 31 Dec");
        assert_eq!(clock.date_text(false).unwrap().as_str(), "Wed, Dec 31");
    }

    #[test]
    fn timezone_shifts_local_time() {
        let mut clock = Clock::utc(at(2024, 1, 1, 23, 30));
        clock.set_timezone(FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(clock.time_text(true).unwrap().as_str(), "01:30");
        assert_eq!(clock.date_text(true).unwrap().as_str(), "Tue, 2 Jan");

        clock.set_timezone(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(clock.time_text(false).unwrap().as_str(), "6:30");
    }
}
