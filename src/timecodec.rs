//! Time codecs: decimal fraction, UTC timestamp, and ISO 8601 duration.
//!
//! Timestamps are relative to the DTN epoch (2000-01-01T00:00:00Z); the
//! calendar math is UTC-forced and never consults a local zone.

use std::fmt::Write;

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use crate::constants::DTN_EPOCH_POSIX;
use crate::error::TimeError;

/// A time value split into whole seconds and nanoseconds.
///
/// For TP literals `seconds` counts from the DTN epoch; for TD literals it
/// is a signed span. `nanos` is always in `[0, 10^9)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timespec {
    /// Whole seconds.
    pub seconds: i64,
    /// Nanoseconds, in `[0, 10^9)`.
    pub nanos: u32,
}

impl Timespec {
    /// Creates a time value from seconds and nanoseconds.
    #[must_use]
    pub const fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }
}

/// Appends `.ddd` subseconds with trailing zeros stripped; appends nothing
/// for zero.
fn subsec_encode(out: &mut String, nanos: u32) {
    if nanos == 0 {
        return;
    }
    let mut digits: usize = 9;
    let mut value = nanos;
    while value % 10 == 0 {
        value /= 10;
        digits -= 1;
    }
    let _ = write!(out, ".{value:0digits$}");
}

/// Parses an optional `.ddd` subsecond run at the head of `input`, with at
/// most nine digits, right-padded to nanoseconds. Returns the nanoseconds
/// and the unconsumed remainder.
fn subsec_decode(input: &str, offset: usize) -> Result<(u32, &str), TimeError> {
    let Some(rest) = input.strip_prefix('.') else {
        return Ok((0, input));
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return Err(TimeError::MissingDigits { position: offset + 1 });
    }
    if digits > 9 {
        return Err(TimeError::SubsecondsTooLong { digits });
    }
    let mut nanos: u32 = 0;
    for byte in rest[..digits].bytes() {
        nanos = nanos * 10 + u32::from(byte - b'0');
    }
    for _ in digits..9 {
        nanos *= 10;
    }
    Ok((nanos, &rest[digits..]))
}

/// Parses a decimal digit run at the head of `input` as `u64`. Returns the
/// value and the unconsumed remainder.
fn digits_decode(input: &str, offset: usize) -> Result<(u64, &str), TimeError> {
    let len = input.len() - input.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if len == 0 {
        return Err(TimeError::MissingDigits { position: offset });
    }
    let mut value: u64 = 0;
    for byte in input[..len].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(byte - b'0')))
            .ok_or(TimeError::OutOfRange)?;
    }
    Ok((value, &input[len..]))
}

/// Encodes a time value as `<seconds>[.<subsec>]`, appending to `out`.
pub fn decfrac_encode(out: &mut String, value: &Timespec) {
    let _ = write!(out, "{}", value.seconds);
    subsec_encode(out, value.nanos);
}

/// Decodes a decimal-fraction time value.
///
/// # Errors
///
/// Returns [`TimeError`] on missing digits, more than nine subsecond
/// digits, or trailing bytes.
pub fn decfrac_decode(input: &str) -> Result<Timespec, TimeError> {
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let offset = input.len() - rest.len();
    let (magnitude, rest) = digits_decode(rest, offset)?;
    let seconds = i64::try_from(magnitude).map_err(|_| TimeError::OutOfRange)?;
    let seconds = if negative { -seconds } else { seconds };

    let (nanos, rest) = subsec_decode(rest, input.len() - rest.len())?;
    if !rest.is_empty() {
        return Err(TimeError::TrailingInput { remaining: rest.len() });
    }
    Ok(Timespec::new(seconds, nanos))
}

/// Encodes a DTN-relative timestamp as `YYYY-MM-DDTHH:MM:SS[.sss]Z` or the
/// separator-free equivalent, appending to `out`.
///
/// # Errors
///
/// Returns [`TimeError::OutOfRange`] when the instant falls outside the
/// representable calendar range.
pub fn utctime_encode(out: &mut String, value: &Timespec, use_sep: bool) -> Result<(), TimeError> {
    let posix = DTN_EPOCH_POSIX
        .checked_add(value.seconds)
        .ok_or(TimeError::OutOfRange)?;
    let instant = DateTime::from_timestamp(posix, 0).ok_or(TimeError::OutOfRange)?;

    let date = instant.date_naive();
    let time = instant.time();
    if use_sep {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            date.year(),
            date.month(),
            date.day(),
            time.hour(),
            time.minute(),
            time.second()
        );
    } else {
        let _ = write!(
            out,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            date.year(),
            date.month(),
            date.day(),
            time.hour(),
            time.minute(),
            time.second()
        );
    }
    subsec_encode(out, value.nanos);
    out.push('Z');
    Ok(())
}

/// Decodes a UTC timestamp into a DTN-relative time value.
///
/// `-` and `:` separators are stripped anywhere in the input before
/// parsing, so both the separated and compact forms decode.
///
/// # Errors
///
/// Returns [`TimeError`] on an unparseable date, a missing `Z` zone, or
/// trailing bytes.
pub fn utctime_decode(input: &str) -> Result<Timespec, TimeError> {
    let stripped: String = input.chars().filter(|c| !matches!(c, '-' | ':')).collect();

    let t_pos = stripped
        .find('T')
        .ok_or(TimeError::MissingDesignator { expected: 'T' })?;
    let (date_part, rest) = stripped.split_at(t_pos);
    let rest = &rest[1..];

    if date_part.len() < 8 || !date_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::InvalidCalendar);
    }
    let (year_part, monthday) = date_part.split_at(date_part.len() - 4);
    let year: i32 = year_part.parse().map_err(|_| TimeError::InvalidCalendar)?;
    let month: u32 = monthday[..2].parse().map_err(|_| TimeError::InvalidCalendar)?;
    let day: u32 = monthday[2..].parse().map_err(|_| TimeError::InvalidCalendar)?;

    if rest.len() < 6 || !rest.as_bytes()[..6].iter().all(u8::is_ascii_digit) {
        return Err(TimeError::InvalidCalendar);
    }
    let hour: u32 = rest[..2].parse().map_err(|_| TimeError::InvalidCalendar)?;
    let minute: u32 = rest[2..4].parse().map_err(|_| TimeError::InvalidCalendar)?;
    let second: u32 = rest[4..6].parse().map_err(|_| TimeError::InvalidCalendar)?;
    let rest = &rest[6..];

    let datetime = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or(TimeError::InvalidCalendar)?;
    let seconds = datetime.and_utc().timestamp() - DTN_EPOCH_POSIX;

    let (nanos, rest) = subsec_decode(rest, stripped.len() - rest.len())?;
    let rest = rest
        .strip_prefix('Z')
        .ok_or(TimeError::MissingDesignator { expected: 'Z' })?;
    if !rest.is_empty() {
        return Err(TimeError::TrailingInput { remaining: rest.len() });
    }
    Ok(Timespec::new(seconds, nanos))
}

const SECS_PER_DAY: i64 = 24 * 3600;
const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_MINUTE: i64 = 60;

/// Encodes a time span as an ISO 8601 duration, appending to `out`.
///
/// Zero encodes as the canonical `PT0S`. Negative spans take a leading
/// `-`; the sign applies to the whole-second count.
pub fn timeperiod_encode(out: &mut String, value: &Timespec) {
    if value.seconds == 0 && value.nanos == 0 {
        out.push_str("PT0S");
        return;
    }

    let mut seconds = value.seconds;
    if seconds < 0 {
        out.push('-');
        seconds = -seconds;
    }
    out.push('P');

    if seconds >= SECS_PER_DAY {
        let _ = write!(out, "{}D", seconds / SECS_PER_DAY);
        seconds %= SECS_PER_DAY;
    }
    out.push('T');
    if seconds >= SECS_PER_HOUR {
        let _ = write!(out, "{}H", seconds / SECS_PER_HOUR);
        seconds %= SECS_PER_HOUR;
    }
    if seconds >= SECS_PER_MINUTE {
        let _ = write!(out, "{}M", seconds / SECS_PER_MINUTE);
        seconds %= SECS_PER_MINUTE;
    }
    if seconds != 0 || value.nanos != 0 {
        let _ = write!(out, "{seconds}");
        subsec_encode(out, value.nanos);
        out.push('S');
    }
}

/// Decodes an ISO 8601 duration.
///
/// Accepts an optional `+`/`-` sign, a mandatory `P`, an optional day
/// segment, a mandatory `T`, and optional hour, minute, and second
/// segments in that order. The second segment may carry a decimal
/// fraction.
///
/// # Errors
///
/// Returns [`TimeError`] on a missing designator, a segment without
/// digits, or trailing bytes after the final unit.
pub fn timeperiod_decode(input: &str) -> Result<Timespec, TimeError> {
    let (negative, rest) = if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = input.strip_prefix('+') {
        (false, rest)
    } else {
        (false, input)
    };
    let rest = rest
        .strip_prefix('P')
        .ok_or(TimeError::MissingDesignator { expected: 'P' })?;

    let mut seconds: i64 = 0;
    let mut offset = input.len() - rest.len();
    let mut rest = rest;

    if let Some(pos) = rest.find('D') {
        let (value, tail) = digits_decode(&rest[..pos], offset)?;
        if !tail.is_empty() {
            return Err(TimeError::MissingDigits { position: offset });
        }
        seconds = i64::try_from(value)
            .ok()
            .and_then(|v| v.checked_mul(SECS_PER_DAY))
            .ok_or(TimeError::OutOfRange)?;
        rest = &rest[pos + 1..];
        offset = input.len() - rest.len();
    }

    rest = rest
        .strip_prefix('T')
        .ok_or(TimeError::MissingDesignator { expected: 'T' })?;
    offset += 1;

    for (unit, scale) in [('H', SECS_PER_HOUR), ('M', SECS_PER_MINUTE)] {
        if let Some(pos) = rest.find(unit) {
            let (value, tail) = digits_decode(&rest[..pos], offset)?;
            if !tail.is_empty() {
                return Err(TimeError::MissingDigits { position: offset });
            }
            let part = i64::try_from(value)
                .ok()
                .and_then(|v| v.checked_mul(scale))
                .ok_or(TimeError::OutOfRange)?;
            seconds = seconds.checked_add(part).ok_or(TimeError::OutOfRange)?;
            rest = &rest[pos + 1..];
            offset = input.len() - rest.len();
        }
    }

    let mut nanos: u32 = 0;
    if let Some(pos) = rest.find('S') {
        let (value, tail) = digits_decode(&rest[..pos], offset)?;
        let part = i64::try_from(value).map_err(|_| TimeError::OutOfRange)?;
        seconds = seconds.checked_add(part).ok_or(TimeError::OutOfRange)?;
        let (subsec, tail) = subsec_decode(tail, offset + (rest[..pos].len() - tail.len()))?;
        if !tail.is_empty() {
            return Err(TimeError::MissingDigits { position: offset });
        }
        nanos = subsec;
        rest = &rest[pos + 1..];
    }

    if !rest.is_empty() {
        return Err(TimeError::TrailingInput { remaining: rest.len() });
    }

    if negative {
        seconds = -seconds;
    }
    Ok(Timespec::new(seconds, nanos))
}
