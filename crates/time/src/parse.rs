//! Parse date time strings like `YYYY-MM-DD HH:mm:ss.sss`.
//!
//! Used to pick the starting minute of a transmission instead of reading the system clock.
//!
//! # Examples
//! ```
//! # use time::{parse_timestamp, TimeSpec};
//! assert_eq!(
//! 	parse_timestamp(b"2008-03-06T07:30Z"),
//! 	Ok(TimeSpec { sec: 1204788600, nsec: 0 })
//! );
//! assert_eq!(
//! 	parse_timestamp(b"2025-02-18 12:30:45 -01:00"),
//! 	Ok(TimeSpec { sec: 1739885445, nsec: 0 })
//! );
//! ```

use core::{error, fmt};
use crate::civil::{days_per_month, timestamp_from_ymd};
use crate::clock::TimeSpec;

/// Error type for parsing date time strings.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
	/// Expected a year, but it was missing or malformed.
	MissingYear,
	/// Expected a month, but it was missing or malformed.
	MissingMonth,
	/// The supplied month was outside of [1, 12].
	MonthOutOfRange,
	/// Expected a day, but it was missing or malformed.
	MissingDay,
	/// The supplied day was outside of the month.
	DayOutOfRange,
	/// Expected hours, but they were missing or malformed.
	MissingHours,
	/// The supplied hour was outside of [0, 23].
	HoursOutOfRange,
	/// Hours were supplied but minutes were missing.
	MissingMinutes,
	/// The supplied minutes were outside of [0, 59].
	MinutesOutOfRange,
	/// Expected seconds, but they were missing or malformed.
	MissingSeconds,
	/// The supplied seconds were outside of [0, 59].
	SecondsOutOfRange,
	/// Expected milliseconds, but they were missing or malformed.
	MissingMilliseconds,
	/// Found unexpected bytes after a valid date time string.
	UnexpectedInput
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ParseError::MissingYear => "Year missing or malformed",
			ParseError::MissingMonth => "Month missing or malformed",
			ParseError::MonthOutOfRange => "Month out of range",
			ParseError::MissingDay => "Day missing or malformed",
			ParseError::DayOutOfRange => "Day out of range",
			ParseError::MissingHours => "Hours missing or malformed",
			ParseError::HoursOutOfRange => "Hours out of range",
			ParseError::MissingMinutes => "Minutes missing or malformed",
			ParseError::MinutesOutOfRange => "Minutes out of range",
			ParseError::MissingSeconds => "Seconds missing or malformed",
			ParseError::SecondsOutOfRange => "Seconds out of range",
			ParseError::MissingMilliseconds => "Milliseconds missing or malformed",
			ParseError::UnexpectedInput => "Unexpected input at end of date time string"
		})
	}
}

impl fmt::Debug for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl error::Error for ParseError {}

struct Reader<'a> {
	rest: &'a [u8]
}

impl Reader<'_> {
	fn done(&self) -> bool {
		self.rest.is_empty()
	}

	/// Consume the next byte if it is one of `options`.
	fn separator(&mut self, options: &[u8]) -> bool {
		match self.rest.split_first() {
			Some((b, rest)) if options.contains(b) => {
				self.rest = rest;
				true
			},
			_ => false
		}
	}

	/// Read exactly `n` decimal digits. `n` is at most 4, so the result always fits.
	fn digits(&mut self, n: usize, e: ParseError) -> Result<u16, ParseError> {
		let (head, rest) = self.rest.split_at_checked(n).ok_or(e)?;
		let mut r: u16 = 0;
		for &b in head {
			if !b.is_ascii_digit() {
				return Err(e);
			}
			r = r * 10 + (b - b'0') as u16;
		}
		self.rest = rest;
		Ok(r)
	}

	/// Read a two digit field preceded by `sep` and bounded by `max`.
	fn field(&mut self, sep: &[u8], max: u16, missing: ParseError, range: ParseError) -> Result<u16, ParseError> {
		if !self.separator(sep) {
			return Err(ParseError::UnexpectedInput);
		}
		match self.digits(2, missing)? {
			v if v > max => Err(range),
			v => Ok(v)
		}
	}
}

/// Parse a date time string into a Unix timestamp.
///
/// Accepted forms, where every omitted trailing field is zero and the month and day default to 1:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `YYYY-MM-DDTHH:mm`, optionally followed by `:ss` and then `.sss`
/// - Any form with a time, followed by `Z`, `+HH:mm`, or `-HH:mm`, optionally after a space
///
/// The separator between date and time may be `T` or a space. Without an offset the time is UTC.
///
/// # Errors
///
/// Returns [`ParseError`] if the input was malformed, out of range, or followed by extra bytes.
///
/// # Examples
/// ```
/// # use time::{parse_timestamp, ParseError, TimeSpec};
/// assert_eq!(parse_timestamp(b"2025"), Ok(TimeSpec { sec: 1735689600, nsec: 0 }));
/// assert_eq!(parse_timestamp(b"2025-02-18T12:30:45.123"), Ok(TimeSpec { sec: 1739881845, nsec: 123000000 }));
/// assert_eq!(parse_timestamp(b"2025-02-29"), Err(ParseError::DayOutOfRange));
/// ```
pub fn parse_timestamp(bytes: &[u8]) -> Result<TimeSpec, ParseError> {
	let mut r = Reader { rest: bytes };

	let year = r.digits(4, ParseError::MissingYear)?;
	let month = if r.done() {
		1
	} else {
		r.field(b"-", 12, ParseError::MissingMonth, ParseError::MonthOutOfRange)?
	};
	if month == 0 {
		return Err(ParseError::MonthOutOfRange);
	}
	let day = if r.done() {
		1
	} else {
		r.field(b"-", 31, ParseError::MissingDay, ParseError::DayOutOfRange)?
	};
	if day == 0 || day > days_per_month(year, month as u8) as u16 {
		return Err(ParseError::DayOutOfRange);
	}

	let mut ts = TimeSpec { sec: timestamp_from_ymd(year, month as u8, day as u8), nsec: 0 };
	if r.done() {
		return Ok(ts);
	}

	let hours = r.field(b"T ", 23, ParseError::MissingHours, ParseError::HoursOutOfRange)?;
	if r.done() {
		return Err(ParseError::MissingMinutes);
	}
	let minutes = r.field(b":", 59, ParseError::MissingMinutes, ParseError::MinutesOutOfRange)?;
	ts.sec += hours as i64 * 3600 + minutes as i64 * 60;

	if r.separator(b":") {
		match r.digits(2, ParseError::MissingSeconds)? {
			s @ 0..=59 => ts.sec += s as i64,
			_ => return Err(ParseError::SecondsOutOfRange)
		}
		if r.separator(b".") {
			ts.nsec = r.digits(3, ParseError::MissingMilliseconds)? as i64 * 1_000_000;
		}
	}
	if r.done() {
		return Ok(ts);
	}

	r.separator(b" ");
	let sign = if r.separator(b"Z") {
		return if r.done() { Ok(ts) } else { Err(ParseError::UnexpectedInput) };
	} else if r.separator(b"+") {
		-1
	} else if r.separator(b"-") {
		1
	} else {
		return Err(ParseError::UnexpectedInput);
	};

	let hours = match r.digits(2, ParseError::MissingHours)? {
		h @ 0..=23 => h,
		_ => return Err(ParseError::HoursOutOfRange)
	};
	if !r.separator(b":") {
		return Err(ParseError::MissingMinutes);
	}
	let minutes = match r.digits(2, ParseError::MissingMinutes)? {
		m @ 0..=59 => m,
		_ => return Err(ParseError::MinutesOutOfRange)
	};
	ts.sec += sign * (hours as i64 * 3600 + minutes as i64 * 60);

	if r.done() {
		Ok(ts)
	} else {
		Err(ParseError::UnexpectedInput)
	}
}
