//! Daylight saving rules from POSIX TZ strings.
//!
//! Each station observes the civil time of a single region, and the encoders only need two facts
//! about that region: its UTC offset and whether DST is in effect. This module parses the
//! [TZ string] subset that expresses both (`std offset [dst [offset] ,start[/time] ,end[/time]]`)
//! and evaluates it for arbitrary Unix timestamps.
//!
//! Unsupported TZ string features:
//! - **Quoted names** (`<+05>-5`). Use alphabetic names instead.
//! - **Timezone names**. Names are validated and discarded.
//!
//! [TZ string]: https://www.gnu.org/software/libc/manual/html_node/TZ-Variable.html
//!
//! # Examples
//!
//! ```
//! # use time::{CivilTime, DstContext, tz::{Timezone, TzInfo}};
//! let berlin = Timezone::parse(b"CET-1CEST,M3.5.0,M10.5.0/3").unwrap();
//!
//! // Sun, Mar 30 2025 01:00:00 UTC, the moment CEST begins
//! assert_eq!(berlin.info(1743296400), TzInfo { utoff: 7200, isdst: true });
//! assert_eq!(berlin.civil(1743296400), Some(CivilTime::new(2025, 3, 30, 3, 0, 0).with_dst(true)));
//! assert_eq!(berlin.dst_context(1743296400), DstContext { today: false, tomorrow: true });
//!
//! // The minute after 01:59 CET that morning is 03:00 CEST
//! let t = CivilTime::new(2025, 3, 30, 1, 59, 0);
//! assert_eq!(berlin.next_minute(&t), CivilTime::new(2025, 3, 30, 3, 0, 0).with_dst(true));
//! ```

use core::{error, fmt, str::FromStr};
use crate::civil::{
	days_from_civil,
	days_per_month,
	isleapyear,
	wday_from_ymd,
	CivilTime,
	DstContext,
	SECONDS_PER_DAY
};

/// The error type for parsing TZ strings.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TzStringError {
	/// Empty input.
	MissingTzString,
	/// A timezone name was missing or shorter than three characters.
	InvalidName,
	/// An offset or transition time was missing or malformed.
	InvalidTime,
	/// An offset or transition time component was out of range.
	TimeOutOfRange,
	/// DST was named but its start/end rules were missing.
	MissingTzDateRule,
	/// A date rule did not start with `J`, `M`, or a digit.
	InvalidTzDateRuleSpecifier,
	/// A date rule component was out of range.
	DateOutOfRange,
	/// Found unexpected bytes after a valid TZ string.
	UnexpectedInput
}

impl fmt::Display for TzStringError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TzStringError::MissingTzString => f.write_str("Missing TZ string"),
			TzStringError::InvalidName => f.write_str("Invalid timezone name"),
			TzStringError::InvalidTime => f.write_str("Invalid offset or transition time"),
			TzStringError::TimeOutOfRange => f.write_str("Time component out of range"),
			TzStringError::MissingTzDateRule => f.write_str("Missing TZ date rule"),
			TzStringError::InvalidTzDateRuleSpecifier => f.write_str("Invalid date rule"),
			TzStringError::DateOutOfRange => f.write_str("Date component out of range"),
			TzStringError::UnexpectedInput => f.write_str("Unexpected input at end of TZ string")
		}
	}
}

impl fmt::Debug for TzStringError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl error::Error for TzStringError {}

/// Timezone information at a moment in time.
///
/// `utoff` is added to UTC to get local time: New York in winter is `-18000`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct TzInfo {
	/// The UTC offset in seconds
	pub utoff: i32,
	/// Whether daylight saving time is in effect
	pub isdst: bool
}

/// The day on which a DST transition happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateRule {
	/// `Jn`: day `n` in [1, 365], never counting February 29.
	Julian(u16),
	/// `n`: zero-based day `n` in [0, 365], counting February 29.
	Ordinal(u16),
	/// `Mm.w.d`: weekday `d` (0 = Sunday) of week `w` in [1, 5] of month `m`. Week 5 means the
	/// last such weekday.
	Weekday(u8, u8, u8)
}

impl DateRule {
	/// Days since the Unix epoch of this rule's date in `year`.
	///
	/// # Examples
	///
	/// ```
	/// # use time::tz::DateRule;
	/// assert_eq!(DateRule::Julian(60).days(2024), 19783);         // Mar 1, 2024
	/// assert_eq!(DateRule::Ordinal(59).days(2024), 19782);        // Feb 29, 2024
	/// assert_eq!(DateRule::Weekday(3, 5, 0).days(2025), 20177);   // Mar 30, 2025
	/// ```
	pub fn days(&self, year: u16) -> i64 {
		let jan1 = days_from_civil(year as i64, 1, 1);
		match *self {
			DateRule::Julian(n) => {
				let skip_leap = (n >= 60 && isleapyear(year)) as i64;
				jan1 + n as i64 - 1 + skip_leap
			},
			DateRule::Ordinal(n) => jan1 + n as i64,
			DateRule::Weekday(m, w, d) => {
				let first = wday_from_ymd(year, m, 1);
				let mut day = 1 + (d % 7 + 7 - first) % 7 + 7 * (w.clamp(1, 5) - 1);
				let last = days_per_month(year, m);
				while day > last {
					day -= 7;
				}
				days_from_civil(year as i64, m, day)
			}
		}
	}
}

/// One DST transition: a date and the local time of day (seconds) it happens at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	/// Day of the transition
	pub date: DateRule,
	/// Local wall clock time of the transition, in seconds; may be negative or exceed one day
	pub time: i32
}

/// Daylight saving configuration: DST offset plus start and end transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DstRule {
	/// UTC offset during DST, in seconds
	pub utoff: i32,
	/// Transition from standard time to DST
	pub start: Transition,
	/// Transition from DST back to standard time
	pub end: Transition
}

/// A timezone described by a TZ string.
///
/// # Examples
///
/// ```
/// # use time::tz::{Timezone, TzInfo};
/// let ny: Timezone = "EST5EDT,M3.2.0,M11.1.0".parse().unwrap();
/// assert_eq!(ny.info(1710053999), TzInfo { utoff: -18000, isdst: false });
/// assert_eq!(ny.info(1710054000), TzInfo { utoff: -14400, isdst: true });
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timezone {
	/// UTC offset during standard time, in seconds
	pub utoff: i32,
	/// Optional DST configuration
	pub dst: Option<DstRule>
}

impl Timezone {
	/// Coordinated Universal Time, with no DST.
	pub const UTC: Timezone = Timezone { utoff: 0, dst: None };

	/// Parse a TZ string.
	///
	/// Offsets in TZ strings are west positive (`EST5`); they are stored east positive. When the
	/// DST offset is omitted it defaults to one hour ahead of standard time, and omitted transition
	/// times default to 02:00 local.
	///
	/// # Errors
	///
	/// Returns [`TzStringError`] if the TZ string is malformed, uses an unsupported feature, or has
	/// anything after the last rule.
	///
	/// # Examples
	///
	/// ```
	/// # use time::tz::{Timezone, TzStringError};
	/// assert_eq!(Timezone::parse(b"JST-9").unwrap().utoff, 32400);
	/// assert_eq!(Timezone::parse(b"EST"), Err(TzStringError::InvalidTime));
	/// assert_eq!(Timezone::parse(b"EST5EDT"), Err(TzStringError::MissingTzDateRule));
	/// ```
	pub fn parse(bytes: &[u8]) -> Result<Timezone, TzStringError> {
		if bytes.is_empty() {
			return Err(TzStringError::MissingTzString);
		}

		let mut c = Cursor { bytes, pos: 0 };
		c.name()?;
		let utoff = -c.time(24)?;

		let dst = if c.at_end() {
			None
		} else {
			c.name()?;
			let dstoff = match c.peek() {
				Some(b',') | None => utoff + 3600,
				Some(_) => -c.time(24)?
			};
			let start = c.transition()?;
			let end = c.transition()?;
			Some(DstRule { utoff: dstoff, start, end })
		};

		if c.at_end() {
			Ok(Timezone { utoff, dst })
		} else {
			Err(TzStringError::UnexpectedInput)
		}
	}

	/// Get timezone info for a given Unix timestamp.
	///
	/// Transition dates are evaluated in the UTC year of `time`.
	pub fn info(&self, time: i64) -> TzInfo {
		let Some(dst) = self.dst else {
			return TzInfo { utoff: self.utoff, isdst: false };
		};

		let year = match CivilTime::from_timestamp(time, 0, false) {
			Some(t) => t.year,
			None => 1970
		};
		// Transition times are local wall clock, so subtract the offset in effect just before
		let start = dst.start.date.days(year) * SECONDS_PER_DAY + dst.start.time as i64 - self.utoff as i64;
		let end = dst.end.date.days(year) * SECONDS_PER_DAY + dst.end.time as i64 - dst.utoff as i64;
		// Southern hemisphere rules have the end before the start
		let isdst = if start < end {
			start <= time && time < end
		} else {
			time < end || start <= time
		};

		TzInfo {
			utoff: if isdst { dst.utoff } else { self.utoff },
			isdst
		}
	}

	/// Local civil time for a given Unix timestamp, or `None` before the Unix epoch.
	pub fn civil(&self, time: i64) -> Option<CivilTime> {
		let info = self.info(time);
		CivilTime::from_timestamp(time, info.utoff, info.isdst)
	}

	/// The civil time one minute after `time`, renormalized through this timezone.
	///
	/// `time` is read as local wall clock time, with [`CivilTime::isdst`] choosing the offset, so
	/// the repeated hour after DST ends is unambiguous. Unlike [`CivilTime::next_minute`], the
	/// result follows DST transitions: in Berlin, 01:59 CET on the last Sunday of March is
	/// followed by 03:00 CEST. Falls back to [`CivilTime::next_minute`] if the result cannot be
	/// represented.
	///
	/// # Examples
	///
	/// ```
	/// # use time::{tz::Timezone, CivilTime};
	/// let london = Timezone::parse(b"GMT0BST,M3.5.0/1,M10.5.0").unwrap();
	/// let t = CivilTime::new(2025, 10, 26, 1, 59, 0).with_dst(true);
	/// assert_eq!(london.next_minute(&t), CivilTime::new(2025, 10, 26, 1, 0, 0));
	/// ```
	pub fn next_minute(&self, time: &CivilTime) -> CivilTime {
		let instant = time.timestamp() - self.utoff_for(time.isdst) as i64 + 60;
		self.civil(instant).unwrap_or_else(|| time.next_minute())
	}

	/// DST state at local midnight starting the day that contains `time`, and at local midnight
	/// starting the following day.
	///
	/// # Examples
	///
	/// ```
	/// # use time::{tz::Timezone, DstContext};
	/// let ny = Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0").unwrap();
	/// // Sun, Mar 9 2025 12:00 UTC is 08:00 EDT, on the day DST begins
	/// assert_eq!(ny.dst_context(1741521600), DstContext { today: false, tomorrow: true });
	/// // Sun, Mar 9 2025 02:00 UTC is still Saturday evening in New York
	/// assert_eq!(ny.dst_context(1741485600), DstContext::steady(false));
	/// ```
	pub fn dst_context(&self, time: i64) -> DstContext {
		let local = time.saturating_add(self.info(time).utoff as i64);
		let midnight = local.saturating_sub(local.rem_euclid(SECONDS_PER_DAY));
		DstContext {
			today: self.info(self.instant(midnight)).isdst,
			tomorrow: self.info(self.instant(midnight.saturating_add(SECONDS_PER_DAY))).isdst
		}
	}

	/// UTC offset in seconds while DST is or is not in effect.
	fn utoff_for(&self, isdst: bool) -> i32 {
		match self.dst {
			Some(dst) if isdst => dst.utoff,
			_ => self.utoff
		}
	}

	/// Unix time of the local wall clock time `wall`, given in seconds since the epoch as if it
	/// were UTC. Wall clock times skipped by DST resolve to the instant of the transition's
	/// standard time reading.
	fn instant(&self, wall: i64) -> i64 {
		let guess = wall.saturating_sub(self.utoff as i64);
		wall.saturating_sub(self.info(guess).utoff as i64)
	}
}

impl FromStr for Timezone {
	type Err = TzStringError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Timezone::parse(s.as_bytes())
	}
}

/// Byte cursor over a TZ string.
struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize
}

impl Cursor<'_> {
	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn at_end(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	/// Consume `b` if it is next.
	fn eat(&mut self, b: u8) -> bool {
		let found = self.peek() == Some(b);
		if found {
			self.pos += 1;
		}
		found
	}

	/// Read an unsigned decimal integer, or `None` if there are no digits.
	fn number(&mut self) -> Option<u32> {
		let start = self.pos;
		let mut r: u32 = 0;
		while let Some(v @ b'0'..=b'9') = self.peek() {
			r = r.saturating_mul(10).saturating_add((v - b'0') as u32);
			self.pos += 1;
		}
		(self.pos > start).then_some(r)
	}

	/// Read an alphabetic timezone name of at least three characters.
	fn name(&mut self) -> Result<(), TzStringError> {
		let start = self.pos;
		while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
			self.pos += 1;
		}
		if self.pos - start < 3 {
			Err(TzStringError::InvalidName)
		} else {
			Ok(())
		}
	}

	/// Read `[+-]hh[:mm[:ss]]` as signed seconds, with `hh` at most `max_hours`.
	fn time(&mut self, max_hours: u32) -> Result<i32, TzStringError> {
		let sign = if self.eat(b'-') {
			-1
		} else {
			self.eat(b'+');
			1
		};

		let hours = self.number().ok_or(TzStringError::InvalidTime)?;
		if hours > max_hours {
			return Err(TzStringError::TimeOutOfRange);
		}
		let mut seconds = hours * 3600;
		for scale in [60, 1] {
			if !self.eat(b':') { break }
			let v = self.number().ok_or(TzStringError::InvalidTime)?;
			if v > 59 {
				return Err(TzStringError::TimeOutOfRange);
			}
			seconds += v * scale;
		}

		Ok(sign * seconds as i32)
	}

	/// Read `,date[/time]`.
	fn transition(&mut self) -> Result<Transition, TzStringError> {
		if !self.eat(b',') || self.at_end() {
			return Err(TzStringError::MissingTzDateRule);
		}
		let date = self.date_rule()?;
		let time = if self.eat(b'/') { self.time(167)? } else { 7200 };
		Ok(Transition { date, time })
	}

	fn date_rule(&mut self) -> Result<DateRule, TzStringError> {
		let invalid = TzStringError::InvalidTzDateRuleSpecifier;
		match self.peek() {
			Some(b'J') => {
				self.pos += 1;
				match self.number().ok_or(invalid)? {
					n @ 1..=365 => Ok(DateRule::Julian(n as u16)),
					_ => Err(TzStringError::DateOutOfRange)
				}
			},
			Some(b'0'..=b'9') => match self.number().ok_or(invalid)? {
				n @ 0..=365 => Ok(DateRule::Ordinal(n as u16)),
				_ => Err(TzStringError::DateOutOfRange)
			},
			Some(b'M') => {
				self.pos += 1;
				let m = self.number().ok_or(invalid)?;
				if !self.eat(b'.') { return Err(invalid) }
				let w = self.number().ok_or(invalid)?;
				if !self.eat(b'.') { return Err(invalid) }
				let d = self.number().ok_or(invalid)?;
				if !(1..=12).contains(&m) || !(1..=5).contains(&w) || d > 6 {
					return Err(TzStringError::DateOutOfRange);
				}
				Ok(DateRule::Weekday(m as u8, w as u8, d as u8))
			},
			_ => Err(invalid)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_test() {
		assert_eq!(Timezone::parse(b""), Err(TzStringError::MissingTzString));
		assert_eq!(Timezone::parse(b"\n"), Err(TzStringError::InvalidName));
		assert_eq!(Timezone::parse(b"5"), Err(TzStringError::InvalidName));
		assert_eq!(Timezone::parse(b"EST"), Err(TzStringError::InvalidTime));
		assert_eq!(Timezone::parse(b"EST25"), Err(TzStringError::TimeOutOfRange));
		assert_eq!(Timezone::parse(b"EST5:70"), Err(TzStringError::TimeOutOfRange));
		assert_eq!(Timezone::parse(b"EST5:"), Err(TzStringError::InvalidTime));
		assert_eq!(Timezone::parse(b"EST5EDT"), Err(TzStringError::MissingTzDateRule));
		assert_eq!(Timezone::parse(b"EST5EDT,M3.2.0"), Err(TzStringError::MissingTzDateRule));
		assert_eq!(Timezone::parse(b"EST5EDT,X3,M11.1.0"), Err(TzStringError::InvalidTzDateRuleSpecifier));
		assert_eq!(Timezone::parse(b"EST5EDT,M3.2,M11.1.0"), Err(TzStringError::InvalidTzDateRuleSpecifier));
		assert_eq!(Timezone::parse(b"EST5EDT,M13.2.0,M11.1.0"), Err(TzStringError::DateOutOfRange));
		assert_eq!(Timezone::parse(b"EST5EDT,M3.6.0,M11.1.0"), Err(TzStringError::DateOutOfRange));
		assert_eq!(Timezone::parse(b"EST5EDT,M3.2.7,M11.1.0"), Err(TzStringError::DateOutOfRange));
		assert_eq!(Timezone::parse(b"EST5EDT,J0,J365"), Err(TzStringError::DateOutOfRange));
		assert_eq!(Timezone::parse(b"EST5EDT,1,366"), Err(TzStringError::DateOutOfRange));
		assert_eq!(Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0x"), Err(TzStringError::UnexpectedInput));

		assert_eq!(Timezone::parse(b"UTC0"), Ok(Timezone::UTC));
		assert_eq!(Timezone::parse(b"JST-9"), Ok(Timezone { utoff: 32400, dst: None }));
		assert_eq!(Timezone::parse(b"CET-1CEST,M3.5.0,M10.5.0/3"), Ok(Timezone {
			utoff: 3600,
			dst: Some(DstRule {
				utoff: 7200,
				start: Transition { date: DateRule::Weekday(3, 5, 0), time: 7200 },
				end: Transition { date: DateRule::Weekday(10, 5, 0), time: 10800 }
			})
		}));
		assert_eq!(Timezone::parse(b"GMT0BST,M3.5.0/1,M10.5.0"), Ok(Timezone {
			utoff: 0,
			dst: Some(DstRule {
				utoff: 3600,
				start: Transition { date: DateRule::Weekday(3, 5, 0), time: 3600 },
				end: Transition { date: DateRule::Weekday(10, 5, 0), time: 7200 }
			})
		}));
		assert_eq!(Timezone::parse(b"XXX4:30YYY6:45,25/3:10:30,J280/-1:20"), Ok(Timezone {
			utoff: -16200,
			dst: Some(DstRule {
				utoff: -24300,
				start: Transition { date: DateRule::Ordinal(25), time: 11430 },
				end: Transition { date: DateRule::Julian(280), time: -4800 }
			})
		}));
		assert_eq!("IST-2IDT,M3.4.4/26,M10.5.0".parse::<Timezone>().map(|t| t.dst.map(|d| d.start.time)), Ok(Some(93600)));
	}

	#[test]
	fn date_rule_test() {
		assert_eq!(DateRule::Ordinal(0).days(2024) * SECONDS_PER_DAY, 1704067200);
		assert_eq!(DateRule::Ordinal(59).days(2024) * SECONDS_PER_DAY, 1709164800);
		assert_eq!(DateRule::Julian(1).days(2024) * SECONDS_PER_DAY, 1704067200);
		assert_eq!(DateRule::Julian(59).days(2024) * SECONDS_PER_DAY, 1709078400);
		assert_eq!(DateRule::Julian(60).days(2024) * SECONDS_PER_DAY, 1709251200);
		assert_eq!(DateRule::Julian(365).days(2024) * SECONDS_PER_DAY, 1735603200);
		assert_eq!(DateRule::Weekday(1, 1, 0).days(2024) * SECONDS_PER_DAY, 1704585600);
		assert_eq!(DateRule::Weekday(1, 1, 1).days(2024) * SECONDS_PER_DAY, 1704067200);
		assert_eq!(DateRule::Weekday(1, 5, 0).days(2024) * SECONDS_PER_DAY, 1706400000);
		assert_eq!(DateRule::Weekday(1, 5, 1).days(2024) * SECONDS_PER_DAY, 1706486400);
		assert_eq!(DateRule::Weekday(9, 5, 5).days(2024) * SECONDS_PER_DAY, 1727395200);
		// US 2025: Mar 9 and Nov 2
		assert_eq!(DateRule::Weekday(3, 2, 0).days(2025), days_from_civil(2025, 3, 9));
		assert_eq!(DateRule::Weekday(11, 1, 0).days(2025), days_from_civil(2025, 11, 2));
		// EU 2025: Mar 30 and Oct 26
		assert_eq!(DateRule::Weekday(3, 5, 0).days(2025), days_from_civil(2025, 3, 30));
		assert_eq!(DateRule::Weekday(10, 5, 0).days(2025), days_from_civil(2025, 10, 26));

		// Extreme inputs must not panic
		DateRule::Ordinal(365).days(u16::MAX);
		DateRule::Julian(365).days(0);
		DateRule::Weekday(12, 5, 6).days(u16::MAX);
		DateRule::Weekday(u8::MAX, u8::MAX, u8::MAX).days(2025);
	}

	#[test]
	fn info_test() {
		let ny = Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0").unwrap();
		assert_eq!(ny.info(1704672000), TzInfo { utoff: -18000, isdst: false });
		assert_eq!(ny.info(1710053999), TzInfo { utoff: -18000, isdst: false });
		assert_eq!(ny.info(1710054000), TzInfo { utoff: -14400, isdst: true });
		assert_eq!(ny.info(1730613599), TzInfo { utoff: -14400, isdst: true });
		assert_eq!(ny.info(1730613600), TzInfo { utoff: -18000, isdst: false });

		let ny = Timezone::parse(b"EST5EDT,M3.2.0/4,M11.1.0/-2").unwrap();
		assert_eq!(ny.info(1710061199).isdst, false);
		assert_eq!(ny.info(1710061200).isdst, true);
		assert_eq!(ny.info(1730599199).isdst, true);
		assert_eq!(ny.info(1730599200).isdst, false);

		let london = Timezone::parse(b"GMT0BST,M3.5.0/1,M10.5.0").unwrap();
		assert_eq!(london.info(1743296399), TzInfo { utoff: 0, isdst: false });
		assert_eq!(london.info(1743296400), TzInfo { utoff: 3600, isdst: true });
		assert_eq!(london.info(1761440399), TzInfo { utoff: 3600, isdst: true });
		assert_eq!(london.info(1761440400), TzInfo { utoff: 0, isdst: false });

		// Southern hemisphere: DST spans the new year
		let sydney = Timezone::parse(b"AEST-10AEDT,M10.1.0,M4.1.0/3").unwrap();
		assert_eq!(sydney.info(1704067200).isdst, true);
		assert_eq!(sydney.info(1719792000).isdst, false);

		let tokyo = Timezone::parse(b"JST-9").unwrap();
		assert_eq!(tokyo.info(1719792000), TzInfo { utoff: 32400, isdst: false });

		// Extreme inputs must not panic
		ny.info(i64::MIN);
		ny.info(i64::MAX);
	}

	#[test]
	fn civil_test() {
		let tokyo = Timezone::parse(b"JST-9").unwrap();
		assert_eq!(tokyo.civil(1767225540), Some(CivilTime::new(2026, 1, 1, 8, 59, 0)));
		assert_eq!(tokyo.civil(-1), None);

		let ny = Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0").unwrap();
		assert_eq!(ny.civil(1723433665), Some(CivilTime::new(2024, 8, 11, 23, 34, 25).with_dst(true)));
	}

	#[test]
	fn dst_context_test() {
		let ny = Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0").unwrap();
		// Sun, Mar 9 2025 08:00 EDT: the local day started in EST, the next one starts in EDT
		assert_eq!(ny.dst_context(1741521600), DstContext { today: false, tomorrow: true });
		// Sun, Nov 2 2025 07:00 EST: the local day started in EDT
		assert_eq!(ny.dst_context(1762084800), DstContext { today: true, tomorrow: false });
		// Jul 1 2025 and Jan 15 2025
		assert_eq!(ny.dst_context(1751371200), DstContext::steady(true));
		assert_eq!(ny.dst_context(1736942400), DstContext::steady(false));
		assert_eq!(Timezone::UTC.dst_context(1751371200), DstContext::steady(false));

		// Between 00:00 UTC and local midnight the local day is still the previous one
		// Sat, Mar 8 2025 21:00 EST (Mar 9 02:00 UTC)
		assert_eq!(ny.dst_context(1741485600), DstContext::steady(false));
		// Sat, Mar 8 2025 23:59:59 EST, and the first second of Sunday
		assert_eq!(ny.dst_context(1741496399), DstContext::steady(false));
		assert_eq!(ny.dst_context(1741496400), DstContext { today: false, tomorrow: true });
		// Sat, Nov 1 2025 21:00 EDT (Nov 2 01:00 UTC)
		assert_eq!(ny.dst_context(1762045200), DstContext::steady(true));
		// Sun, Nov 2 2025 23:30 EST (Nov 3 04:30 UTC)
		assert_eq!(ny.dst_context(1762144200), DstContext { today: true, tomorrow: false });

		// East of UTC the local day starts before 00:00 UTC
		let berlin = Timezone::parse(b"CET-1CEST,M3.5.0,M10.5.0/3").unwrap();
		// Sun, Mar 30 2025 00:30 CET (Mar 29 23:30 UTC)
		assert_eq!(berlin.dst_context(1743291000), DstContext { today: false, tomorrow: true });
		// Sat, Mar 29 2025 23:30 CET
		assert_eq!(berlin.dst_context(1743287400), DstContext::steady(false));

		// Transitions at local midnight must not panic or loop
		let midnight = Timezone::parse(b"XXX3YYY,M3.2.0/0,M11.1.0/0").unwrap();
		midnight.dst_context(1741485600);
		midnight.dst_context(i64::MAX);
		midnight.dst_context(i64::MIN);
	}

	#[test]
	fn next_minute_test() {
		let berlin = Timezone::parse(b"CET-1CEST,M3.5.0,M10.5.0/3").unwrap();
		let london = Timezone::parse(b"GMT0BST,M3.5.0/1,M10.5.0").unwrap();

		// Spring forward skips the missing hour
		let t = CivilTime::new(2025, 3, 30, 1, 59, 0);
		assert_eq!(berlin.next_minute(&t), CivilTime::new(2025, 3, 30, 3, 0, 0).with_dst(true));
		let t = CivilTime::new(2025, 3, 30, 0, 59, 0);
		assert_eq!(london.next_minute(&t), CivilTime::new(2025, 3, 30, 2, 0, 0).with_dst(true));

		// Fall back repeats the last hour of DST in standard time
		let t = CivilTime::new(2025, 10, 26, 2, 59, 0).with_dst(true);
		assert_eq!(berlin.next_minute(&t), CivilTime::new(2025, 10, 26, 2, 0, 0));
		let t = CivilTime::new(2025, 10, 26, 2, 59, 0);
		assert_eq!(berlin.next_minute(&t), CivilTime::new(2025, 10, 26, 3, 0, 0));
		let t = CivilTime::new(2025, 10, 26, 1, 59, 0).with_dst(true);
		assert_eq!(london.next_minute(&t), CivilTime::new(2025, 10, 26, 1, 0, 0));

		// Away from transitions it agrees with the calendar step
		for t in [
			CivilTime::new(2025, 12, 31, 23, 59, 0),
			CivilTime::new(2024, 2, 28, 23, 59, 0),
			CivilTime::new(2025, 6, 30, 23, 59, 0).with_dst(true)
		] {
			assert_eq!(berlin.next_minute(&t), t.next_minute());
		}
		assert_eq!(Timezone::UTC.next_minute(&CivilTime::new(2099, 12, 31, 23, 59, 0)), CivilTime::new(2100, 1, 1, 0, 0, 0));

		// Garbage and unrepresentable inputs fall back instead of panicking
		let garbage = CivilTime {
			sec: u8::MAX,
			min: u8::MAX,
			hour: u8::MAX,
			day: u8::MAX,
			mon: u8::MAX,
			year: u16::MAX,
			wday: u8::MAX,
			yday: u16::MAX,
			isdst: true
		};
		berlin.next_minute(&garbage);
		let t = CivilTime::new(1970, 1, 1, 0, 0, 0);
		assert_eq!(berlin.next_minute(&t), t.next_minute());
	}
}
