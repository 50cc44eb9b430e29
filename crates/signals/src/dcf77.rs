//! Support for the DCF77 amplitude modulated time code.
//!
//! DCF77 announces the *next* minute in Central European local time, stepping through the DST
//! rules of [`CET`] (or another [`Timezone`]) so that the minute after 01:59 CET on the day CEST
//! begins is announced as 03:00 CEST. Each second except the last
//! starts with the carrier reduced for 100 ms (zero) or 200 ms (one); second 59 is left
//! unmodulated so receivers can find the top of the minute. Every data field is sent least
//! significant bit first.
//!
//! | Seconds | Field                                            |
//! | ------- | ------------------------------------------------ |
//! | 0-16    | Weather, call bit, announcements, always zero    |
//! | 17-18   | CEST / CET                                       |
//! | 20      | Start of time, always one                        |
//! | 21-28   | Minute, even parity                              |
//! | 29-35   | Hour, even parity                                |
//! | 36-41   | Day of month                                     |
//! | 42-44   | Day of week, Monday = 1                          |
//! | 45-49   | Month                                            |
//! | 50-57   | Year                                             |
//! | 58      | Even parity over seconds 36-57                   |
//! | 59      | No modulation                                    |
//!
//! See [DCF77 documentation](https://en.wikipedia.org/wiki/DCF77#Time_code_details) for details.
//!
//! # Examples
//!
//! ```
//! # use signals::{dcf77::DCF77, Symbol, TimeCode};
//! # use time::{CivilTime, DstContext};
//! let mut d = DCF77::new();
//!
//! // At 2025-06-01 11:59 CEST the frame for 12:00 is sent
//! d.encode_minute(&CivilTime::new(2025, 6, 1, 11, 59, 0).with_dst(true), DstContext::default());
//! assert_eq!(d.symbol_for_second(17), Symbol::One);
//! assert_eq!(d.symbol_for_second(20), Symbol::One);
//! assert_eq!(d.symbol_for_second(59), Symbol::Idle);
//! ```

use time::{CivilTime, DstContext};
use time::tz::{DateRule, DstRule, Timezone, Transition};
use crate::bits::{at, bcd, lsb_first, parity, Parity};
use crate::{Frame, Symbol, TimeCode};

/// Carrier frequency in Hz.
pub const FREQUENCY: u32 = 77500;

/// Unmodulated second marking the end of the minute.
pub const IDLE_SECOND: usize = 59;

/// Central European Time, `CET-1CEST,M3.5.0,M10.5.0/3`.
pub const CET: Timezone = Timezone {
	utoff: 3600,
	dst: Some(DstRule {
		utoff: 7200,
		start: Transition { date: DateRule::Weekday(3, 5, 0), time: 7200 },
		end: Transition { date: DateRule::Weekday(10, 5, 0), time: 10800 }
	})
};

/// Pack the minute described by `time` into an accumulator (see [`crate::bits`]).
///
/// `time` is the minute being announced, already advanced by one.
///
/// # Examples
/// ```ignore
/// let a = pack(&CivilTime::new(2025, 6, 1, 12, 0, 0).with_dst(true));
/// assert_eq!(a >> at(34) & 0x3f, 0b010010); // Hour 12, LSB first
/// ```
fn pack(time: &CivilTime) -> u64 {
	let mut a = 1 << at(if time.isdst { 17 } else { 18 });
	a |= 1 << at(20);

	a |= lsb_first(bcd(time.min as u32), 21, 7);
	a |= parity(a, at(21), at(27), Parity::Even) << at(28);
	a |= lsb_first(bcd(time.hour as u32), 29, 6);
	a |= parity(a, at(29), at(34), Parity::Even) << at(35);

	// Monday = 1, ..., Sunday = 7
	let wday = match time.wday { 0 => 7, d => d as u64 };
	let date = [
		lsb_first(bcd(time.day as u32), 36, 6),
		lsb_first(wday, 42, 3),
		lsb_first(bcd(time.mon as u32 + 1), 45, 5),
		lsb_first(bcd(time.year as u32 % 100), 50, 8)
	];
	let mut p = 0;
	for f in date {
		a |= f;
		p ^= parity(f, 0, 63, Parity::Even);
	}
	a | (p << at(58))
}

/// Carrier level `millis` milliseconds into a second carrying `symbol`.
///
/// The carrier is reduced for the first 100 ms of a zero and the first 200 ms of a one, and never
/// for [`Symbol::Idle`]. Other symbols are treated as zeros.
///
/// # Examples
///
/// ```
/// # use signals::{dcf77::level, Symbol};
/// assert_eq!(level(Symbol::Zero, 99), false);
/// assert_eq!(level(Symbol::Zero, 100), true);
/// assert_eq!(level(Symbol::One, 150), false);
/// assert_eq!(level(Symbol::Idle, 0), true);
/// ```
pub fn level(symbol: Symbol, millis: u32) -> bool {
	match symbol {
		Symbol::Idle => true,
		Symbol::One => millis >= 200,
		_ => millis >= 100
	}
}

/// DCF77 frame encoder.
///
/// Expects local time in its timezone with [`CivilTime::isdst`] set. [`DstContext`] is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DCF77 {
	frame: Frame,
	timezone: Timezone
}

impl Default for DCF77 {
	fn default() -> Self {
		DCF77::with_timezone(CET)
	}
}

impl DCF77 {
	/// Create a [`CET`] encoder holding an all zero frame.
	pub fn new() -> DCF77 {
		DCF77::default()
	}

	/// Create an encoder that steps through the DST rules of `timezone`.
	pub fn with_timezone(timezone: Timezone) -> DCF77 {
		DCF77 { frame: Frame::default(), timezone }
	}

	/// The timezone used to find the announced minute.
	pub fn timezone(&self) -> &Timezone {
		&self.timezone
	}
}

impl TimeCode for DCF77 {
	fn frequency(&self) -> u32 {
		FREQUENCY
	}

	/// Encode the minute that follows `time`, which is what DCF77 transmits while `time` elapses.
	fn encode_minute(&mut self, time: &CivilTime, _dst: DstContext) {
		let mut frame = Frame::from_bits(pack(&self.timezone.next_minute(time)), &[]);
		frame.set(IDLE_SECOND, Symbol::Idle);
		self.frame = frame;
	}

	fn frame(&self) -> &Frame {
		&self.frame
	}

	fn signal_level(&self, symbol: Symbol, millis: u32) -> bool {
		level(symbol, millis)
	}
}
