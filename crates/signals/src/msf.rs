//! Support for the MSF amplitude modulated time code.
//!
//! MSF announces the *next* minute in UK local time, stepping through the DST rules of [`UK`] (or
//! another [`Timezone`]) so that the minute after 01:59 BST on the day BST ends is announced as
//! 01:00 GMT. Each second carries two independent bits, A
//! and B: the carrier is off for the first 100 ms, off from 100-200 ms if A is set, off from
//! 200-300 ms if B is set, and on for the rest of the second. Second 0 is a minute marker with the
//! carrier off for 500 ms.
//!
//! | Seconds | Channel A                | Channel B                          |
//! | ------- | ------------------------ | ---------------------------------- |
//! | 1-16    | Zero                     | DUT1, always zero                  |
//! | 17-24   | Year                     |                                    |
//! | 25-29   | Month                    |                                    |
//! | 30-35   | Day of month             |                                    |
//! | 36-38   | Day of week, Sunday = 0  |                                    |
//! | 39-44   | Hour                     |                                    |
//! | 45-51   | Minute                   |                                    |
//! | 52-59   | `01111110`               | 54-57 odd parity, 58 BST in effect |
//!
//! See [MSF documentation](https://en.wikipedia.org/wiki/Time_from_NPL_(MSF)) for details.
//!
//! # Examples
//!
//! ```
//! # use signals::{msf::MSF, Symbol, TimeCode};
//! # use time::{CivilTime, DstContext};
//! let mut m = MSF::new();
//!
//! // Transmitted during Sun, Jun 16 2024 11:59 BST, announcing 12:00
//! m.encode_minute(&CivilTime::new(2024, 6, 16, 11, 59, 0).with_dst(true), DstContext::default());
//! assert_eq!(m.symbol_for_second(0), Symbol::Mark);
//! assert_eq!(m.symbol_for_second(58), Symbol::A1B1);
//! assert_eq!(m.signal_level(Symbol::A1B1, 150), false);
//! assert_eq!(m.signal_level(Symbol::A1B1, 350), true);
//! ```

use time::{CivilTime, DstContext};
use time::tz::{DateRule, DstRule, Timezone, Transition};
use crate::bits::{at, bcd, field, is_set, parity, Parity};
use crate::{Frame, Symbol, TimeCode};

/// Carrier frequency in Hz.
pub const FREQUENCY: u32 = 60000;

/// Channel A seconds 52-59.
const END_OF_MINUTE: u64 = 0b0111_1110;

/// UK civil time, `GMT0BST,M3.5.0/1,M10.5.0`.
pub const UK: Timezone = Timezone {
	utoff: 0,
	dst: Some(DstRule {
		utoff: 3600,
		start: Transition { date: DateRule::Weekday(3, 5, 0), time: 3600 },
		end: Transition { date: DateRule::Weekday(10, 5, 0), time: 7200 }
	})
};

/// Pack the minute described by `time` into channel A and channel B accumulators (see
/// [`crate::bits`]).
///
/// `time` is the minute being announced, already advanced by one.
///
/// # Examples
/// ```ignore
/// let (a, b) = pack(&CivilTime::new(2024, 6, 16, 12, 0, 0).with_dst(true));
/// assert_eq!(a >> at(24) & 0xff, 0x24);   // Year
/// assert_eq!(b >> at(58) & 1, 1);         // BST
/// ```
fn pack(time: &CivilTime) -> (u64, u64) {
	let mut a = field(bcd(time.year as u32 % 100), 24, 8);
	a |= field(bcd(time.mon as u32 + 1), 29, 5);
	a |= field(bcd(time.day as u32), 35, 6);
	a |= field(time.wday as u64, 38, 3);
	a |= field(bcd(time.hour as u32), 44, 6);
	a |= field(bcd(time.min as u32), 51, 7);
	a |= field(END_OF_MINUTE, 59, 8);

	let mut b = parity(a, at(17), at(24), Parity::Odd) << at(54);
	b |= parity(a, at(25), at(35), Parity::Odd) << at(55);
	b |= parity(a, at(36), at(38), Parity::Odd) << at(56);
	b |= parity(a, at(39), at(51), Parity::Odd) << at(57);
	b |= (time.isdst as u64) << at(58);
	(a, b)
}

/// Carrier level `millis` milliseconds into a second carrying `symbol`.
///
/// [`Symbol::Mark`] is off for the first 500 ms. Every other symbol is off for the first 100 ms,
/// then follows its A bit until 200 ms and its B bit until 300 ms (off when set), and is on
/// afterwards. [`Symbol::Idle`] is on throughout.
///
/// # Examples
///
/// ```
/// # use signals::{msf::level, Symbol};
/// assert_eq!(level(Symbol::Zero, 50), false);
/// assert_eq!(level(Symbol::Zero, 150), true);
/// assert_eq!(level(Symbol::A0B1, 150), true);
/// assert_eq!(level(Symbol::A0B1, 250), false);
/// assert_eq!(level(Symbol::Mark, 450), false);
/// ```
pub fn level(symbol: Symbol, millis: u32) -> bool {
	let (a, b) = match symbol.channels() {
		Some(ab) => ab,
		None if symbol == Symbol::Mark => return millis >= 500,
		None => return true
	};
	match millis {
		0..100 => false,
		100..200 => !a,
		200..300 => !b,
		_ => true
	}
}

/// MSF frame encoder.
///
/// Expects local time in its timezone with [`CivilTime::isdst`] set. [`DstContext`] is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MSF {
	frame: Frame,
	timezone: Timezone
}

impl Default for MSF {
	fn default() -> Self {
		MSF::with_timezone(UK)
	}
}

impl MSF {
	/// Create a [`UK`] encoder holding an all zero frame.
	pub fn new() -> MSF {
		MSF::default()
	}

	/// Create an encoder that steps through the DST rules of `timezone`.
	pub fn with_timezone(timezone: Timezone) -> MSF {
		MSF { frame: Frame::default(), timezone }
	}

	/// The timezone used to find the announced minute.
	pub fn timezone(&self) -> &Timezone {
		&self.timezone
	}
}

impl TimeCode for MSF {
	fn frequency(&self) -> u32 {
		FREQUENCY
	}

	/// Encode the minute that follows `time`, which is what MSF transmits while `time` elapses.
	fn encode_minute(&mut self, time: &CivilTime, _dst: DstContext) {
		let (a, b) = pack(&self.timezone.next_minute(time));
		let mut frame = Frame::default();
		for s in 0..60 {
			frame.set(s, Symbol::from_channels(is_set(a, s), is_set(b, s)));
		}
		frame.set(0, Symbol::Mark);
		self.frame = frame;
	}

	fn frame(&self) -> &Frame {
		&self.frame
	}

	fn signal_level(&self, symbol: Symbol, millis: u32) -> bool {
		level(symbol, millis)
	}
}
