//! Support for the WWVB amplitude modulated time code.
//!
//! WWVB broadcasts the current UTC minute. Each second starts with reduced carrier power whose
//! duration selects the symbol: 200 ms for a zero, 500 ms for a one, and 800 ms for a marker.
//!
//! | Seconds        | Field                                             |
//! | -------------- | ------------------------------------------------- |
//! | 0, 9, ..., 59  | Markers                                           |
//! | 1-8            | Minute (tens, blank, units)                       |
//! | 12-18          | Hour (tens, blank, units)                         |
//! | 22-33          | Day of year, 1-based (hundreds, tens, units)      |
//! | 36-43          | UT1 correction, always zero                       |
//! | 45-53          | Year (tens, units)                                |
//! | 55             | Leap year                                         |
//! | 56             | Leap second at end of month, always zero          |
//! | 57-58          | DST status                                        |
//!
//! See [WWVB documentation](https://www.nist.gov/pml/time-and-frequency-division/time-distribution/radio-station-wwvb/wwvb-time-code-format)
//! for details.
//!
//! # Examples
//!
//! ```
//! # use signals::{wwvb::WWVB, Symbol, TimeCode};
//! # use time::{CivilTime, DstContext};
//! let mut w = WWVB::new();
//!
//! // Mar 6, 2008 07:30 UTC, day 66
//! w.encode_minute(&CivilTime::new(2008, 3, 6, 7, 30, 0), DstContext::default());
//! assert_eq!(w.symbol_for_second(0), Symbol::Mark);
//! assert_eq!(w.symbol_for_second(3), Symbol::One);
//! assert_eq!(w.symbol_for_second(55), Symbol::One);
//! ```

use time::{isleapyear, CivilTime, DstContext};
use crate::bits::{at, field, padded_bcd};
use crate::{Frame, Symbol, TimeCode};

/// Carrier frequency in Hz.
pub const FREQUENCY: u32 = 60000;

/// Seconds that always carry [`Symbol::Mark`].
pub const MARKERS: [usize; 7] = [0, 9, 19, 29, 39, 49, 59];

/// Pack one minute into an accumulator (see [`crate::bits`]), without markers.
///
/// `time` must already be UTC.
///
/// # Examples
/// ```ignore
/// let a = pack(&CivilTime::new(2008, 3, 6, 7, 30, 0), DstContext::default());
/// assert_eq!(a >> at(8) & 0xff, 0b011_0_0000);  // 30 minutes
/// assert_eq!(a >> at(55) & 1, 1);               // 2008 is a leap year
/// ```
fn pack(time: &CivilTime, dst: DstContext) -> u64 {
	let mut a = field(padded_bcd(time.min as u32), 8, 8);
	a |= field(padded_bcd(time.hour as u32), 18, 7);
	a |= field(padded_bcd(time.yday as u32 + 1), 33, 12);
	a |= field(padded_bcd(time.year as u32 % 100), 53, 9);
	a |= (isleapyear(time.year) as u64) << at(55);
	// DST begins today => 57 set, DST ends today => 58 set
	a |= (dst.tomorrow as u64) << at(57);
	a |= (dst.today as u64) << at(58);
	a
}

/// Carrier level `millis` milliseconds into a second carrying `symbol`.
///
/// The carrier is reduced at the start of the second and restored after 200 ms ([`Symbol::Zero`]),
/// 500 ms ([`Symbol::One`]), or 800 ms ([`Symbol::Mark`]). [`Symbol::Idle`] is full power
/// throughout, and MSF only symbols are treated as zeros.
///
/// # Examples
///
/// ```
/// # use signals::{wwvb::level, Symbol};
/// assert_eq!(level(Symbol::Zero, 199), false);
/// assert_eq!(level(Symbol::Zero, 200), true);
/// assert_eq!(level(Symbol::Mark, 799), false);
/// ```
pub fn level(symbol: Symbol, millis: u32) -> bool {
	let low = match symbol {
		Symbol::Idle => return true,
		Symbol::One => 500,
		Symbol::Mark => 800,
		Symbol::Zero | Symbol::A0B1 | Symbol::A1B1 => 200
	};
	millis >= low
}

/// WWVB frame encoder.
///
/// Expects UTC civil time, plus the DST state at the start of the current and next local day.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct WWVB {
	frame: Frame
}

impl WWVB {
	/// Create an encoder holding an all zero frame.
	pub fn new() -> WWVB {
		WWVB::default()
	}
}

impl TimeCode for WWVB {
	fn frequency(&self) -> u32 {
		FREQUENCY
	}

	/// Encode the minute starting at `time`.
	///
	/// Bits 57 and 58 follow `dst`:
	///
	/// | `today` | `tomorrow` | 57 | 58 | Meaning          |
	/// | ------- | ---------- | -- | -- | ---------------- |
	/// | false   | false      | 0  | 0  | Standard time    |
	/// | false   | true       | 1  | 0  | DST begins today |
	/// | true    | false      | 0  | 1  | DST ends today   |
	/// | true    | true       | 1  | 1  | DST              |
	fn encode_minute(&mut self, time: &CivilTime, dst: DstContext) {
		self.frame = Frame::from_bits(pack(time, dst), &MARKERS);
	}

	fn frame(&self) -> &Frame {
		&self.frame
	}

	fn signal_level(&self, symbol: Symbol, millis: u32) -> bool {
		level(symbol, millis)
	}
}
