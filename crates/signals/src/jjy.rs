//! Support for the JJY amplitude modulated time code.
//!
//! JJY broadcasts the current minute in Japan Standard Time from two transmitters, Ōtakadoya-yama
//! at 40 kHz and Hagane-yama at 60 kHz, with identical time codes. Unlike WWVB and DCF77, each
//! second *starts* at full power and the duration of the full power pulse selects the symbol:
//! 800 ms for a zero, 500 ms for a one, and 200 ms for a marker.
//!
//! | Seconds        | Field                                              |
//! | -------------- | -------------------------------------------------- |
//! | 0, 9, ..., 59  | Markers                                            |
//! | 1-8            | Minute (tens, blank, units)                        |
//! | 12-18          | Hour (tens, blank, units)                          |
//! | 22-33          | Day of year, 1-based (hundreds, tens, units)       |
//! | 36             | Even parity over hour                              |
//! | 37             | Even parity over minute                            |
//! | 41-48          | Year                                               |
//! | 50-52          | Day of week, Sunday = 0                            |
//! | 53-54          | Leap second, always zero                           |
//!
//! See [JJY documentation](https://www.nict.go.jp/en/sts/jjy_signal.html) for details.
//!
//! # Examples
//!
//! ```
//! # use signals::{jjy::{JJY, Transmitter}, Symbol, TimeCode};
//! # use time::{CivilTime, DstContext};
//! let mut j = JJY::new(Transmitter::Otakadoya);
//! assert_eq!(j.frequency(), 40000);
//!
//! // Sat, Jun 15 2024 17:25 JST
//! j.encode_minute(&CivilTime::new(2024, 6, 15, 17, 25, 0), DstContext::default());
//! assert_eq!(j.symbol_for_second(0), Symbol::Mark);
//! assert_eq!(j.symbol_for_second(2), Symbol::One);
//! assert_eq!(j.signal_level(Symbol::One, 400), true);
//! assert_eq!(j.signal_level(Symbol::One, 500), false);
//! ```

use time::{CivilTime, DstContext};
use crate::bits::{at, bcd, field, padded_bcd, parity, Parity};
use crate::{Frame, Symbol, TimeCode};

/// Seconds that always carry [`Symbol::Mark`].
pub const MARKERS: [usize; 7] = [0, 9, 19, 29, 39, 49, 59];

/// JJY transmitter site, which fixes the carrier frequency.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum Transmitter {
	/// Ōtakadoya-yama, Fukushima. 40 kHz.
	Otakadoya,
	/// Hagane-yama, Kyushu. 60 kHz.
	#[default]
	Hagane
}

impl Transmitter {
	/// Carrier frequency in Hz.
	pub const fn frequency(self) -> u32 {
		match self {
			Transmitter::Otakadoya => 40000,
			Transmitter::Hagane => 60000
		}
	}
}

/// Pack one minute into an accumulator (see [`crate::bits`]), without markers.
///
/// # Examples
/// ```ignore
/// let a = pack(&CivilTime::new(2024, 6, 15, 17, 25, 0));
/// assert_eq!(a >> at(8) & 0xff, 0b010_0_0101);  // 25 minutes
/// assert_eq!(a >> at(36) & 1, 0);               // 17 has an even number of set bits
/// ```
fn pack(time: &CivilTime) -> u64 {
	let mut a = field(padded_bcd(time.min as u32), 8, 8);
	a |= field(padded_bcd(time.hour as u32), 18, 7);
	a |= field(padded_bcd(time.yday as u32 + 1), 33, 12);
	a |= parity(a, at(12), at(18), Parity::Even) << at(36);
	a |= parity(a, at(1), at(8), Parity::Even) << at(37);
	a |= field(bcd(time.year as u32 % 100), 48, 8);
	a |= field(time.wday as u64, 52, 3);
	a
}

/// Carrier level `millis` milliseconds into a second carrying `symbol`.
///
/// The carrier is at full power for the first 800 ms of a zero, 500 ms of a one, and 200 ms of a
/// marker, then reduced. [`Symbol::Idle`] is full power throughout, and MSF only symbols are
/// treated as zeros.
///
/// # Examples
///
/// ```
/// # use signals::{jjy::level, Symbol};
/// assert_eq!(level(Symbol::Mark, 199), true);
/// assert_eq!(level(Symbol::Mark, 200), false);
/// assert_eq!(level(Symbol::Zero, 799), true);
/// ```
pub fn level(symbol: Symbol, millis: u32) -> bool {
	let high = match symbol {
		Symbol::Idle => return true,
		Symbol::Mark => 200,
		Symbol::One => 500,
		Symbol::Zero | Symbol::A0B1 | Symbol::A1B1 => 800
	};
	millis < high
}

/// JJY frame encoder.
///
/// Expects Japan Standard Time. Neither [`CivilTime::isdst`] nor [`DstContext`] are read.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct JJY {
	transmitter: Transmitter,
	frame: Frame
}

impl JJY {
	/// Create an encoder for `transmitter` holding an all zero frame.
	pub fn new(transmitter: Transmitter) -> JJY {
		JJY {
			transmitter,
			frame: Frame::default()
		}
	}

	/// The transmitter being emulated.
	pub fn transmitter(&self) -> Transmitter {
		self.transmitter
	}
}

impl TimeCode for JJY {
	fn frequency(&self) -> u32 {
		self.transmitter.frequency()
	}

	fn encode_minute(&mut self, time: &CivilTime, _dst: DstContext) {
		self.frame = Frame::from_bits(pack(time), &MARKERS);
	}

	fn frame(&self) -> &Frame {
		&self.frame
	}

	fn signal_level(&self, symbol: Symbol, millis: u32) -> bool {
		level(symbol, millis)
	}
}
