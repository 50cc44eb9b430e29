//! Encode civil time into the time codes of long wave time signal stations.
//!
//! This crate encodes [WWVB], [DCF77], [JJY40/60], and [MSF]. Each encoder turns a
//! [`time::CivilTime`] into a [`Frame`] of 60 [`Symbol`]s, one per second of the minute, and
//! evaluates a symbol at a millisecond offset into an on/off carrier level. Turning that level into
//! an actual carrier is left to the caller.
//!
//! All encoders implement [`TimeCode`], and [`Station`] selects one at runtime.
//!
//! | Station      | Carrier   | Minute encoded | Input time expected          |
//! | ------------ | --------- | -------------- | ---------------------------- |
//! | [`wwvb`]     | 60 kHz    | current        | UTC, plus [`DstContext`]     |
//! | [`dcf77`]    | 77.5 kHz  | next           | Central European local time  |
//! | [`jjy`]      | 40/60 kHz | current        | Japan Standard Time          |
//! | [`msf`]      | 60 kHz    | next           | UK local time                |
//!
//! This crate is `no_std` and never allocates.
//!
//! [WWVB]: https://en.wikipedia.org/wiki/WWVB
//! [DCF77]: https://en.wikipedia.org/wiki/DCF77
//! [JJY40/60]: https://en.wikipedia.org/wiki/JJY
//! [MSF]: https://en.wikipedia.org/wiki/Time_from_NPL_(MSF)
//!
//! # Examples
//! ```
//! # use signals::{Station, Symbol, TimeCode};
//! # use time::{CivilTime, DstContext};
//! let mut station = Station::WWVB(Default::default());
//! station.encode_minute(&CivilTime::new(2008, 3, 6, 7, 30, 0), DstContext::default());
//!
//! // Second 2 carries the 20 minutes bit
//! assert_eq!(station.symbol_for_second(2), Symbol::One);
//! assert_eq!(station.signal_level(Symbol::One, 300), false);
//! assert_eq!(station.signal_level(Symbol::One, 600), true);
//! ```

#![no_std]

use core::fmt;
use time::{CivilTime, DstContext};

pub mod bits;
pub mod dcf77;
pub mod jjy;
pub mod msf;
pub mod wwvb;

/// Seconds in a frame.
pub const FRAME_LEN: usize = 60;

/// The modulation intent of one second, before it is shaped into a waveform.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
	/// Binary zero. For MSF, channel A 0 and channel B 0.
	#[default]
	Zero,
	/// Binary one. For MSF, channel A 1 and channel B 0.
	One,
	/// Framing marker.
	Mark,
	/// Unmodulated second (DCF77 second 59).
	Idle,
	/// MSF channel A 0 and channel B 1.
	A0B1,
	/// MSF channel A 1 and channel B 1.
	A1B1
}

impl Symbol {
	/// `One` if `bit`, otherwise `Zero`.
	#[inline(always)]
	pub const fn from_bit(bit: bool) -> Symbol {
		if bit { Symbol::One } else { Symbol::Zero }
	}

	/// The MSF symbol carrying channel bits `a` and `b`.
	pub const fn from_channels(a: bool, b: bool) -> Symbol {
		match (a, b) {
			(false, false) => Symbol::Zero,
			(true, false) => Symbol::One,
			(false, true) => Symbol::A0B1,
			(true, true) => Symbol::A1B1
		}
	}

	/// The `(a, b)` channel bits of a data symbol, or `None` for `Mark` and `Idle`.
	///
	/// # Examples
	///
	/// ```
	/// # use signals::Symbol;
	/// assert_eq!(Symbol::A0B1.channels(), Some((false, true)));
	/// assert_eq!(Symbol::One.channels(), Some((true, false)));
	/// assert_eq!(Symbol::Mark.channels(), None);
	/// ```
	pub const fn channels(self) -> Option<(bool, bool)> {
		match self {
			Symbol::Zero => Some((false, false)),
			Symbol::One => Some((true, false)),
			Symbol::A0B1 => Some((false, true)),
			Symbol::A1B1 => Some((true, true)),
			Symbol::Mark | Symbol::Idle => None
		}
	}

	/// Single character used when printing a [`Frame`].
	pub const fn as_char(self) -> char {
		match self {
			Symbol::Zero => '0',
			Symbol::One => '1',
			Symbol::Mark => 'M',
			Symbol::Idle => '-',
			Symbol::A0B1 => '2',
			Symbol::A1B1 => '3'
		}
	}
}

/// One minute of symbols, indexed by second.
///
/// The default frame is all [`Symbol::Zero`].
///
/// # Examples
///
/// ```
/// # use signals::{Frame, Symbol};
/// let f = Frame::default();
/// assert_eq!(f.get(0), Symbol::Zero);
/// assert_eq!(f.get(60), Symbol::Zero);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame([Symbol; FRAME_LEN]);

impl Default for Frame {
	fn default() -> Self {
		Frame([Symbol::Zero; FRAME_LEN])
	}
}

impl Frame {
	/// The symbol for `second`, or [`Symbol::Zero`] if `second` is outside [0, 59].
	#[inline]
	pub fn get(&self, second: usize) -> Symbol {
		self.0.get(second).copied().unwrap_or_default()
	}

	/// All 60 symbols in transmission order.
	#[inline]
	pub fn symbols(&self) -> &[Symbol; FRAME_LEN] {
		&self.0
	}

	/// Expand an accumulator (see [`bits`]) into symbols, placing [`Symbol::Mark`] at every second
	/// in `markers` regardless of its bit.
	pub(crate) fn from_bits(acc: u64, markers: &[usize]) -> Frame {
		let mut f = Frame::default();
		for (s, sym) in f.0.iter_mut().enumerate() {
			*sym = Symbol::from_bit(bits::is_set(acc, s));
		}
		f.set_all(markers, Symbol::Mark);
		f
	}

	/// Overwrite `second` with `symbol`; out of range seconds are ignored.
	pub(crate) fn set(&mut self, second: usize, symbol: Symbol) {
		if let Some(s) = self.0.get_mut(second) {
			*s = symbol;
		}
	}

	fn set_all(&mut self, seconds: &[usize], symbol: Symbol) {
		for &s in seconds {
			self.set(s, symbol);
		}
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use fmt::Write;
		for s in self.0 {
			f.write_char(s.as_char())?;
		}
		Ok(())
	}
}

/// A time code: encodes one minute at a time and shapes each second into a carrier level.
pub trait TimeCode {
	/// Carrier frequency in Hz.
	fn frequency(&self) -> u32;

	/// Recompute the frame from `time`.
	///
	/// `time` is the civil time of the minute now starting. Stations that announce the upcoming
	/// minute step to it themselves, through their own timezone. `dst` is only read by WWVB.
	fn encode_minute(&mut self, time: &CivilTime, dst: DstContext);

	/// The most recently encoded frame.
	fn frame(&self) -> &Frame;

	/// The symbol to transmit during `second`, or [`Symbol::Zero`] outside [0, 59].
	#[inline]
	fn symbol_for_second(&self, second: usize) -> Symbol {
		self.frame().get(second)
	}

	/// Whether the carrier is on `millis` milliseconds into a second carrying `symbol`.
	fn signal_level(&self, symbol: Symbol, millis: u32) -> bool;
}

/// The station to emulate, selected at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Station {
	WWVB(wwvb::WWVB),
	DCF77(dcf77::DCF77),
	JJY(jjy::JJY),
	MSF(msf::MSF)
}

impl Station {
	/// Short station name, e.g. `"JJY60"`.
	pub fn name(&self) -> &'static str {
		match self {
			Station::WWVB(_) => "WWVB",
			Station::DCF77(_) => "DCF77",
			Station::JJY(j) => match j.transmitter() {
				jjy::Transmitter::Otakadoya => "JJY40",
				jjy::Transmitter::Hagane => "JJY60"
			},
			Station::MSF(_) => "MSF"
		}
	}
}

impl TimeCode for Station {
	fn frequency(&self) -> u32 {
		match self {
			Station::WWVB(s) => s.frequency(),
			Station::DCF77(s) => s.frequency(),
			Station::JJY(s) => s.frequency(),
			Station::MSF(s) => s.frequency()
		}
	}

	fn encode_minute(&mut self, time: &CivilTime, dst: DstContext) {
		match self {
			Station::WWVB(s) => s.encode_minute(time, dst),
			Station::DCF77(s) => s.encode_minute(time, dst),
			Station::JJY(s) => s.encode_minute(time, dst),
			Station::MSF(s) => s.encode_minute(time, dst)
		}
	}

	fn frame(&self) -> &Frame {
		match self {
			Station::WWVB(s) => s.frame(),
			Station::DCF77(s) => s.frame(),
			Station::JJY(s) => s.frame(),
			Station::MSF(s) => s.frame()
		}
	}

	fn signal_level(&self, symbol: Symbol, millis: u32) -> bool {
		match self {
			Station::WWVB(s) => s.signal_level(symbol, millis),
			Station::DCF77(s) => s.signal_level(symbol, millis),
			Station::JJY(s) => s.signal_level(symbol, millis),
			Station::MSF(s) => s.signal_level(symbol, millis)
		}
	}
}
