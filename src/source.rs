//! Feed the time to a station's encoder once per minute.
//!
//! Each station expects a different flavor of civil time:
//!
//! | Station | Input                          | Default TZ string            |
//! | ------- | ------------------------------ | ---------------------------- |
//! | WWVB    | UTC, plus local midnight DST   | `EST5EDT,M3.2.0,M11.1.0`     |
//! | DCF77   | Central European local time    | `CET-1CEST,M3.5.0,M10.5.0/3` |
//! | JJY     | Japan Standard Time            | `JST-9`                      |
//! | MSF     | UK local time                  | `GMT0BST,M3.5.0/1,M10.5.0`   |
//!
//! A TZ string given on the command line replaces the default. For WWVB it only supplies the DST
//! schedule; the time code itself is always UTC. DCF77 and MSF also use it to find the minute they
//! announce, which may be on the other side of a DST change.

use signals::{dcf77::DCF77, jjy::{JJY, Transmitter}, msf::MSF, wwvb::WWVB, Station, TimeCode};
use time::{tz::Timezone, CivilTime, DstContext, TimeSpec};
use crate::args::SignalType;
use crate::carrier::Transmission;
use crate::error::TransmitError;

/// Default TZ string for `signal`.
pub fn default_tzstring(signal: SignalType) -> &'static str {
	match signal {
		SignalType::WWVB => "EST5EDT,M3.2.0,M11.1.0",
		SignalType::DCF77 => "CET-1CEST,M3.5.0,M10.5.0/3",
		SignalType::JJY40 | SignalType::JJY60 => "JST-9",
		SignalType::MSF => "GMT0BST,M3.5.0/1,M10.5.0"
	}
}

/// An encoder for `signal` in `timezone`, holding an all zero frame.
pub fn station(signal: SignalType, timezone: Timezone) -> Station {
	match signal {
		SignalType::WWVB => Station::WWVB(WWVB::new()),
		SignalType::DCF77 => Station::DCF77(DCF77::with_timezone(timezone)),
		SignalType::JJY40 => Station::JJY(JJY::new(Transmitter::Otakadoya)),
		SignalType::JJY60 => Station::JJY(JJY::new(Transmitter::Hagane)),
		SignalType::MSF => Station::MSF(MSF::with_timezone(timezone))
	}
}

/// Drives one station, minute by minute.
///
/// # Examples
///
/// ```
/// let mut source = Source::new(SignalType::DCF77, None)?;
/// let mut time = TimeSpec { sec: 1718610570, nsec: 0 };
/// let first = source.next_minute(&mut time)?;
/// assert_eq!(first.delay, 30_000_000_000);
/// assert_eq!(time.sec, 1718610600);
/// ```
pub struct Source {
	station: Station,
	timezone: Timezone
}

impl Source {
	/// Create a source for `signal`, using `timezone` or the station's default.
	///
	/// # Errors
	///
	/// Returns [`TransmitError::TimezoneError`] if the default TZ string cannot be parsed.
	pub fn new(signal: SignalType, timezone: Option<Timezone>) -> Result<Source, TransmitError> {
		let timezone = match timezone {
			Some(tz) => tz,
			None => Timezone::parse(default_tzstring(signal).as_bytes())?
		};
		Ok(Source { station: station(signal, timezone), timezone })
	}

	/// The station being driven.
	pub fn station(&self) -> &Station {
		&self.station
	}

	/// Civil time and DST context the station expects at Unix time `time`.
	///
	/// # Errors
	///
	/// Returns [`TransmitError::UnsupportedTime`] if `time` is before the Unix epoch.
	pub fn civil(&self, time: i64) -> Result<(CivilTime, DstContext), TransmitError> {
		let civil = match self.station {
			Station::WWVB(_) => CivilTime::from_timestamp(time, 0, false),
			_ => self.timezone.civil(time)
		};
		let civil = civil.ok_or(TransmitError::UnsupportedTime(time))?;
		let dst = match self.station {
			Station::WWVB(_) => self.timezone.dst_context(time),
			_ => DstContext::steady(civil.isdst)
		};
		Ok((civil, dst))
	}

	/// Encode the minute containing `time` and advance `time` to the start of the next minute.
	///
	/// The returned [`Transmission`] starts as far into the minute as `time` was.
	///
	/// # Errors
	///
	/// Returns [`TransmitError::UnsupportedTime`] if `time` is before the Unix epoch.
	pub fn next_minute(&mut self, time: &mut TimeSpec) -> Result<Transmission, TransmitError> {
		let start = time.start_of_minute();
		let (civil, dst) = self.civil(start)?;
		self.station.encode_minute(&civil, dst);
		let transmission = Transmission::new(self.station, time.nanos_into_minute());
		*time = TimeSpec { sec: start + 60, nsec: 0 };
		Ok(transmission)
	}
}
