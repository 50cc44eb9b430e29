//! Command line parsing for `timecode`.
//!
//! Options may appear in any order around the signal name. Options with a value take it from the
//! following argument, and a repeated option replaces the earlier value. See the [crate]
//! documentation for the full list.

use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Debug};
use std::num::NonZero;
use std::str::FromStr;
use time::tz::{Timezone, TzStringError};
use time::{parse_timestamp, ParseError, TimeSpec};

/// Minutes transmitted when no count is given.
const DEFAULT_COUNT: NonZero<usize> = match NonZero::new(4) {
	Some(n) => n,
	None => unreachable!()
};

/// Time code stations that can be emulated.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum SignalType {
	/// WWVB, Fort Collins, Colorado.
	WWVB,
	/// DCF77, Mainflingen, Germany.
	DCF77,
	/// JJY from Mount Ōtakadoya at 40 kHz.
	JJY40,
	/// JJY from Mount Hagane at 60 kHz.
	JJY60,
	/// MSF, Anthorn, UK.
	MSF
}

impl FromStr for SignalType {
	type Err = ArgumentsError;

	/// Look up a signal by name, ignoring case. `jjy` means `jjy60`.
	///
	/// # Examples
	///
	/// ```
	/// assert_eq!("MSF".parse::<SignalType>(), Ok(SignalType::MSF));
	/// assert_eq!("jjy".parse::<SignalType>(), Ok(SignalType::JJY60));
	/// assert_eq!("wwv".parse::<SignalType>(), Err(ArgumentsError::InvalidSignal(String::from("wwv"))));
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"wwvb" => Ok(SignalType::WWVB),
			"dcf77" => Ok(SignalType::DCF77),
			"jjy40" => Ok(SignalType::JJY40),
			"jjy" | "jjy60" => Ok(SignalType::JJY60),
			"msf" => Ok(SignalType::MSF),
			_ => Err(ArgumentsError::InvalidSignal(s.to_string()))
		}
	}
}

/// Why the command line was rejected.
#[cfg_attr(test, derive(PartialEq))]
pub enum ArgumentsError {
	/// An argument starting with `-` that is not a known option.
	UnrecognizedOption(String),
	/// Argument at this index (an option, signal name, or count) is not UTF-8.
	InvalidUTF8(usize, OsString),
	/// No signal name was given.
	MissingSignal,
	/// The signal name is not one of [`SignalType`].
	InvalidSignal(String),
	/// The minute count is not a positive integer.
	InvalidCount(String),
	/// This option needs a value but was the last argument.
	MissingParameter(String),
	/// The `--timezone` value is not a supported TZ string.
	TimezoneError(TzStringError),
	/// The `--time` value could not be parsed.
	DateTimeParseError(ParseError),
	/// `-h` or `--help`; not a failure, the caller prints usage.
	Help
}

impl Display for ArgumentsError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ArgumentsError::UnrecognizedOption(s) => write!(f, "Unknown option {}, see --help", s),
			ArgumentsError::InvalidUTF8(i, v) => write!(f, "Argument {} is not valid UTF-8: {:?}", i, v),
			ArgumentsError::MissingSignal => write!(f, "No signal given, see --help"),
			ArgumentsError::InvalidSignal(s) => write!(f, "Unknown signal: {}", s),
			ArgumentsError::InvalidCount(s) => write!(f, "Minute count must be a positive integer: {}", s),
			ArgumentsError::MissingParameter(s) => write!(f, "Option {} needs a value", s),
			ArgumentsError::TimezoneError(t) => write!(f, "Invalid TZ string: {}", t),
			ArgumentsError::DateTimeParseError(e) => write!(f, "Invalid start time: {}", e),
			ArgumentsError::Help => write!(f, "Help requested")
		}
	}
}

impl Debug for ArgumentsError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self, f)
	}
}

impl Error for ArgumentsError {}

impl From<TzStringError> for ArgumentsError {
	fn from(e: TzStringError) -> Self {
		ArgumentsError::TimezoneError(e)
	}
}

impl From<ParseError> for ArgumentsError {
	fn from(e: ParseError) -> Self {
		ArgumentsError::DateTimeParseError(e)
	}
}

/// Options that consume the following argument.
enum Param {
	Count,
	Timezone,
	Time
}

/// Borrow argument `i` as UTF-8.
fn utf8(i: usize, arg: &OsString) -> Result<&str, ArgumentsError> {
	arg.to_str().ok_or_else(|| ArgumentsError::InvalidUTF8(i, arg.clone()))
}

/// Parsed command line arguments.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Arguments {
	/// Station to emulate.
	pub signal: SignalType,
	/// Minutes to transmit.
	pub count: NonZero<usize>,
	/// `--timezone`, replacing the station's default zone.
	pub timezone: Option<Timezone>,
	/// `--time`, replacing the system clock as the start time.
	pub time: Option<TimeSpec>,
	/// `--print`: write frames to stdout instead of playing them.
	pub print: bool
}

impl Arguments {
	/// Parse `args`, which must not include the program name.
	///
	/// TZ strings and start times are parsed from raw bytes; every other argument must be UTF-8.
	///
	/// # Errors
	///
	/// Any [`ArgumentsError`]. [`ArgumentsError::Help`] is returned as soon as `-h` is seen.
	///
	/// # Examples
	///
	/// ```
	/// let args = Arguments::parse(std::env::args_os().skip(1))?;
	/// ```
	pub fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Arguments, ArgumentsError> {
		let mut signal: Result<SignalType, ArgumentsError> = Err(ArgumentsError::MissingSignal);
		let mut count = DEFAULT_COUNT;
		let mut timezone = None;
		let mut time = None;
		let mut print = false;

		let mut args = args.into_iter().enumerate();
		while let Some((i, arg)) = args.next() {
			let name = utf8(i, &arg)?;
			let param = match name {
				"-n" | "-c" | "--count" => Param::Count,
				"-z" | "--timezone" => Param::Timezone,
				"-t" | "--time" => Param::Time,
				"-p" | "--print" => {
					print = true;
					continue;
				},
				"-h" | "--help" => return Err(ArgumentsError::Help),
				option if option.starts_with('-') => {
					return Err(ArgumentsError::UnrecognizedOption(option.to_string()));
				},
				s => {
					signal = s.parse();
					continue;
				}
			};

			let (j, value) = args.next().ok_or_else(|| ArgumentsError::MissingParameter(name.to_string()))?;
			match param {
				Param::Count => {
					let v = utf8(j, &value)?;
					count = v.parse().map_err(|_| ArgumentsError::InvalidCount(v.to_string()))?;
				},
				Param::Timezone => timezone = Some(Timezone::parse(value.as_encoded_bytes())?),
				Param::Time => time = Some(parse_timestamp(value.as_encoded_bytes())?)
			}
		}

		Ok(Arguments { signal: signal?, count, timezone, time, print })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Result<Arguments, ArgumentsError> {
		Arguments::parse(args.iter().map(OsString::from))
	}

	fn signal_only(signal: SignalType) -> Arguments {
		Arguments { signal, count: DEFAULT_COUNT, timezone: None, time: None, print: false }
	}

	#[test]
	fn signal_type_test() {
		for (names, signal) in [
			(["wwvb", "WWVB"], SignalType::WWVB),
			(["dcf77", "Dcf77"], SignalType::DCF77),
			(["jjy40", "JJY40"], SignalType::JJY40),
			(["jjy", "JJY60"], SignalType::JJY60),
			(["msf", "MSF"], SignalType::MSF)
		] {
			for name in names {
				assert_eq!(SignalType::from_str(name), Ok(signal), "{}", name);
			}
		}

		for bad in ["jjy50", "", "wwvb "] {
			assert_eq!(SignalType::from_str(bad), Err(ArgumentsError::InvalidSignal(String::from(bad))));
		}
	}

	#[test]
	fn utf8_test() {
		assert_eq!(utf8(1, &OsString::from("msf")), Ok("msf"));

		let invalid = unsafe { OsString::from_encoded_bytes_unchecked(vec![b'7', 0xff]) };
		assert_eq!(utf8(3, &invalid), Err(ArgumentsError::InvalidUTF8(3, invalid.clone())));
		assert_eq!(
			Arguments::parse([OsString::from("-n"), invalid.clone(), OsString::from("msf")]),
			Err(ArgumentsError::InvalidUTF8(1, invalid.clone()))
		);
		assert_eq!(
			Arguments::parse([OsString::from("msf"), invalid.clone()]),
			Err(ArgumentsError::InvalidUTF8(1, invalid))
		);
	}

	#[test]
	fn arguments_parse_test() {
		assert_eq!(
			parse(&["-n", "5", "-z", "EST5EDT,M3.2.0,M11.1.0", "-t", "2024-04-12 10:27:00.519 -07:00", "wwvb"]),
			Ok(Arguments {
				count: NonZero::new(5).unwrap(),
				timezone: Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0").ok(),
				time: Some(TimeSpec { sec: 1712942820, nsec: 519000000 }),
				..signal_only(SignalType::WWVB)
			})
		);

		assert_eq!(parse(&["jjy40"]), Ok(signal_only(SignalType::JJY40)));

		// Signal first, long forms
		assert_eq!(
			parse(&["dcf77", "--timezone", "CET-1CEST,M3.5.0,M10.5.0/3", "--time", "2025-03-30T01:59Z"]),
			Ok(Arguments {
				timezone: Timezone::parse(b"CET-1CEST,M3.5.0,M10.5.0/3").ok(),
				time: Some(TimeSpec { sec: 1743299940, nsec: 0 }),
				..signal_only(SignalType::DCF77)
			})
		);

		// Later options replace earlier ones
		assert_eq!(
			parse(&["-c", "7", "--print", "msf", "--count", "2", "dcf77"]),
			Ok(Arguments { count: NonZero::new(2).unwrap(), print: true, ..signal_only(SignalType::DCF77) })
		);

		assert_eq!(
			parse(&["-t", "2025-01-01", "-p", "jjy"]),
			Ok(Arguments {
				time: Some(TimeSpec { sec: 1735689600, nsec: 0 }),
				print: true,
				..signal_only(SignalType::JJY60)
			})
		);
	}

	#[test]
	fn arguments_error_test() {
		assert_eq!(parse(&[]), Err(ArgumentsError::MissingSignal));
		assert_eq!(parse(&["-n", "5"]), Err(ArgumentsError::MissingSignal));
		assert_eq!(parse(&["-n"]), Err(ArgumentsError::MissingParameter(String::from("-n"))));
		assert_eq!(parse(&["msf", "--timezone"]), Err(ArgumentsError::MissingParameter(String::from("--timezone"))));
		assert_eq!(parse(&["msf", "-t"]), Err(ArgumentsError::MissingParameter(String::from("-t"))));
		for bad in ["asd", "0", "-5", ""] {
			assert_eq!(parse(&["-n", bad, "wwvb"]), Err(ArgumentsError::InvalidCount(String::from(bad))));
		}
		assert_eq!(
			parse(&["-z", "EST5EDT", "wwvb"]),
			Err(ArgumentsError::TimezoneError(TzStringError::MissingTzDateRule))
		);
		assert!(matches!(parse(&["-t", "yesterday", "wwvb"]), Err(ArgumentsError::DateTimeParseError(_))));
		assert_eq!(parse(&["--ntp", "pool.ntp.org", "wwvb"]), Err(ArgumentsError::UnrecognizedOption(String::from("--ntp"))));
		assert_eq!(parse(&["wwv"]), Err(ArgumentsError::InvalidSignal(String::from("wwv"))));
		// A later valid signal replaces an invalid one
		assert_eq!(parse(&["wwv", "wwvb"]), Ok(signal_only(SignalType::WWVB)));
		assert_eq!(parse(&["wwvb", "-h"]), Err(ArgumentsError::Help));
		assert_eq!(parse(&["--help", "-x"]), Err(ArgumentsError::Help));
	}
}
