//! Broken-down calendar time and the Gregorian arithmetic behind it.
//!
//! [`CivilTime`] is the value handed to every time code encoder: a normalized calendar date and
//! clock time together with the DST flag for that instant. [`DstContext`] carries the two extra
//! DST flags that WWVB needs to announce transitions.
//!
//! None of the functions here call into libc, so they are thread safe and available in `no_std`
//! builds.
//!
//! # Examples
//!
//! ```
//! # use time::CivilTime;
//! let t = CivilTime::from_timestamp(1718617807, 0, false).unwrap();
//! assert_eq!(t, CivilTime {
//! 	sec: 7,
//! 	min: 50,
//! 	hour: 9,
//! 	day: 17,
//! 	mon: 5,
//! 	year: 2024,
//! 	wday: 1,
//! 	yday: 168,
//! 	isdst: false
//! });
//! ```

/// Seconds per day.
pub(crate) const SECONDS_PER_DAY: i64 = 86400;
/// Days per 400 year Gregorian cycle.
const DAYS_PER_ERA: i64 = 146097;
/// Days from March 1, 0000 to January 1, 1970.
const EPOCH_SHIFT: i64 = 719468;
/// Cumulative days before the first of each month in a non-leap year.
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Check whether a given absolute Gregorian `year` is a leap year.
///
/// # Examples
///
/// ```
/// # use time::isleapyear;
/// assert_eq!(isleapyear(1900), false);
/// assert_eq!(isleapyear(2000), true);
/// assert_eq!(isleapyear(2024), true);
/// assert_eq!(isleapyear(2100), false);
/// ```
#[inline(always)]
pub fn isleapyear(year: u16) -> bool {
	let l = if year % 100 != 0 { 3 } else { 15 };
	(year & l) == 0
}

/// The number of days in month `m` (1-indexed) of year `y`.
///
/// Months outside [1, 12] return a value in [28, 31] rather than panicking.
pub fn days_per_month(y: u16, m: u8) -> u8 {
	if m == 2 {
		if isleapyear(y) { 29 } else { 28 }
	} else {
		30 | ((m ^ (m >> 3)) & 1)
	}
}

/// Days since the Unix epoch for a given year, month (1-indexed), and day.
///
/// Works on the March-based year so the leap day is the last day of the rotated year; see
/// <http://howardhinnant.github.io/date_algorithms.html#days_from_civil>.
///
/// # Examples
///
/// ```
/// # use time::days_from_civil;
/// assert_eq!(days_from_civil(1970, 1, 1), 0);
/// assert_eq!(days_from_civil(2024, 2, 29), 19782);
/// ```
pub fn days_from_civil(y: i64, m: u8, d: u8) -> i64 {
	let m = m as i64;
	let y = if m <= 2 { y - 1 } else { y };
	let era = y.div_euclid(400);
	let yoe = y - era * 400;
	let mp = if m > 2 { m - 3 } else { m + 9 };
	let doy = (153 * mp + 2) / 5 + d as i64 - 1;
	let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
	era * DAYS_PER_ERA + doe - EPOCH_SHIFT
}

/// Inverse of [`days_from_civil`]: returns `(year, month [1, 12], day [1, 31])`.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
	let z = days + EPOCH_SHIFT;
	let era = z.div_euclid(DAYS_PER_ERA);
	let doe = z.rem_euclid(DAYS_PER_ERA);
	let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = doy - (153 * mp + 2) / 5 + 1;
	let m = if mp < 10 { mp + 3 } else { mp - 9 };
	let y = yoe + era * 400;
	(if m <= 2 { y + 1 } else { y }, m as u8, d as u8)
}

/// Get the Unix timestamp for 00:00:00 UTC on a given year, month (1-indexed), and day.
///
/// # Examples
///
/// ```
/// # use time::timestamp_from_ymd;
/// assert_eq!(timestamp_from_ymd(2024, 2, 28), 1709078400);
/// assert_eq!(timestamp_from_ymd(2024, 3, 1), 1709251200);
/// ```
pub fn timestamp_from_ymd(y: u16, m: u8, d: u8) -> i64 {
	days_from_civil(y as i64, m, d) * SECONDS_PER_DAY
}

/// Get the weekday (0-6 => Sunday-Saturday) for a given year, month (1-indexed), and day.
///
/// # Examples
///
/// ```
/// # use time::wday_from_ymd;
/// assert_eq!(wday_from_ymd(2024, 1, 1), 1);   // Monday
/// assert_eq!(wday_from_ymd(2024, 2, 29), 4);  // Thursday
/// assert_eq!(wday_from_ymd(2024, 10, 27), 0); // Sunday
/// ```
pub fn wday_from_ymd(y: u16, m: u8, d: u8) -> u8 {
	// Jan 1, 1970 was a Thursday
	(days_from_civil(y as i64, m, d) + 4).rem_euclid(7) as u8
}

/// Zero-based day of the year for a given year, month (1-indexed), and day.
///
/// # Examples
///
/// ```
/// # use time::yday_from_ymd;
/// assert_eq!(yday_from_ymd(2008, 3, 6), 65);
/// assert_eq!(yday_from_ymd(2024, 12, 31), 365);
/// assert_eq!(yday_from_ymd(2025, 12, 31), 364);
/// ```
pub fn yday_from_ymd(y: u16, m: u8, d: u8) -> u16 {
	let before = DAYS_BEFORE_MONTH.get(m.wrapping_sub(1) as usize).copied().unwrap_or(0);
	let leap = (m > 2 && isleapyear(y)) as u16;
	before.wrapping_add(leap).wrapping_add((d as u16).wrapping_sub(1))
}

/// Daylight saving state around the encoded day.
///
/// Both flags are sampled at local midnight: `today` at the start of the current local day and
/// `tomorrow` at the start of the next one. Only WWVB uses this; the other time codes read
/// [`CivilTime::isdst`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DstContext {
	/// DST in effect at the start of today.
	pub today: bool,
	/// DST in effect at the start of tomorrow.
	pub tomorrow: bool
}

impl DstContext {
	/// Build a context where DST does not change across the day.
	pub const fn steady(isdst: bool) -> DstContext {
		DstContext { today: isdst, tomorrow: isdst }
	}
}

/// Broken-down calendar time, similar to `libc::tm`.
///
/// Key differences from `libc::tm`:
/// - `year` is the absolute Gregorian year (2025), not years since 1900.
/// - `isdst` is a `bool`.
///
/// Values are expected to be normalized (see the field ranges). Time code encoders do not validate
/// them; out of range values produce a well-formed but meaningless frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CivilTime {
	/// Seconds, ranged [0, 60]
	pub sec: u8,
	/// Minutes, ranged [0, 59]
	pub min: u8,
	/// Hours, ranged [0, 23]
	pub hour: u8,
	/// Day of the month, ranged [1, 31]
	pub day: u8,
	/// Month of the year, ranged [0, 11]
	pub mon: u8,
	/// Absolute Gregorian year
	pub year: u16,
	/// Day of the week, ranged [0, 6] => [Sunday, Saturday]
	pub wday: u8,
	/// Day of the year, ranged [0, 365]
	pub yday: u16,
	/// Whether daylight saving time is in effect
	pub isdst: bool
}

impl CivilTime {
	/// Build a civil time from calendar fields, computing `wday` and `yday`.
	///
	/// `mon` is 1-indexed here (January = 1) to match how dates are written; the stored
	/// [`CivilTime::mon`] is zero-based. `isdst` is `false`; see [`CivilTime::with_dst`].
	///
	/// # Examples
	///
	/// ```
	/// # use time::CivilTime;
	/// let t = CivilTime::new(2008, 3, 6, 7, 30, 0);
	/// assert_eq!(t.mon, 2);
	/// assert_eq!(t.yday, 65);
	/// assert_eq!(t.wday, 4);
	/// ```
	pub fn new(year: u16, mon: u8, day: u8, hour: u8, min: u8, sec: u8) -> CivilTime {
		CivilTime {
			sec,
			min,
			hour,
			day,
			mon: mon.wrapping_sub(1),
			year,
			wday: wday_from_ymd(year, mon, day),
			yday: yday_from_ymd(year, mon, day),
			isdst: false
		}
	}

	/// Return a copy with [`CivilTime::isdst`] replaced.
	#[inline(always)]
	pub fn with_dst(mut self, isdst: bool) -> CivilTime {
		self.isdst = isdst;
		self
	}

	/// Convert a Unix timestamp into local calendar time.
	///
	/// `utoff` is the UTC offset in seconds (east positive) that is added to `unixtimestamp` before
	/// conversion, and `isdst` is copied into the result. Only instants on or after the Unix epoch
	/// are supported, both before and after applying `utoff`; anything else returns `None`.
	///
	/// # Examples
	///
	/// ```
	/// # use time::CivilTime;
	/// // Sun, Aug 11 2024 23:34:25 EDT
	/// let t = CivilTime::from_timestamp(1723433665, -14400, true).unwrap();
	/// assert_eq!((t.year, t.mon, t.day, t.hour, t.min, t.sec), (2024, 7, 11, 23, 34, 25));
	/// assert_eq!((t.wday, t.yday, t.isdst), (0, 223, true));
	/// ```
	pub fn from_timestamp(unixtimestamp: i64, utoff: i32, isdst: bool) -> Option<CivilTime> {
		if unixtimestamp < 0 { return None }
		let local = unixtimestamp.checked_add(utoff as i64).filter(|&t| t >= 0)?;
		let days = local / SECONDS_PER_DAY;
		let rem = local % SECONDS_PER_DAY;
		let (y, m, d) = civil_from_days(days);
		let year = u16::try_from(y).ok()?;

		Some(CivilTime {
			sec: (rem % 60) as u8,
			min: (rem / 60 % 60) as u8,
			hour: (rem / 3600) as u8,
			day: d,
			mon: m - 1,
			year,
			wday: ((days + 4) % 7) as u8,
			yday: (days - days_from_civil(y, 1, 1)) as u16,
			isdst
		})
	}

	/// Seconds since the Unix epoch, treating `self` as UTC.
	///
	/// For local times this is the local wall clock expressed as if it were UTC; subtract the UTC
	/// offset to get the instant.
	pub fn timestamp(&self) -> i64 {
		days_from_civil(self.year as i64, self.mon.wrapping_add(1), self.day) * SECONDS_PER_DAY
			+ self.hour as i64 * 3600
			+ self.min as i64 * 60
			+ self.sec as i64
	}

	/// Check whether `self` falls in a leap year.
	#[inline(always)]
	pub fn isleapyear(&self) -> bool {
		isleapyear(self.year)
	}

	/// The civil time one minute later.
	///
	/// Carries minute into hour, day, month, and year, keeping `wday` and `yday` in step. `sec`
	/// and `isdst` are copied unchanged; this is a pure calendar step that knows nothing about
	/// DST transitions, see [`Timezone::next_minute`](crate::tz::Timezone::next_minute). Fields that are already out of range are incremented without carrying and
	/// never panic.
	///
	/// # Examples
	///
	/// ```
	/// # use time::CivilTime;
	/// let t = CivilTime::new(2025, 12, 31, 23, 59, 0).next_minute();
	/// assert_eq!(t, CivilTime::new(2026, 1, 1, 0, 0, 0));
	/// ```
	pub fn next_minute(&self) -> CivilTime {
		let mut t = *self;
		t.min = t.min.wrapping_add(1);
		if t.min != 60 { return t }
		t.min = 0;

		t.hour = t.hour.wrapping_add(1);
		if t.hour != 24 { return t }
		t.hour = 0;

		t.wday = (t.wday.wrapping_add(1)) % 7;
		t.yday = t.yday.wrapping_add(1);
		t.day = t.day.wrapping_add(1);
		if t.day <= days_per_month(t.year, t.mon.wrapping_add(1)) { return t }
		t.day = 1;

		t.mon = t.mon.wrapping_add(1);
		if t.mon != 12 { return t }
		t.mon = 0;
		t.yday = 0;
		t.year = t.year.wrapping_add(1);
		t
	}
}
