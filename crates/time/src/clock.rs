//! Unix time with nanosecond granularity and access to the system clock.

#[cfg(feature = "now")]
use core::mem::MaybeUninit;
#[cfg(feature = "now")]
use libc::{timespec, clock_gettime, CLOCK_REALTIME};

/// Nanoseconds per second.
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Unix time with nanosecond granularity.
///
/// # Examples
///
/// ```
/// # use time::TimeSpec;
/// // Jan 1, 2025. 12:00:42.5 UTC.
/// let t = TimeSpec { sec: 1735732842, nsec: 500_000_000 };
/// assert_eq!(t.start_of_minute(), 1735732800);
/// assert_eq!(t.nanos_into_minute(), 42_500_000_000);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeSpec {
	/// Seconds since the Unix epoch
	pub sec: i64,
	/// Nanoseconds since the beginning of `sec`, ranging [0-999999999]
	pub nsec: i64
}

impl TimeSpec {
	/// Unix timestamp of the start of the minute containing `self`.
	#[inline(always)]
	pub fn start_of_minute(&self) -> i64 {
		self.sec - self.sec.rem_euclid(60)
	}

	/// Nanoseconds elapsed since [`TimeSpec::start_of_minute`].
	#[inline(always)]
	pub fn nanos_into_minute(&self) -> i64 {
		self.sec.rem_euclid(60) * NANOS_PER_SECOND + self.nsec.clamp(0, NANOS_PER_SECOND - 1)
	}
}

#[cfg(feature = "now")]
impl From<timespec> for TimeSpec {
	fn from(value: timespec) -> Self {
		TimeSpec {
			sec: value.tv_sec as i64,
			nsec: value.tv_nsec as i64
		}
	}
}

/// Get the current time as a Unix timestamp with nanosecond granularity.
///
/// Returns `None` if `libc::clock_gettime` fails.
///
/// # Examples
///
/// ```
/// # use time::now;
/// let c = now().expect("Failed to get current time");
/// assert!(c.sec > 0);
/// ```
#[cfg(feature = "now")]
pub fn now() -> Option<TimeSpec> {
	let mut time = MaybeUninit::<timespec>::uninit();
	// Safety:
	// - clock_gettime does not read time, only writes
	// - if clock_gettime returns zero, time is successfully initialized
	unsafe {
		match clock_gettime(CLOCK_REALTIME, time.as_mut_ptr()) {
			0 => Some(time.assume_init().into()),
			_ => None
		}
	}
}
