//! Civil time for radio time code encoders.
//!
//! Time code stations broadcast broken-down calendar time, not Unix time. This crate converts
//! between the two ([`CivilTime`]), evaluates daylight saving rules written as POSIX TZ strings
//! ([`tz::Timezone`]), and steps civil time forward by one minute, either on the calendar alone
//! ([`CivilTime::next_minute`]) or across DST transitions ([`tz::Timezone::next_minute`]).
//! Everything is `no_std`.
//!
//! If the `now` feature is enabled, [`now`] reads the system clock.
//!
//! # Examples
//!
//! Conversion from Unix time to UTC calendar time.
//! ```
//! # use time::CivilTime;
//! let date = CivilTime::from_timestamp(1718617807, 0, false).unwrap();
//! assert_eq!(date, CivilTime::new(2024, 6, 17, 9, 50, 7));
//! assert_eq!((date.wday, date.yday), (1, 168));
//! ```
//!
//! Conversion from Unix time to US Eastern calendar time.
//! ```
//! # use time::{tz::Timezone, CivilTime, DstContext};
//! let timezone = Timezone::parse(b"EST5EDT,M3.2.0,M11.1.0").unwrap();
//! let date = timezone.civil(1723433665).unwrap();
//! assert_eq!(date, CivilTime::new(2024, 8, 11, 23, 34, 25).with_dst(true));
//! assert_eq!(timezone.dst_context(1723433665), DstContext::steady(true));
//! ```

#![no_std]

mod civil;
mod clock;
mod parse;
pub mod tz;

pub use civil::*;
pub use clock::*;
pub use parse::*;
