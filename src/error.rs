//! Error types used across modules.
//!
//! This module contains the error types that may be created and used within this crate. See
//! individual error types for documentation.

use std::{error, fmt};
use time::tz;

/// The error type for preparing minutes to transmit.
#[cfg_attr(test, derive(PartialEq))]
pub enum TransmitError {
	/// The system clock could not be read.
	ClockUnavailable,
	/// The input time is before the Unix epoch (Jan 1, 1970) and not supported. The unsupported time
	/// is provided in the payload.
	UnsupportedTime(i64),
	/// Error parsing the default timezone. The underlying error is provided in the payload.
	TimezoneError(tz::TzStringError)
}

impl fmt::Display for TransmitError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransmitError::ClockUnavailable => write!(f, "Failed to get current system time"),
			TransmitError::UnsupportedTime(x) => write!(f, "Unsupported time: {}", x),
			TransmitError::TimezoneError(x) => write!(f, "Timezone error: {}", x),
		}
	}
}

impl fmt::Debug for TransmitError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl error::Error for TransmitError {}

impl From<tz::TzStringError> for TransmitError {
	fn from(value: tz::TzStringError) -> Self {
		TransmitError::TimezoneError(value)
	}
}
