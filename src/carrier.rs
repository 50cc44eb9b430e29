//! Render time code frames as audio.
//!
//! Radio clocks listen for a long wave carrier, far above what a sound card can produce. Audio
//! hardware does however leak RF at harmonics of its output, so playing a sub-harmonic of the
//! station's carrier with the right keying is enough for a nearby clock to pick it up. The
//! sub-harmonic is the carrier divided by the smallest integer that brings it below Nyquist:
//!
//! | Carrier  | Divisor | Output at 48 kHz |
//! | -------- | ------- | ---------------- |
//! | 40 kHz   | 2       | 20 kHz           |
//! | 60 kHz   | 3       | 20 kHz           |
//! | 77.5 kHz | 4       | 19.375 kHz       |
//!
//! The output is a full amplitude sine while the carrier is on and silence while it is off.

use std::f32::consts::PI;
use cpal::Sample;
use signals::{Station, TimeCode, FRAME_LEN};

/// Nanoseconds per second.
const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// One minute of a station, ready for output.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Transmission {
	/// Encoder holding the frame for this minute.
	pub station: Station,
	/// Nanoseconds into the minute at which output starts. Non-zero only for the first minute
	/// when starting mid-minute.
	pub delay: i64
}

impl Transmission {
	/// Wrap an encoded `station` for output starting `delay` nanoseconds into the minute.
	pub fn new(station: Station, delay: i64) -> Transmission {
		Transmission { station, delay }
	}
}

/// Audio frequency used to emulate `frequency` at `sample_rate`.
///
/// Returns the largest `frequency / k` strictly below `sample_rate / 2`.
///
/// # Examples
///
/// ```
/// assert_eq!(subharmonic(60000, 48000), 20000.);
/// assert_eq!(subharmonic(77500, 48000), 19375.);
/// assert_eq!(subharmonic(40000, 48000), 20000.);
/// assert_eq!(subharmonic(10000, 48000), 10000.);
/// ```
pub fn subharmonic(frequency: u32, sample_rate: u64) -> f32 {
	let nyquist = (sample_rate / 2).max(1);
	let k = frequency as u64 / nyquist + 1;
	(frequency as f64 / k as f64) as f32
}

/// Make a writer function that renders [`Transmission`]s at `S` Hz.
///
/// The returned writer fills `data` from the current position in the transmission and returns
/// the number of samples written and whether the end of the minute was reached. When it was, the
/// writer is ready for the next transmission and `data` may not have been filled completely.
///
/// For every sample the writer works out the second and millisecond within the minute, looks up
/// the station's symbol for that second and asks the station for the carrier level.
///
/// # Examples
///
/// ```
/// let mut station = Station::WWVB(WWVB::new());
/// station.encode_minute(&CivilTime::new(2025, 1, 1, 0, 0, 0), DstContext::default());
/// let mut t = Transmission::new(station, 0);
/// let mut writer = make_writer::<48000>();
/// let mut buf = [0f32; 1024];
///
/// loop {
/// 	let (_n, done) = writer(&mut t, &mut buf);
/// 	// Use the results in buf
/// 	if done { break; }
/// }
/// ```
pub fn make_writer<const S: u64>() -> impl FnMut(&mut Transmission, &mut [f32]) -> (usize, bool) {
	let end = FRAME_LEN as u64 * S;
	// Sample position within the minute
	let mut i: u64 = 0;
	// Free running sample counter so the sine stays continuous between minutes
	let mut n: u64 = 0;
	move |t: &mut Transmission, data: &mut [f32]| -> (usize, bool) {
		// Jump ahead if starting mid-minute
		if t.delay > 0 {
			let delay = (t.delay as u64).min(FRAME_LEN as u64 * NANOS_PER_SECOND);
			i = (delay / NANOS_PER_SECOND) * S + (delay % NANOS_PER_SECOND) * S / NANOS_PER_SECOND;
			t.delay = 0;
		}

		let f = subharmonic(t.station.frequency(), S);
		let mut written = 0;
		let mut completed = false;
		for sample in data.iter_mut() {
			if i >= end {
				completed = true;
				break;
			}

			let second = (i / S) as usize;
			let millis = ((i % S) * 1000 / S) as u32;
			let symbol = t.station.symbol_for_second(second);
			*sample = if t.station.signal_level(symbol, millis) {
				let pos = (n % S) as f32 / S as f32;
				(PI * 2. * f * pos).sin()
			} else {
				f32::EQUILIBRIUM
			};

			i += 1;
			n += 1;
			written += 1;
		}

		if i >= end {
			i = 0;
			completed = true;
		}
		(written, completed)
	}
}
