//! Emulate radio time code stations using simple audio output.
//!
//! This crate generates the time codes of public long wave time stations ([WWVB], [DCF77],
//! [JJY40/60], and [MSF]) and outputs them to the device's default audio output. This works by
//! taking advantage of stray RF signals created by audio hardware as a side effect of their
//! operation -- the audio output itself is not useful as devices listening for these time signals
//! use RF rather than audio. See [`carrier`] for how frames become audio.
//!
//! [WWVB]: https://en.wikipedia.org/wiki/WWVB
//! [DCF77]: https://en.wikipedia.org/wiki/DCF77
//! [JJY40/60]: https://en.wikipedia.org/wiki/JJY
//! [MSF]: https://en.wikipedia.org/wiki/Time_from_NPL_(MSF)
//!
//! # Command Line Arguments
//!
//! General form: `timecode [options...] signal`
//!
//! In addition to one required argument (the signal to generate), this application supports
//! several optional command line arguments for configuration:
//!
//! | Short form | Long form    | Argument           | Default          | Description                     |
//! | ---------- | ------------ | ------------------ | ---------------- | ------------------------------- |
//! | `-n`, `-c` | `--count`    | Integer > 0        | 4                | The number of minutes to output |
//! | `-z`       | `--timezone` | [TZ string]        | Signal-dependent | The DST rules to use            |
//! | `-t`       | `--time`     | [Date time string] | Current time     | The starting time to transmit   |
//! | `-p`       | `--print`    |                    |                  | Print frames instead of playing |
//!
//! Each signal uses timezone information slightly differently, see [`source`] for details and
//! defaults. If DST is specified in the TZ string, the rules for switching to/from DST must be
//! included.
//!
//! The last argument must be the signal to generate, one of:
//! - `wwvb`
//! - `dcf77`
//! - `jjy` (alias for `jjy60`)
//! - `jjy40`
//! - `jjy60`
//! - `msf`
//!
//! Diagnostics are written to stderr and filtered with `RUST_LOG` (default `info`).
//!
//! [TZ string]: time::tz::Timezone::parse
//! [date time string]: time::parse_timestamp
//!
//! # Examples
//!
//! Launch with default settings using WWVB
//! ```sh
//! timecode wwvb
//! ```
//!
//! Transmit DCF77 for 8 minutes
//! ```sh
//! timecode -n 8 dcf77
//! ```
//!
//! Print the MSF frames for the minutes around the end of BST
//! ```sh
//! timecode -p -n 3 -t "2025-10-26T00:59" msf
//! ```

use std::error::Error;
use std::num::NonZero;
use std::process::ExitCode;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::sync::mpsc::{sync_channel, Receiver};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Sample;
use signals::TimeCode;
use time::{CivilTime, TimeSpec};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::{Arguments, ArgumentsError};
use carrier::Transmission;
use error::TransmitError;
use source::Source;

mod args;
mod carrier;
mod error;
mod source;

/// Output sample rate in Hz.
const SAMPLE_RATE: u32 = 48000;

/// Simple multi-threaded flag using a condition variable.
///
/// Note that this type does not currently support re-use, i.e. when a single thread calls
/// [`Flagger::notify`], all subsequent calls to [`Flagger::wait`] will return immediately.
///
/// # Examples
/// ```
/// let flagger = Flagger::new();
/// let flagger_clone = flagger.clone();
/// thread::spawn(move || {
/// 	// Do some work
///
/// 	// Notify work completed
/// 	flagger_clone.notify();
/// });
///
/// // Wait for thread to complete
/// flagger.wait();
/// ```
struct Flagger {
	/// Mutex containing the flag. `true` means continue waiting.
	mutex: Mutex<bool>,
	/// Condition variable to manage wait/notify.
	cond: Condvar
}

impl Flagger {
	/// Create a new [`Flagger`] ready to be [`wait`](Flagger::wait)ed on.
	fn new() -> Arc<Flagger> {
		Arc::new(Flagger {
			mutex: Mutex::new(true),
			cond: Condvar::new()
		})
	}

	/// Wait for another thread to call [`Flagger::notify`].
	///
	/// A poisoned lock is treated like a notification, since the flag is a plain `bool`.
	fn wait(&self) {
		let guard = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);
		drop(self.cond.wait_while(guard, |pending| *pending).unwrap_or_else(PoisonError::into_inner));
	}

	/// Notify threads [`wait`](Flagger::wait)ing to unblock.
	///
	/// This call will unblock all waiting threads, and immediately unblock all subsequent calls to
	/// [`Flagger::wait`].
	fn notify(&self) {
		let mut flag = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);
		*flag = false;
		self.cond.notify_all();
	}
}

/// Current state of the audio callback.
enum WriterState {
	/// Waiting for the first minute. Write [`f32::EQUILIBRIUM`].
	Waiting,
	/// Running, write the outputs of the carrier writer.
	Running,
	/// Finishing, pad with [`f32::EQUILIBRIUM`] and notify the main thread.
	Finishing
}

/// Make an audio callback that calls `func` to render each minute received on `rx`.
///
/// The callback provides three core behaviors:
/// 1. It reads [`Transmission`]s from the receiver, `rx`, to hand to `func`.
/// 2. It repeatedly calls `func`, as needed, to ensure the buffer is written fully.
/// 3. It writes silence before the first minute arrives and after `count` minutes are done, then
///    notifies `flagger`.
///
/// `func` follows [`carrier::make_writer`]: it takes the transmission and the buffer to write into,
/// and returns the number of samples written and whether the minute is complete.
fn make_callback<F>(rx: Receiver<Transmission>, flagger: Arc<Flagger>, count: NonZero<usize>, mut func: F)
-> impl FnMut(&mut [f32], &cpal::OutputCallbackInfo)
where F: FnMut(&mut Transmission, &mut [f32]) -> (usize, bool) + Send
{
	let mut state = WriterState::Waiting;
	let mut transmission = None;
	let mut c = 0;
	let count = count.get();

	move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
		match state {
			WriterState::Waiting => {
				if let Ok(t) = rx.try_recv() {
					transmission = Some(t);
					state = WriterState::Running;
				}
			},
			WriterState::Finishing => flagger.notify(),
			WriterState::Running => ()
		}

		let mut i = 0;
		if let WriterState::Running = state {
			if let Some(t) = transmission.as_mut() {
				let len = data.len();
				// Keep writing until the buffer is full
				while i < len {
					let (j, next) = func(t, &mut data[i..]);
					i += j;
					// At the end of a minute move on to the next one, or pad with silence
					if next {
						c += 1;
						if let Ok(n) = rx.try_recv() {
							*t = n;
						} else {
							state = if c < count { WriterState::Waiting } else { WriterState::Finishing };
							break;
						}
					}
				}
			}
		}
		data.iter_mut().skip(i).for_each(|v| *v = f32::EQUILIBRIUM);
	}
}

/// Start time: the `--time` argument or the system clock.
fn start_time(args: &Arguments) -> Result<TimeSpec, TransmitError> {
	match args.time {
		Some(t) => Ok(t),
		None => time::now().ok_or(TransmitError::ClockUnavailable)
	}
}

/// Print `count` consecutive frames, one per line, labelled with the UTC minute they belong to.
fn print_frames(source: &mut Source, time: &mut TimeSpec, count: NonZero<usize>) -> Result<(), TransmitError> {
	for _ in 0..count.get() {
		let minute = time.start_of_minute();
		let t = source.next_minute(time)?;
		let utc = CivilTime::from_timestamp(minute, 0, false).ok_or(TransmitError::UnsupportedTime(minute))?;
		println!(
			"{:04}-{:02}-{:02}T{:02}:{:02}Z {}",
			utc.year, utc.mon + 1, utc.day, utc.hour, utc.min, t.station.frame()
		);
	}
	Ok(())
}

/// Generate a time signal and play it over the default audio output device.
///
/// Creates and configures output at 48kHz, 1024 sample `f32` buffer, and transmits `args.count`
/// minutes, blocking until complete. With `args.print` nothing is played and the frames are
/// printed instead.
///
/// # Errors
///
/// This function can generate a variety of errors, all wrapped in `Box<dyn Error>`:
/// - [`cpal::BuildStreamError`], [`cpal::PlayStreamError`] from configuring and playing audio.
/// - `&str` if there is no output audio device.
/// - [`TransmitError`] if the time cannot be read or encoded.
/// - [`std::sync::mpsc::SendError`] for errors sending minutes to the audio output thread.
fn play(args: Arguments) -> Result<ExitCode, Box<dyn Error>> {
	let mut source = Source::new(args.signal, args.timezone)?;
	let mut time = start_time(&args)?;

	if args.print {
		print_frames(&mut source, &mut time, args.count)?;
		return Ok(ExitCode::SUCCESS);
	}

	// Set up output device
	let host = cpal::default_host();
	let device = host.default_output_device().ok_or("Failed to get default audio output device")?;
	let config = cpal::StreamConfig {
		channels: 1,
		sample_rate: cpal::SampleRate(SAMPLE_RATE),
		buffer_size: cpal::BufferSize::Fixed(1024),
	};
	// Set up thread synchronization
	let (tx, rx) = sync_channel::<Transmission>(0);
	let flagger = Flagger::new();
	let on_error = {
		let flagger = flagger.clone();
		move |e: cpal::StreamError| {
			tracing::error!(error = %e, "audio stream failed");
			flagger.notify();
		}
	};

	let stream = device.build_output_stream(
					&config,
					make_callback(rx, flagger.clone(), args.count, carrier::make_writer::<{ SAMPLE_RATE as u64 }>()),
					on_error,
					None)?;
	stream.play()?;

	let station = source.station().name();
	info!(
		station,
		carrier = source.station().frequency(),
		audio = carrier::subharmonic(source.station().frequency(), SAMPLE_RATE as u64),
		count = args.count.get(),
		"transmitting"
	);

	for _ in 0..args.count.get() {
		let minute = time.start_of_minute();
		let t = source.next_minute(&mut time)?;
		debug!(station, minute, frame = %t.station.frame(), "encoded");
		tx.send(t)?;
		info!(station, minute, "minute queued");
	}

	// Wait for audio to complete
	flagger.wait();
	Ok(ExitCode::SUCCESS)
}

/// Main program entry point.
///
/// Parses input arguments and plays time signal audio output. See [`crate`] documentation for
/// details.
fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	let args = match Arguments::parse(std::env::args_os().skip(1)) {
		Ok(a) => a,
		Err(e) => {
			return if let ArgumentsError::Help = e {
				println!("\
Emulate radio time code stations with no extra hardware.

Usage: timecode [OPTIONS] <SIGNAL>

Options:
  -n, -c, --count <COUNT>   the number of minutes to output, default 4
  -z, --timezone <TZ>       the TZ string to use, default depends on signal
  -t, --time <DATETIME>     the starting time to use, defaults to now
  -p, --print               print frames instead of playing audio

Supported signals:
  wwvb
  dcf77
  jjy (alias jjy60)
  jjy40
  jjy60
  msf

Examples:
  timecode -n 6 wwvb
  timecode -z \"CET-1CEST,M3.5.0,M10.5.0/3\" dcf77
  timecode -p -t \"2024-04-12 10:27:00.519 -07:00\" msf\n");
				ExitCode::SUCCESS
			} else {
				eprintln!("{}", e);
				ExitCode::FAILURE
			}
		}
	};

	play(args)
		.inspect_err(|e| eprintln!("{}", e))
		.unwrap_or(ExitCode::FAILURE)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::ffi::OsString;

	#[test]
	fn flagger_test() {
		let flagger = Flagger::new();
		let clone = flagger.clone();
		let handle = std::thread::spawn(move || clone.notify());
		flagger.wait();
		handle.join().unwrap();
		// Stays notified
		flagger.wait();
	}

	#[test]
	fn print_frames_test() {
		let args = Arguments::parse(
			["-p", "-n", "2", "-t", "2024-06-17T09:49:30Z", "wwvb"].into_iter().map(OsString::from)
		).unwrap();
		let mut source = Source::new(args.signal, args.timezone).unwrap();
		let mut time = start_time(&args).unwrap();
		print_frames(&mut source, &mut time, args.count).unwrap();
		assert_eq!(time, TimeSpec { sec: 1718617860, nsec: 0 });
	}
}
