//! Properties every encoder must hold for arbitrary valid civil times.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use signals::{dcf77::DCF77, jjy::JJY, msf::MSF, wwvb::WWVB, Station, Symbol, TimeCode};
use time::{CivilTime, DstContext};

const SAMPLES: usize = 2000;

fn random_time(rng: &mut ChaCha8Rng) -> (CivilTime, DstContext) {
	// 1970 through the end of 2199
	let unix = rng.gen_range(0..7258118400_i64);
	let isdst = rng.gen_bool(0.5);
	let t = CivilTime::from_timestamp(unix, 0, isdst).unwrap();
	(t, DstContext { today: rng.gen(), tomorrow: rng.gen() })
}

fn all_stations() -> [Station; 4] {
	[
		Station::WWVB(WWVB::new()),
		Station::DCF77(DCF77::new()),
		Station::JJY(JJY::default()),
		Station::MSF(MSF::new())
	]
}

fn one(s: Symbol) -> u32 {
	(s == Symbol::One) as u32
}

fn a_bit(s: Symbol) -> u32 {
	s.channels().is_some_and(|(a, _)| a) as u32
}

fn b_bit(s: Symbol) -> u32 {
	s.channels().is_some_and(|(_, b)| b) as u32
}

fn count(frame: &signals::Frame, seconds: std::ops::RangeInclusive<usize>, bit: fn(Symbol) -> u32) -> u32 {
	seconds.map(|s| bit(frame.get(s))).sum()
}

#[test]
fn dcf77_parity_closure() {
	let mut rng = ChaCha8Rng::seed_from_u64(77);
	let mut d = DCF77::new();
	for _ in 0..SAMPLES {
		let (t, dst) = random_time(&mut rng);
		d.encode_minute(&t, dst);
		let f = d.frame();
		assert_eq!(count(f, 21..=28, one) % 2, 0, "{:?}", t);
		assert_eq!(count(f, 29..=35, one) % 2, 0, "{:?}", t);
		assert_eq!(count(f, 36..=58, one) % 2, 0, "{:?}", t);
	}
}

#[test]
fn jjy_parity_closure() {
	let mut rng = ChaCha8Rng::seed_from_u64(40);
	let mut j = JJY::default();
	for _ in 0..SAMPLES {
		let (t, dst) = random_time(&mut rng);
		j.encode_minute(&t, dst);
		let f = j.frame();
		assert_eq!((count(f, 12..=18, one) + one(f.get(36))) % 2, 0, "{:?}", t);
		assert_eq!((count(f, 1..=8, one) + one(f.get(37))) % 2, 0, "{:?}", t);
	}
}

#[test]
fn msf_parity_closure() {
	let mut rng = ChaCha8Rng::seed_from_u64(60);
	let mut m = MSF::new();
	for _ in 0..SAMPLES {
		let (t, dst) = random_time(&mut rng);
		m.encode_minute(&t, dst);
		let f = m.frame();
		assert_eq!((count(f, 17..=24, a_bit) + b_bit(f.get(54))) % 2, 1, "{:?}", t);
		assert_eq!((count(f, 25..=35, a_bit) + b_bit(f.get(55))) % 2, 1, "{:?}", t);
		assert_eq!((count(f, 36..=38, a_bit) + b_bit(f.get(56))) % 2, 1, "{:?}", t);
		assert_eq!((count(f, 39..=51, a_bit) + b_bit(f.get(57))) % 2, 1, "{:?}", t);
	}
}

#[test]
fn markers_are_date_independent() {
	let mut rng = ChaCha8Rng::seed_from_u64(59);
	let mut stations = all_stations();
	for _ in 0..SAMPLES {
		let (t, dst) = random_time(&mut rng);
		for station in stations.iter_mut() {
			station.encode_minute(&t, dst);
			let f = station.frame();
			match *station {
				Station::WWVB(_) | Station::JJY(_) => {
					for s in 0..60 {
						assert_eq!(f.get(s) == Symbol::Mark, s % 10 == 9 || s == 0, "{} {:?}", station.name(), t);
					}
				},
				Station::DCF77(_) => {
					assert_eq!(f.get(20), Symbol::One);
					assert_eq!(f.get(59), Symbol::Idle);
					assert_ne!(f.get(17), f.get(18));
				},
				Station::MSF(_) => {
					assert_eq!(f.get(0), Symbol::Mark);
					let pattern: Vec<u32> = (52..60).map(|s| a_bit(f.get(s))).collect();
					assert_eq!(pattern, [0, 1, 1, 1, 1, 1, 1, 0]);
				}
			}
		}
	}
}

#[test]
fn encoding_is_deterministic() {
	let mut rng = ChaCha8Rng::seed_from_u64(1);
	for _ in 0..SAMPLES / 4 {
		let (t, dst) = random_time(&mut rng);
		let mut first = all_stations();
		let mut second = all_stations();
		for (a, b) in first.iter_mut().zip(second.iter_mut()) {
			a.encode_minute(&t, dst);
			// Encoding something else in between must not leak into the next frame
			b.encode_minute(&t.next_minute().next_minute(), DstContext::steady(!dst.today));
			b.encode_minute(&t, dst);
			assert_eq!(a, b);
		}
	}
}

#[test]
fn waveforms_have_one_step() {
	for station in all_stations() {
		for symbol in [Symbol::Zero, Symbol::One, Symbol::Mark] {
			let steps = (1..1000)
				.filter(|&ms| station.signal_level(symbol, ms) != station.signal_level(symbol, ms - 1))
				.count();
			assert_eq!(steps, 1, "{} {:?}", station.name(), symbol);
		}
	}
}
