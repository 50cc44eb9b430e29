//! Bit packing shared by every time code.
//!
//! Frames are assembled in a `u64` accumulator where second `s` of the minute lives at bit
//! `59 - s`. A field that is transmitted most significant bit first and ends at second `e` is
//! therefore inserted with `<< (59 - e)`, and reading the accumulator from bit 59 down to bit 0
//! replays the minute in transmission order.
//!
//! # Examples
//!
//! ```
//! # use signals::bits::{at, bcd, field, parity, Parity};
//! // Minute 37 as plain BCD in seconds 45-51
//! let a = field(bcd(37), 51, 7);
//! assert_eq!(a >> at(51), 0b0110111);
//! assert_eq!(parity(a, at(51), at(45), Parity::Odd), 0);
//! ```

/// Accumulator bit index of second `s`.
///
/// Seconds outside [0, 59] wrap instead of panicking; callers only pass constants.
#[inline(always)]
pub const fn at(s: usize) -> u32 {
	59u32.wrapping_sub(s as u32) & 0x3f
}

/// Two digit binary coded decimal: `(tens << 4) | units`.
///
/// Hundreds are dropped, so `bcd(2025)` encodes `25`.
///
/// # Examples
///
/// ```
/// # use signals::bits::bcd;
/// assert_eq!(bcd(0), 0x00);
/// assert_eq!(bcd(59), 0x59);
/// assert_eq!(bcd(2025), 0x25);
/// ```
#[inline]
pub const fn bcd(n: u32) -> u64 {
	(((n / 10 % 10) << 4) | (n % 10)) as u64
}

/// Three digit binary coded decimal with a zero bit after each nibble boundary:
/// `(hundreds << 10) | (tens << 5) | units`.
///
/// WWVB and JJY interleave an unused second between decimal digit groups, which this layout
/// reproduces.
///
/// # Examples
///
/// ```
/// # use signals::bits::padded_bcd;
/// assert_eq!(padded_bcd(30), 0b011_0_0000);
/// assert_eq!(padded_bcd(366), 0b11_0_0110_0_0110);
/// ```
#[inline]
pub const fn padded_bcd(n: u32) -> u64 {
	let h = (n / 100 % 10) as u64;
	let t = (n / 10 % 10) as u64;
	let u = (n % 10) as u64;
	(h << 10) | (t << 5) | u
}

/// Reverse the bit order of a byte.
///
/// # Examples
///
/// ```
/// # use signals::bits::reverse8;
/// assert_eq!(reverse8(0b0000_0001), 0b1000_0000);
/// assert_eq!(reverse8(0b1101_0010), 0b0100_1011);
/// ```
#[inline(always)]
pub const fn reverse8(b: u8) -> u8 {
	b.reverse_bits()
}

/// Which total a parity bit completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
	/// The parity bit makes the number of set bits even.
	Even,
	/// The parity bit makes the number of set bits odd.
	Odd
}

/// Compute the parity bit for the inclusive accumulator bit range `[lo, hi]`.
///
/// The bounds may be given in either order, since seconds run opposite to bit indices. Indices
/// above 63 are clamped.
///
/// # Examples
///
/// ```
/// # use signals::bits::{parity, Parity};
/// assert_eq!(parity(0b1011, 0, 3, Parity::Even), 1);
/// assert_eq!(parity(0b1011, 0, 3, Parity::Odd), 0);
/// assert_eq!(parity(0b1011, 3, 0, Parity::Even), 1);
/// assert_eq!(parity(0b1011, 0, 1, Parity::Even), 0);
/// ```
pub const fn parity(bits: u64, lo: u32, hi: u32, p: Parity) -> u64 {
	let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
	let lo = if lo > 63 { 63 } else { lo };
	let hi = if hi > 63 { 63 } else { hi };
	let mask = (u64::MAX >> (63 - (hi - lo))) << lo;
	let odd = ((bits & mask).count_ones() & 1) as u64;
	match p {
		Parity::Even => odd,
		Parity::Odd => odd ^ 1
	}
}

/// Place a `width` bit value, most significant bit first, so that it ends at second `last`.
///
/// # Examples
///
/// ```
/// # use signals::bits::{at, field};
/// assert_eq!(field(0b101, 3, 3), 0b101 << at(3));
/// // Bits above `width` are discarded
/// assert_eq!(field(0b1101, 3, 3), 0b101 << at(3));
/// ```
#[inline]
pub const fn field(value: u64, last: usize, width: u32) -> u64 {
	(value & mask(width)) << at(last)
}

/// Place a `width` bit value, least significant bit first, starting at second `first`.
///
/// `width` is at most 8 and `first` at most 52, since the value is turned around with
/// [`reverse8`].
///
/// # Examples
///
/// ```
/// # use signals::bits::{at, lsb_first};
/// // Value bit 0 is sent at second 21, bit 1 at second 22, ...
/// let a = lsb_first(0b0000110, 21, 7);
/// assert_eq!(a, (1 << at(22)) | (1 << at(23)));
/// ```
#[inline]
pub const fn lsb_first(value: u64, first: usize, width: u32) -> u64 {
	let v = reverse8((value & mask(width)) as u8) as u64;
	v << at(first).saturating_sub(7)
}

/// Whether second `s` is set in accumulator `bits`.
#[inline(always)]
pub const fn is_set(bits: u64, s: usize) -> bool {
	(bits >> at(s)) & 1 == 1
}

#[inline(always)]
const fn mask(width: u32) -> u64 {
	if width >= 64 { u64::MAX } else { (1 << width) - 1 }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bcd_test() {
		for n in 0..100 {
			let b = bcd(n);
			assert_eq!((b >> 4) * 10 + (b & 0xf), n as u64);
		}
		assert_eq!(bcd(u32::MAX), 0x95);
	}

	#[test]
	fn padded_bcd_test() {
		assert_eq!(padded_bcd(0), 0);
		assert_eq!(padded_bcd(7), 0b0111);
		assert_eq!(padded_bcd(59), 0b101_0_1001);
		assert_eq!(padded_bcd(23), 0b10_0_0011);
		assert_eq!(padded_bcd(66), 0b00_0_0110_0_0110);
		assert_eq!(padded_bcd(365), 0b11_0_0110_0_0101);
		// Padding bits are always clear
		for n in 0..1000 {
			assert_eq!(padded_bcd(n) & 0b1_0000_1_0000, 0);
		}
	}

	#[test]
	fn reverse8_test() {
		for b in 0..=255u8 {
			assert_eq!(reverse8(reverse8(b)), b);
			for i in 0..8 {
				assert_eq!((b >> i) & 1, (reverse8(b) >> (7 - i)) & 1);
			}
		}
	}

	#[test]
	fn parity_test() {
		assert_eq!(parity(0, 0, 63, Parity::Even), 0);
		assert_eq!(parity(0, 0, 63, Parity::Odd), 1);
		assert_eq!(parity(u64::MAX, 0, 63, Parity::Even), 0);
		assert_eq!(parity(u64::MAX, 0, 62, Parity::Even), 1);
		assert_eq!(parity(1 << 63, 63, 63, Parity::Even), 1);
		assert_eq!(parity(0b1000_0001, 1, 6, Parity::Even), 0);
		assert_eq!(parity(0b1000_0001, 0, 6, Parity::Even), 1);

		// Extreme inputs must not panic
		parity(u64::MAX, 100, 200, Parity::Odd);
		parity(u64::MAX, u32::MAX, 0, Parity::Odd);
	}

	#[test]
	fn placement_test() {
		assert_eq!(at(0), 59);
		assert_eq!(at(59), 0);
		assert_eq!(field(1, 0, 1), 1 << 59);
		assert_eq!(field(0b11, 59, 2), 0b11);
		assert_eq!(lsb_first(1, 50, 8), 1 << at(50));
		assert_eq!(lsb_first(0x80, 50, 8), 1 << at(57));
		assert!(is_set(field(1, 17, 1), 17));
		assert!(!is_set(field(1, 17, 1), 18));
	}
}
