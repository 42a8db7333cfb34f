/*!
# cdctl: Disc Addressing
*/

use crate::{
	CD_FRAMES_PER_SEC,
	CD_PREGAP,
	CD_SECS_PER_MIN,
	CdioError,
};
use std::fmt;



/// # Frames Per Minute.
const CD_FRAMES_PER_MIN: u32 = CD_FRAMES_PER_SEC * CD_SECS_PER_MIN;

/// # Max Minutes.
///
/// MSF minutes are stored as a two-digit BCD value.
const MAX_MINUTES: u32 = 99;



#[must_use]
/// # LSN to LBA.
///
/// Logical sector numbers start at the beginning of the program area; logical
/// block addresses include the two-second pregap.
pub const fn lsn_to_lba(lsn: i32) -> i32 { lsn.saturating_add(CD_PREGAP) }

#[must_use]
/// # LBA to LSN.
pub const fn lba_to_lsn(lba: i32) -> i32 { lba.saturating_sub(CD_PREGAP) }



#[derive(Debug, Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Minutes/Seconds/Frames.
///
/// A disc position expressed as a playback timestamp, with 75 frames (sectors)
/// per second.
///
/// ```
/// use cdctl_core::Msf;
///
/// let msf = Msf::from_lsn(0).unwrap();
/// assert_eq!(msf.to_string(), "00:02:00");
/// assert_eq!(msf.lba(), 150);
/// ```
pub struct Msf {
	m: u8,
	s: u8,
	f: u8,
}

impl fmt::Display for Msf {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}:{:02}:{:02}", self.m, self.s, self.f)
	}
}

impl TryFrom<&str> for Msf {
	type Error = CdioError;

	fn try_from(src: &str) -> Result<Self, Self::Error> {
		let mut parts = src.trim().split(':');
		let m = parts.next().and_then(parse_part).ok_or(CdioError::InvalidArg)?;
		let s = parts.next().and_then(parse_part).ok_or(CdioError::InvalidArg)?;
		let f = parts.next().and_then(parse_part).ok_or(CdioError::InvalidArg)?;
		if parts.next().is_some() { return Err(CdioError::InvalidArg); }

		Self::new(m, s, f).ok_or(CdioError::InvalidArg)
	}
}

impl Msf {
	#[must_use]
	/// # New.
	///
	/// Returns `None` if the seconds or frames are out of range, or the
	/// minutes exceed 99.
	pub const fn new(m: u8, s: u8, f: u8) -> Option<Self> {
		if
			(m as u32) <= MAX_MINUTES &&
			(s as u32) < CD_SECS_PER_MIN &&
			(f as u32) < CD_FRAMES_PER_SEC
		{
			Some(Self { m, s, f })
		}
		else { None }
	}

	#[must_use]
	#[allow(clippy::cast_possible_truncation, clippy::integer_division)]
	/// # From LBA.
	///
	/// Returns `None` if the LBA is negative or too big to be represented.
	pub const fn from_lba(lba: i32) -> Option<Self> {
		if lba < 0 { return None; }
		let lba = lba.unsigned_abs();

		let m = lba / CD_FRAMES_PER_MIN;
		if MAX_MINUTES < m { return None; }

		let rem = lba - m * CD_FRAMES_PER_MIN;
		let s = rem / CD_FRAMES_PER_SEC;
		let f = rem - s * CD_FRAMES_PER_SEC;

		// All three fit in a u8 at this point.
		Some(Self {
			m: m as u8,
			s: s as u8,
			f: f as u8,
		})
	}

	#[must_use]
	/// # From LSN.
	pub const fn from_lsn(lsn: i32) -> Option<Self> { Self::from_lba(lsn_to_lba(lsn)) }
}

impl Msf {
	#[must_use]
	/// # Minutes.
	pub const fn minutes(self) -> u8 { self.m }

	#[must_use]
	/// # Seconds.
	pub const fn seconds(self) -> u8 { self.s }

	#[must_use]
	/// # Frames.
	pub const fn frames(self) -> u8 { self.f }

	#[must_use]
	#[allow(clippy::cast_possible_wrap)]
	/// # LBA.
	pub const fn lba(self) -> i32 {
		// The max is 99:59:74, which fits comfortably in an i32.
		(
			self.m as u32 * CD_FRAMES_PER_MIN +
			self.s as u32 * CD_FRAMES_PER_SEC +
			self.f as u32
		) as i32
	}

	#[must_use]
	/// # LSN.
	pub const fn lsn(self) -> i32 { lba_to_lsn(self.lba()) }
}



/// # Parse Part.
///
/// Parse one (up to) two-digit component of an MSF string.
fn parse_part(src: &str) -> Option<u8> {
	if (1..=2).contains(&src.len()) && src.bytes().all(|b| b.is_ascii_digit()) {
		src.parse().ok()
	}
	else { None }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_lsn_lba() {
		assert_eq!(lsn_to_lba(0), 150);
		assert_eq!(lba_to_lsn(150), 0);
		assert_eq!(lba_to_lsn(0), -150);
		assert_eq!(lsn_to_lba(i32::MAX), i32::MAX);
	}

	#[test]
	fn t_from_lba() {
		for (lba, expected) in [
			(0, "00:00:00"),
			(74, "00:00:74"),
			(75, "00:01:00"),
			(150, "00:02:00"),
			(4500, "01:00:00"),
			(4574, "01:00:74"),
			(449_999, "99:59:74"),
		] {
			let msf = Msf::from_lba(lba).expect("MSF failed.");
			assert_eq!(msf.to_string(), expected);
			assert_eq!(msf.lba(), lba);
			assert_eq!(Msf::try_from(expected), Ok(msf));
		}

		assert!(Msf::from_lba(-1).is_none());
		assert!(Msf::from_lba(450_000).is_none());
	}

	#[test]
	fn t_from_lsn() {
		let msf = Msf::from_lsn(0).expect("MSF failed.");
		assert_eq!(msf.minutes(), 0);
		assert_eq!(msf.seconds(), 2);
		assert_eq!(msf.frames(), 0);
		assert_eq!(msf.lsn(), 0);

		// A negative LSN inside the pregap is still a valid position.
		assert_eq!(
			Msf::from_lsn(-75).map(|v| v.to_string()).as_deref(),
			Some("00:01:00"),
		);
		assert!(Msf::from_lsn(-151).is_none());
	}

	#[test]
	fn t_parse() {
		assert_eq!(Msf::try_from(" 3:04:05 "), Ok(Msf { m: 3, s: 4, f: 5 }));
		for bad in ["", "00:00", "00:60:00", "00:00:75", "100:00:00", "0a:00:00", "00:00:00:00"] {
			assert!(Msf::try_from(bad).is_err(), "{bad} should not parse.");
		}
	}
}
