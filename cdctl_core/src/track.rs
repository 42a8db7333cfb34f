/*!
# cdctl: Tracks
*/

use crate::{
	CdioError,
	Device,
	INVALID_TRACK,
	Msf,
};
use libcdio_sys::{
	track_flag_t,
	track_flag_t_CDIO_TRACK_FLAG_FALSE,
	track_flag_t_CDIO_TRACK_FLAG_TRUE,
	track_flag_t_CDIO_TRACK_FLAG_UNKNOWN,
	track_format_t,
	track_format_t_TRACK_FORMAT_AUDIO,
	track_format_t_TRACK_FORMAT_CDI,
	track_format_t_TRACK_FORMAT_DATA,
	track_format_t_TRACK_FORMAT_PSX,
	track_format_t_TRACK_FORMAT_XA,
};
use std::{
	fmt,
	iter::FusedIterator,
};



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Track Flag.
///
/// A tri-state answer to questions like "can this track be copied?".
pub enum TrackFlag {
	/// # No.
	No,

	/// # Yes.
	Yes,

	/// # The Driver Doesn't Know.
	Unknown,
}

impl fmt::Display for TrackFlag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::No => "no",
			Self::Yes => "yes",
			Self::Unknown => "unknown",
		})
	}
}

impl TrackFlag {
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # From Raw.
	///
	/// ## Errors
	///
	/// `libcdio`'s error value is returned as a [`CdioError::TrackFlag`].
	pub(crate) const fn from_raw(raw: track_flag_t, idx: u8) -> Result<Self, CdioError> {
		match raw {
			track_flag_t_CDIO_TRACK_FLAG_FALSE => Ok(Self::No),
			track_flag_t_CDIO_TRACK_FLAG_TRUE => Ok(Self::Yes),
			track_flag_t_CDIO_TRACK_FLAG_UNKNOWN => Ok(Self::Unknown),
			_ => Err(CdioError::TrackFlag(idx)),
		}
	}

	#[must_use]
	/// # As Option.
	pub const fn as_bool(self) -> Option<bool> {
		match self {
			Self::No => Some(false),
			Self::Yes => Some(true),
			Self::Unknown => None,
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Track Format.
pub enum TrackFormat {
	/// # CD-DA Audio.
	Audio,

	/// # CD-i.
	Cdi,

	/// # Mode 2 (XA).
	Xa,

	/// # Mode 1 Data.
	Data,

	/// # PlayStation.
	Psx,

	/// # Error.
	Error,
}

impl fmt::Display for TrackFormat {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl TrackFormat {
	#[must_use]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # From Raw.
	pub const fn from_raw(raw: track_format_t) -> Self {
		match raw {
			track_format_t_TRACK_FORMAT_AUDIO => Self::Audio,
			track_format_t_TRACK_FORMAT_CDI => Self::Cdi,
			track_format_t_TRACK_FORMAT_XA => Self::Xa,
			track_format_t_TRACK_FORMAT_DATA => Self::Data,
			track_format_t_TRACK_FORMAT_PSX => Self::Psx,
			_ => Self::Error,
		}
	}

	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Audio => "audio",
			Self::Cdi => "CD-i",
			Self::Xa => "XA",
			Self::Data => "data",
			Self::Psx => "PSX",
			Self::Error => "error",
		}
	}

	#[must_use]
	/// # Is Audio?
	pub const fn is_audio(self) -> bool { matches!(self, Self::Audio) }
}



#[derive(Debug, Clone, Copy)]
/// # Track.
///
/// A track is just a view into a [`Device`]; all of its information is
/// fetched from the drive on demand.
///
/// Tracks are usually obtained through [`Device::track`] or
/// [`Device::tracks`].
pub struct Track<'a> {
	dev: &'a Device,
	number: u8,
}

impl<'a> Track<'a> {
	/// # New.
	///
	/// ## Errors
	///
	/// Track zero and `libcdio`'s invalid-track marker are rejected.
	pub(crate) const fn new(dev: &'a Device, number: u8) -> Result<Self, CdioError> {
		if number == 0 || number == INVALID_TRACK { Err(CdioError::TrackNumber(number)) }
		else { Ok(Self { dev, number }) }
	}

	/// # With Number.
	///
	/// Return a view of a different track on the same device.
	///
	/// ## Errors
	///
	/// Track zero and `libcdio`'s invalid-track marker are rejected.
	pub const fn with_number(self, number: u8) -> Result<Self, CdioError> {
		Self::new(self.dev, number)
	}

	#[must_use]
	/// # Device.
	pub const fn device(&self) -> &'a Device { self.dev }

	#[must_use]
	/// # Number.
	pub const fn number(&self) -> u8 { self.number }
}

impl Track<'_> {
	/// # Audio Channels.
	///
	/// ## Errors
	///
	/// Returns [`CdioError::DriverUnsupported`] if the driver can't tell, or
	/// [`CdioError::TrackChannels`] for anything other than two or four.
	pub fn audio_channels(&self) -> Result<u8, CdioError> {
		self.dev.cdio().track_channels(self.number)
	}

	/// # Copy Permitted?
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn copy_permit(&self) -> Result<TrackFlag, CdioError> {
		TrackFlag::from_raw(self.dev.cdio().track_copy_permit(self.number), self.number)
	}

	#[must_use]
	/// # Format.
	pub fn format(&self) -> TrackFormat {
		TrackFormat::from_raw(self.dev.cdio().track_format(self.number))
	}

	#[must_use]
	/// # Is Green?
	///
	/// Returns `true` if the track has XA (Mode 2) sub-headers.
	pub fn is_green(&self) -> bool { self.dev.cdio().track_green(self.number) }

	#[must_use]
	/// # ISRC.
	pub fn isrc(&self) -> Option<String> { self.dev.cdio().track_isrc(self.number) }

	/// # Last LSN.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` doesn't know where the track ends.
	pub fn last_lsn(&self) -> Result<i32, CdioError> {
		self.dev.cdio().track_last_lsn(self.number)
	}

	/// # LBA.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` doesn't know where the track starts.
	pub fn lba(&self) -> Result<i32, CdioError> {
		self.dev.cdio().track_lba(self.number)
	}

	/// # LSN.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` doesn't know where the track starts.
	pub fn lsn(&self) -> Result<i32, CdioError> {
		self.dev.cdio().track_lsn(self.number)
	}

	/// # MSF.
	///
	/// The track's starting position as minutes, seconds, and frames.
	///
	/// ## Errors
	///
	/// Returns an error if the LBA is unknown or out of range.
	pub fn msf(&self) -> Result<Msf, CdioError> {
		let lba = self.lba()?;
		Msf::from_lba(lba).ok_or(CdioError::TrackLba(self.number))
	}

	/// # Preemphasis?
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn preemphasis(&self) -> Result<TrackFlag, CdioError> {
		TrackFlag::from_raw(self.dev.cdio().track_preemphasis(self.number), self.number)
	}

	/// # Sector Count.
	///
	/// ## Errors
	///
	/// Returns an error if the count comes back zero.
	pub fn sec_count(&self) -> Result<u32, CdioError> {
		self.dev.cdio().track_sec_count(self.number)
	}
}



#[derive(Debug, Clone)]
/// # Track Iterator.
///
/// This yields each track from first to last. See [`Device::tracks`].
pub struct Tracks<'a> {
	dev: &'a Device,
	next: u8,
	last: u8,
}

impl<'a> Iterator for Tracks<'a> {
	type Item = Track<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.next == 0 || self.last < self.next { return None; }
		let out = Track::new(self.dev, self.next).ok();
		self.next = self.next.checked_add(1).unwrap_or(0);
		out
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.len();
		(len, Some(len))
	}
}

impl ExactSizeIterator for Tracks<'_> {
	fn len(&self) -> usize {
		if self.next == 0 || self.last < self.next { 0 }
		else { usize::from(self.last - self.next) + 1 }
	}
}

impl FusedIterator for Tracks<'_> {}

impl<'a> Tracks<'a> {
	/// # New.
	pub(crate) const fn new(dev: &'a Device, first: u8, last: u8) -> Self {
		Self { dev, next: first, last }
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use libcdio_sys::track_flag_t_CDIO_TRACK_FLAG_ERROR;

	#[test]
	fn t_flag() {
		assert_eq!(TrackFlag::from_raw(track_flag_t_CDIO_TRACK_FLAG_FALSE, 1), Ok(TrackFlag::No));
		assert_eq!(TrackFlag::from_raw(track_flag_t_CDIO_TRACK_FLAG_TRUE, 1), Ok(TrackFlag::Yes));
		assert_eq!(
			TrackFlag::from_raw(track_flag_t_CDIO_TRACK_FLAG_UNKNOWN, 1),
			Ok(TrackFlag::Unknown),
		);
		assert_eq!(
			TrackFlag::from_raw(track_flag_t_CDIO_TRACK_FLAG_ERROR, 3),
			Err(CdioError::TrackFlag(3)),
		);

		assert_eq!(TrackFlag::Yes.as_bool(), Some(true));
		assert_eq!(TrackFlag::Unknown.as_bool(), None);
	}

	#[test]
	fn t_format() {
		for (raw, fmt) in [
			(track_format_t_TRACK_FORMAT_AUDIO, TrackFormat::Audio),
			(track_format_t_TRACK_FORMAT_CDI, TrackFormat::Cdi),
			(track_format_t_TRACK_FORMAT_XA, TrackFormat::Xa),
			(track_format_t_TRACK_FORMAT_DATA, TrackFormat::Data),
			(track_format_t_TRACK_FORMAT_PSX, TrackFormat::Psx),
		] {
			assert_eq!(TrackFormat::from_raw(raw), fmt);
		}

		assert!(TrackFormat::Audio.is_audio());
		assert!(! TrackFormat::Data.is_audio());
		assert_eq!(TrackFormat::from_raw(999), TrackFormat::Error);
	}
}
