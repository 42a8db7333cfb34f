/*!
# cdctl: Disc
*/

use cdtoc::Toc;
use crate::{
	CdioError,
	LibcdioInstance,
	lsn_to_lba,
	TrackFormat,
};
use libcdio_sys::{
	discmode_t,
	discmode_t_CDIO_DISC_MODE_CD_DA,
	discmode_t_CDIO_DISC_MODE_CD_DATA,
	discmode_t_CDIO_DISC_MODE_CD_I,
	discmode_t_CDIO_DISC_MODE_CD_MIXED,
	discmode_t_CDIO_DISC_MODE_CD_XA,
	discmode_t_CDIO_DISC_MODE_DVD_OTHER,
	discmode_t_CDIO_DISC_MODE_DVD_PR,
	discmode_t_CDIO_DISC_MODE_DVD_PRW,
	discmode_t_CDIO_DISC_MODE_DVD_R,
	discmode_t_CDIO_DISC_MODE_DVD_RAM,
	discmode_t_CDIO_DISC_MODE_DVD_ROM,
	discmode_t_CDIO_DISC_MODE_DVD_RW,
	discmode_t_CDIO_DISC_MODE_ERROR,
	discmode_t_CDIO_DISC_MODE_NO_INFO,
};
use std::fmt;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Disc Mode.
///
/// The kind of disc in the drive, as best `libcdio` can tell.
pub enum DiscMode {
	/// # Audio CD.
	CdDa,

	/// # Data CD (Mode 1).
	CdData,

	/// # Data CD (Mode 2/XA).
	CdXa,

	/// # Mixed Audio/Data CD.
	CdMixed,

	/// # CD-i.
	CdI,

	/// # DVD-ROM.
	DvdRom,

	/// # DVD-RAM.
	DvdRam,

	/// # DVD-R.
	DvdR,

	/// # DVD-RW.
	DvdRw,

	/// # DVD+R.
	DvdPr,

	/// # DVD+RW.
	DvdPrw,

	/// # Some Other DVD.
	DvdOther,

	/// # No Information.
	NoInfo,

	/// # Error.
	Error,
}

impl fmt::Display for DiscMode {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl DiscMode {
	#[must_use]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # From Raw.
	///
	/// Modes this crate doesn't know about, like the HD DVD family, come back
	/// as [`DiscMode::NoInfo`].
	pub const fn from_raw(raw: discmode_t) -> Self {
		match raw {
			discmode_t_CDIO_DISC_MODE_CD_DA => Self::CdDa,
			discmode_t_CDIO_DISC_MODE_CD_DATA => Self::CdData,
			discmode_t_CDIO_DISC_MODE_CD_XA => Self::CdXa,
			discmode_t_CDIO_DISC_MODE_CD_MIXED => Self::CdMixed,
			discmode_t_CDIO_DISC_MODE_CD_I => Self::CdI,
			discmode_t_CDIO_DISC_MODE_DVD_ROM => Self::DvdRom,
			discmode_t_CDIO_DISC_MODE_DVD_RAM => Self::DvdRam,
			discmode_t_CDIO_DISC_MODE_DVD_R => Self::DvdR,
			discmode_t_CDIO_DISC_MODE_DVD_RW => Self::DvdRw,
			discmode_t_CDIO_DISC_MODE_DVD_PR => Self::DvdPr,
			discmode_t_CDIO_DISC_MODE_DVD_PRW => Self::DvdPrw,
			discmode_t_CDIO_DISC_MODE_DVD_OTHER => Self::DvdOther,
			discmode_t_CDIO_DISC_MODE_ERROR => Self::Error,
			_ => Self::NoInfo,
		}
	}

	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::CdDa => "CD-DA",
			Self::CdData => "CD-DATA (Mode 1)",
			Self::CdXa => "CD DATA (Mode 2)",
			Self::CdMixed => "CD-ROM Mixed",
			Self::CdI => "CD-i",
			Self::DvdRom => "DVD-ROM",
			Self::DvdRam => "DVD-RAM",
			Self::DvdR => "DVD-R",
			Self::DvdRw => "DVD-RW",
			Self::DvdPr => "DVD+R",
			Self::DvdPrw => "DVD+RW",
			Self::DvdOther => "Unknown/unclassified DVD",
			Self::NoInfo => "No information",
			Self::Error => "Error in getting information",
		}
	}

	#[must_use]
	/// # Is CD?
	pub const fn is_cd(self) -> bool {
		matches!(self, Self::CdDa | Self::CdData | Self::CdXa | Self::CdMixed | Self::CdI)
	}

	#[must_use]
	/// # Is DVD?
	pub const fn is_dvd(self) -> bool {
		matches!(
			self,
			Self::DvdRom | Self::DvdRam | Self::DvdR | Self::DvdRw |
			Self::DvdPr | Self::DvdPrw | Self::DvdOther
		)
	}

	#[must_use]
	/// # Has Audio?
	pub const fn has_audio(self) -> bool { matches!(self, Self::CdDa | Self::CdMixed) }
}



/// # Build Table of Contents.
///
/// Parse the disc's track layout into the pieces needed for `Toc`.
///
/// ## Errors
///
/// This will return an error if the track positions can't be read, or if the
/// layout is something `cdtoc` can't represent, like a data track wedged
/// between audio tracks.
pub(crate) fn toc(cdio: &LibcdioInstance) -> Result<Toc, CdioError> {
	let mut audio = Vec::new();
	let mut data = None;

	// The inclusive range to search.
	let from = cdio.first_track_num().ok_or(CdioError::TrackNumbers)?;
	let to = cdio.last_track_num().ok_or(CdioError::TrackNumbers)?;
	if to < from { return Err(CdioError::TrackNumbers); }

	// Grab the position and type for each track.
	for idx in from..=to {
		let start = cdio.track_lba(idx)
			.and_then(|lba| u32::try_from(lba).map_err(|_| CdioError::TrackLba(idx)))?;

		if TrackFormat::from_raw(cdio.track_format(idx)) == TrackFormat::Audio {
			audio.push(start);
		}
		else {
			if data.is_some() || (idx != from && idx != to) {
				return Err(CdioError::TrackFormat(idx));
			}
			data.replace(start);
		}
	}

	// Grab the leadout, then build the ToC.
	let leadout = u32::try_from(lsn_to_lba(cdio.disc_last_lsn()?))
		.map_err(|_| CdioError::DiscLsn)?;
	Ok(Toc::from_parts(audio, data, leadout)?)
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_discmode() {
		for (raw, mode, cd, dvd) in [
			(discmode_t_CDIO_DISC_MODE_CD_DA, DiscMode::CdDa, true, false),
			(discmode_t_CDIO_DISC_MODE_CD_DATA, DiscMode::CdData, true, false),
			(discmode_t_CDIO_DISC_MODE_CD_XA, DiscMode::CdXa, true, false),
			(discmode_t_CDIO_DISC_MODE_CD_MIXED, DiscMode::CdMixed, true, false),
			(discmode_t_CDIO_DISC_MODE_CD_I, DiscMode::CdI, true, false),
			(discmode_t_CDIO_DISC_MODE_DVD_ROM, DiscMode::DvdRom, false, true),
			(discmode_t_CDIO_DISC_MODE_DVD_PRW, DiscMode::DvdPrw, false, true),
			(discmode_t_CDIO_DISC_MODE_DVD_OTHER, DiscMode::DvdOther, false, true),
			(discmode_t_CDIO_DISC_MODE_NO_INFO, DiscMode::NoInfo, false, false),
			(discmode_t_CDIO_DISC_MODE_ERROR, DiscMode::Error, false, false),
		] {
			assert_eq!(DiscMode::from_raw(raw), mode);
			assert_eq!(mode.is_cd(), cd, "{mode}");
			assert_eq!(mode.is_dvd(), dvd, "{mode}");
		}

		assert!(DiscMode::CdMixed.has_audio());
		assert!(! DiscMode::CdData.has_audio());
		assert_eq!(DiscMode::CdDa.to_string(), "CD-DA");
	}
}
