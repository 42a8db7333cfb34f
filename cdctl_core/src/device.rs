/*!
# cdctl: Device
*/

use cdtoc::Toc;
use crate::{
	CD_FRAMESIZE,
	CD_FRAMESIZE_RAW,
	CdioError,
	disc,
	DiscMode,
	DriveCaps,
	DriverId,
	HwInfo,
	LibcdioInstance,
	M2F2_SECTOR_SIZE,
	M2RAW_SECTOR_SIZE,
	Mcn,
	OpenOptions,
	Track,
	Tracks,
};
use libcdio_sys::{
	cdio_read_mode_t,
	cdio_read_mode_t_CDIO_READ_MODE_AUDIO,
	cdio_read_mode_t_CDIO_READ_MODE_M1F1,
	cdio_read_mode_t_CDIO_READ_MODE_M1F2,
	cdio_read_mode_t_CDIO_READ_MODE_M2F1,
	cdio_read_mode_t_CDIO_READ_MODE_M2F2,
};
use std::os::raw::c_int;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Sector Read Mode.
pub enum ReadMode {
	#[default]
	/// # CD-DA Audio.
	Audio,

	/// # Mode 1, Form 1.
	M1F1,

	/// # Mode 1, Form 2.
	M1F2,

	/// # Mode 2, Form 1.
	M2F1,

	/// # Mode 2, Form 2.
	M2F2,
}

impl ReadMode {
	#[must_use]
	/// # Block Size.
	///
	/// The number of bytes returned for each sector read in this mode.
	pub const fn block_size(self) -> u16 {
		match self {
			Self::Audio => CD_FRAMESIZE_RAW,
			Self::M1F1 | Self::M2F1 => CD_FRAMESIZE,
			Self::M1F2 => M2RAW_SECTOR_SIZE,
			Self::M2F2 => M2F2_SECTOR_SIZE,
		}
	}

	/// # As Raw.
	const fn as_raw(self) -> cdio_read_mode_t {
		match self {
			Self::Audio => cdio_read_mode_t_CDIO_READ_MODE_AUDIO,
			Self::M1F1 => cdio_read_mode_t_CDIO_READ_MODE_M1F1,
			Self::M1F2 => cdio_read_mode_t_CDIO_READ_MODE_M1F2,
			Self::M2F1 => cdio_read_mode_t_CDIO_READ_MODE_M2F1,
			Self::M2F2 => cdio_read_mode_t_CDIO_READ_MODE_M2F2,
		}
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Seek Origin.
pub enum Whence {
	#[default]
	/// # From the Start.
	Set,

	/// # From the Current Position.
	Cur,

	/// # From the End.
	End,
}

impl Whence {
	/// # As Raw.
	const fn as_raw(self) -> c_int {
		match self {
			Self::Set => 0,
			Self::Cur => 1,
			Self::End => 2,
		}
	}
}



#[derive(Debug)]
/// # Device.
///
/// An open connection to a CD-ROM drive or disc image.
///
/// The connection lasts as long as the `Device` does; [`Device::close`] and
/// [`Device::eject`] consume it, and dropping it closes it too.
///
/// ## Examples
///
/// ```no_run
/// use cdctl_core::{Device, DriverId, OpenOptions};
///
/// let opts = OpenOptions::default()
///     .with_source("/path/to/disc.cue")
///     .with_driver(DriverId::BinCue);
/// let dev = Device::open(&opts).unwrap();
/// println!("{} track(s)", dev.num_tracks().unwrap());
/// ```
pub struct Device {
	cdio: LibcdioInstance,
}

impl Device {
	/// # Open.
	///
	/// ## Errors
	///
	/// Returns an error if the source doesn't exist or `libcdio` can't open
	/// it.
	pub fn open(opts: &OpenOptions) -> Result<Self, CdioError> {
		let cdio = LibcdioInstance::new(opts.source(), opts.driver(), opts.access_mode())?;
		Ok(Self { cdio })
	}

	/// # Close.
	///
	/// Dropping the device does the same thing; this just makes it explicit.
	pub fn close(self) { drop(self); }

	/// # Eject.
	///
	/// Eject the media and close the connection.
	///
	/// ## Errors
	///
	/// Returns an error if the drive can't or won't eject. The connection is
	/// closed either way.
	pub fn eject(self) -> Result<(), CdioError> { self.cdio.eject() }

	/// # Libcdio Instance.
	pub(crate) const fn cdio(&self) -> &LibcdioInstance { &self.cdio }
}

/// ## Audio.
impl Device {
	/// # Pause.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn audio_pause(&self) -> Result<(), CdioError> { self.cdio.audio_pause() }

	/// # Play.
	///
	/// Play audio from `start` up to `end`, both LSNs.
	///
	/// ## Errors
	///
	/// Returns an error if the range is backwards or `libcdio` complains.
	pub fn audio_play_lsn(&self, start: i32, end: i32) -> Result<(), CdioError> {
		if end < start { return Err(CdioError::DriverBadParameter); }
		self.cdio.audio_play_lsn(start, end)
	}

	/// # Resume.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn audio_resume(&self) -> Result<(), CdioError> { self.cdio.audio_resume() }

	/// # Stop.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn audio_stop(&self) -> Result<(), CdioError> { self.cdio.audio_stop() }
}

/// ## Identity.
impl Device {
	/// # Argument.
	///
	/// Return a driver argument, like `"source"`, `"access-mode"`, or for
	/// images, `"cue"`.
	///
	/// ## Errors
	///
	/// Keys with embedded NULs are invalid.
	pub fn arg(&self, key: &str) -> Result<Option<String>, CdioError> {
		self.cdio.arg(key)
	}

	#[must_use]
	/// # Driver ID.
	pub fn driver_id(&self) -> DriverId { self.cdio.driver_id() }

	#[must_use]
	/// # Driver Name.
	pub fn driver_name(&self) -> Option<String> { self.cdio.driver_name() }

	#[must_use]
	/// # Have ATAPI?
	///
	/// Returns `None` if the driver can't say.
	pub fn have_atapi(&self) -> Option<bool> { self.cdio.have_atapi() }

	#[must_use]
	/// # Hardware Info.
	pub fn hwinfo(&self) -> Option<HwInfo> { self.cdio.hwinfo() }

	#[must_use]
	/// # Source.
	///
	/// The device or image path actually opened.
	pub fn source(&self) -> Option<String> { self.cdio.arg("source").ok().flatten() }
}

/// ## Disc.
impl Device {
	/// # Disc Last LSN.
	///
	/// This is the LSN of the lead-out.
	///
	/// ## Errors
	///
	/// Returns an error if there's no disc or it can't be read.
	pub fn disc_last_lsn(&self) -> Result<i32, CdioError> { self.cdio.disc_last_lsn() }

	#[must_use]
	/// # Disc Mode.
	pub fn disc_mode(&self) -> DiscMode { DiscMode::from_raw(self.cdio.discmode()) }

	#[must_use]
	/// # Joliet Level.
	///
	/// Zero means no Joliet extensions.
	pub fn joliet_level(&self) -> u8 { self.cdio.joliet_level() }

	/// # Last Session.
	///
	/// Return the starting LSN of the last session.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn last_session(&self) -> Result<i32, CdioError> { self.cdio.last_session() }

	#[must_use]
	/// # Media Catalog Number.
	pub fn mcn(&self) -> Option<Mcn> {
		self.cdio.mcn().and_then(|v| Mcn::try_from(v.as_str()).ok())
	}

	/// # Media Changed?
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn media_changed(&self) -> Result<bool, CdioError> { self.cdio.media_changed() }

	/// # Table of Contents.
	///
	/// This is mostly useful for audio CDs, since it is what the various
	/// online metadata services key their lookups on.
	///
	/// ## Errors
	///
	/// Returns an error if the tracks can't be read or the layout isn't one
	/// `cdtoc` supports.
	pub fn toc(&self) -> Result<Toc, CdioError> { disc::toc(&self.cdio) }
}

/// ## Tracks.
impl Device {
	#[must_use]
	/// # First Track.
	pub fn first_track(&self) -> Option<Track<'_>> {
		self.cdio.first_track_num().and_then(|n| Track::new(self, n).ok())
	}

	#[must_use]
	/// # Last Track.
	pub fn last_track(&self) -> Option<Track<'_>> {
		self.cdio.last_track_num().and_then(|n| Track::new(self, n).ok())
	}

	/// # Number of Tracks.
	///
	/// ## Errors
	///
	/// Returns an error if there's no disc or it can't be read.
	pub fn num_tracks(&self) -> Result<u8, CdioError> { self.cdio.num_tracks() }

	/// # Track.
	///
	/// ## Errors
	///
	/// Track zero and `libcdio`'s invalid-track marker are rejected.
	pub const fn track(&self, number: u8) -> Result<Track<'_>, CdioError> {
		Track::new(self, number)
	}

	#[must_use]
	/// # Track For LSN.
	///
	/// Return the track containing the sector, if any. Sectors in the
	/// lead-in, at or past the lead-out, or otherwise off the disc don't
	/// belong to a track.
	pub fn track_for_lsn(&self, lsn: i32) -> Option<Track<'_>> {
		self.cdio.track_for_lsn(lsn).and_then(|n| Track::new(self, n).ok())
	}

	/// # Tracks.
	///
	/// Return an iterator over the tracks, first to last.
	///
	/// ## Errors
	///
	/// Returns an error if the track numbers can't be read.
	pub fn tracks(&self) -> Result<Tracks<'_>, CdioError> {
		let first = self.cdio.first_track_num().ok_or(CdioError::TrackNumbers)?;
		let last = self.cdio.last_track_num().ok_or(CdioError::TrackNumbers)?;
		if last < first { return Err(CdioError::TrackNumbers); }
		Ok(Tracks::new(self, first, last))
	}
}

/// ## Capabilities.
impl Device {
	#[must_use]
	/// # Drive Capabilities.
	pub fn drive_cap(&self) -> DriveCaps { self.cdio.drive_cap() }
}

/// ## I/O.
impl Device {
	/// # Seek.
	///
	/// Move the read position, returning the new offset.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn lseek(&self, offset: i64, whence: Whence) -> Result<i64, CdioError> {
		self.cdio.lseek(offset, whence.as_raw())
	}

	/// # Read.
	///
	/// Read up to `size` bytes from the current position. The result will be
	/// shorter if the end is reached first.
	///
	/// ## Errors
	///
	/// Returns an error if the read fails outright.
	pub fn read(&self, size: usize) -> Result<Vec<u8>, CdioError> {
		let mut buf = vec![0_u8; size];
		let len = self.cdio.read(&mut buf)?;
		buf.truncate(len);
		Ok(buf)
	}

	/// # Read Data Blocks.
	///
	/// Read `blocks` 2048-byte data sectors starting at `lsn`, regardless of
	/// the underlying sector format.
	///
	/// ## Errors
	///
	/// Returns an error if the buffer can't be sized or the read fails.
	pub fn read_data_blocks(&self, lsn: i32, blocks: u32) -> Result<Vec<u8>, CdioError> {
		let mut buf = vec![0_u8; sector_len(CD_FRAMESIZE, blocks)?];
		self.cdio.read_data_sectors(&mut buf, lsn, CD_FRAMESIZE, blocks)?;
		Ok(buf)
	}

	/// # Read Sectors.
	///
	/// Read `blocks` sectors starting at `lsn` in the given mode. Each sector
	/// contributes [`ReadMode::block_size`] bytes to the result.
	///
	/// ## Errors
	///
	/// Returns an error if the buffer can't be sized or the read fails.
	pub fn read_sectors(&self, lsn: i32, mode: ReadMode, blocks: u32)
	-> Result<Vec<u8>, CdioError> {
		// Leave room for full raw sectors in case the driver is generous.
		let mut buf = vec![0_u8; sector_len(CD_FRAMESIZE_RAW, blocks)?];
		self.cdio.read_sectors(&mut buf, lsn, mode.as_raw(), blocks)?;
		buf.truncate(sector_len(mode.block_size(), blocks)?);
		Ok(buf)
	}
}

/// ## Control.
impl Device {
	/// # Set Block Size.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn set_blocksize(&self, size: u16) -> Result<(), CdioError> {
		self.cdio.set_blocksize(size)
	}

	/// # Set Speed.
	///
	/// ## Errors
	///
	/// Returns an error if `libcdio` does.
	pub fn set_speed(&self, speed: u16) -> Result<(), CdioError> {
		self.cdio.set_speed(speed)
	}
}



/// # Sector Length.
///
/// The number of bytes needed for `blocks` sectors of `size` bytes.
fn sector_len(size: u16, blocks: u32) -> Result<usize, CdioError> {
	usize::try_from(blocks)
		.ok()
		.and_then(|b| b.checked_mul(usize::from(size)))
		.ok_or(CdioError::Overflow)
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		cuefile_bin,
		MiscCap,
		TrackFormat,
	};
	use cdtoc::TocKind;
	use std::path::{
		Path,
		PathBuf,
	};
	use tempfile::TempDir;

	/// # Sectors in the test image.
	const SECTORS: i32 = 300;

	/// # Test Image.
	///
	/// Write a single-track audio BIN/CUE pair where every byte of sector
	/// `n` is `n as u8`.
	fn fixture() -> (TempDir, PathBuf) {
		let dir = tempfile::tempdir().expect("Tempdir failed.");

		let mut bin = Vec::with_capacity(SECTORS as usize * usize::from(CD_FRAMESIZE_RAW));
		for n in 0..SECTORS {
			bin.resize(bin.len() + usize::from(CD_FRAMESIZE_RAW), n as u8);
		}
		std::fs::write(dir.path().join("disc.bin"), bin).expect("Bin write failed.");

		let cue = dir.path().join("disc.cue");
		std::fs::write(
			&cue,
			"FILE \"disc.bin\" BINARY\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n",
		).expect("Cue write failed.");

		(dir, cue)
	}

	fn open(cue: &Path) -> Device {
		let opts = OpenOptions::default()
			.with_source(cue)
			.with_driver(DriverId::BinCue);
		Device::open(&opts).expect("Device open failed.")
	}

	#[test]
	fn t_readmode() {
		assert_eq!(ReadMode::Audio.block_size(), 2352);
		assert_eq!(ReadMode::M1F1.block_size(), 2048);
		assert_eq!(ReadMode::M1F2.block_size(), 2336);
		assert_eq!(ReadMode::M2F1.block_size(), 2048);
		assert_eq!(ReadMode::M2F2.block_size(), 2324);
	}

	#[test]
	fn t_open_missing() {
		let opts = OpenOptions::default()
			.with_source("/tmp/cdctl-does-not-exist.cue")
			.with_driver(DriverId::BinCue);
		assert!(matches!(Device::open(&opts), Err(CdioError::Device(_))));
	}

	#[test]
	fn t_image() {
		let (_dir, cue) = fixture();
		let dev = open(&cue);

		assert_eq!(dev.driver_id(), DriverId::BinCue);
		assert_eq!(dev.driver_name().as_deref(), Some("BIN/CUE"));
		assert!(dev.source().is_some_and(|s| s.ends_with("disc.cue")));
		assert_eq!(dev.disc_mode(), DiscMode::CdDa);
		assert_eq!(dev.disc_last_lsn(), Ok(SECTORS));
		assert!(dev.mcn().is_none());
		assert!(dev.drive_cap().misc.contains(MiscCap::File));

		// The BIN should be found by way of the CUE.
		assert!(cuefile_bin(&cue).is_some_and(|p| p.ends_with("disc.bin")));

		dev.close();
	}

	#[test]
	fn t_tracks() {
		let (_dir, cue) = fixture();
		let dev = open(&cue);

		assert_eq!(dev.num_tracks(), Ok(1));
		let first = dev.first_track().expect("Missing first track.");
		assert_eq!(first.number(), 1);
		assert_eq!(dev.last_track().map(|t| t.number()), Some(1));

		assert_eq!(first.format(), TrackFormat::Audio);
		assert_eq!(first.lsn(), Ok(0));
		assert_eq!(first.lba(), Ok(150));
		assert_eq!(first.last_lsn(), Ok(SECTORS - 1));
		assert_eq!(first.sec_count(), Ok(SECTORS as u32));
		assert_eq!(first.msf().map(|m| m.to_string()), Ok("00:02:00".to_owned()));
		assert!(! first.is_green());

		assert_eq!(dev.track_for_lsn(10).map(|t| t.number()), Some(1));
		assert_eq!(dev.track_for_lsn(SECTORS - 1).map(|t| t.number()), Some(1));
		assert!(dev.track_for_lsn(-1).is_none(), "Lead-in has no track.");
		assert!(dev.track_for_lsn(SECTORS).is_none(), "Lead-out is not a track.");
		assert!(dev.track_for_lsn(SECTORS + 100).is_none(), "Past the disc is not a track.");

		// Bad numbers.
		assert_eq!(dev.track(0).err(), Some(CdioError::TrackNumber(0)));
		assert_eq!(first.with_number(0xFF).err(), Some(CdioError::TrackNumber(0xFF)));

		let all = dev.tracks().expect("Tracks failed.");
		assert_eq!(all.len(), 1);
		assert_eq!(all.map(|t| t.number()).collect::<Vec<_>>(), [1]);

		// A single audio track should make for a simple ToC.
		let toc = dev.toc().expect("ToC failed.");
		assert!(matches!(toc.kind(), TocKind::Audio));
		assert_eq!(toc.audio_tracks().count(), 1);
		assert_eq!(toc.to_string(), "1+96+1C2");
	}

	#[test]
	fn t_read() {
		let (_dir, cue) = fixture();
		let dev = open(&cue);

		let buf = dev.read_sectors(2, ReadMode::Audio, 2).expect("Read failed.");
		let size = usize::from(CD_FRAMESIZE_RAW);
		assert_eq!(buf.len(), size * 2);
		assert!(buf[..size].iter().all(|&b| b == 2));
		assert!(buf[size..].iter().all(|&b| b == 3));
	}
}
