/*!
# cdctl: Library

This crate provides safe, strongly-typed wrappers around the [`libcdio`](https://www.gnu.org/software/libcdio/)
CD-ROM input and control library.

All of the actual work, like device probing, disc image parsing, and sector
reads, happens inside `libcdio`; this crate just owns the handles, converts
the arguments and return values, and turns the library's numeric status
codes into proper [`CdioError`]s.

```no_run
use cdctl_core::{Device, OpenOptions};

let dev = Device::open(&OpenOptions::default()).unwrap();
for track in dev.tracks().unwrap() {
    println!("{:02} {}", track.number(), track.msf().unwrap());
}
```
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

mod cap;
mod cdio;
mod device;
mod disc;
mod driver;
mod error;
mod hwinfo;
mod mcn;
mod msf;
mod opts;
mod track;

pub use cap::{
	DriveCaps,
	MiscCap,
	MiscCaps,
	ReadCap,
	ReadCaps,
	WriteCap,
	WriteCaps,
};
pub(crate) use cdio::LibcdioInstance;
pub use device::{
	Device,
	ReadMode,
	Whence,
};
pub use disc::DiscMode;
pub use driver::{
	available_drivers,
	binfile_cue,
	close_tray,
	cuefile_bin,
	default_device,
	devices,
	drive_cap_dev,
	DriverId,
	drivers,
	eject_drive,
	is_device,
	is_nrg,
	is_tocfile,
};
pub use error::CdioError;
pub use hwinfo::HwInfo;
pub use mcn::Mcn;
pub use msf::{
	lba_to_lsn,
	lsn_to_lba,
	Msf,
};
pub use opts::OpenOptions;
pub use track::{
	Track,
	TrackFlag,
	TrackFormat,
	Tracks,
};



/// # Frames (Sectors) Per Second.
pub const CD_FRAMES_PER_SEC: u32 = 75;

/// # Seconds Per Minute.
pub const CD_SECS_PER_MIN: u32 = 60;

/// # Pregap.
///
/// All discs have a 2-second region at the start before any data. LBAs
/// include it, LSNs do not.
pub const CD_PREGAP: i32 = 150;

/// # Lead-out Track Number.
pub const CD_LEADOUT_TRACK: u8 = 0xAA;

/// # Max Track Number.
pub const CD_MAX_TRACKS: u8 = 99;

/// # Invalid LSN/LBA.
///
/// `libcdio` returns this sentinel in place of an LSN or LBA when it can't
/// come up with one.
pub const INVALID_LSN: i32 = -45_301;

/// # Invalid Track.
pub const INVALID_TRACK: u8 = 0xFF;

/// # Raw Sector Size.
///
/// This is the full size of a sector, e.g. CD-DA audio.
pub const CD_FRAMESIZE_RAW: u16 = 2352;

/// # Data Sector Size.
///
/// The user data portion of a Mode 1 (or Mode 2 Form 1) sector.
pub const CD_FRAMESIZE: u16 = 2048;

/// # Mode 2 Formless Sector Size.
pub const M2RAW_SECTOR_SIZE: u16 = 2336;

/// # Mode 2 Form 2 Sector Size.
pub const M2F2_SECTOR_SIZE: u16 = 2324;

/// # ISO-9660 Block Size.
pub const ISO_BLOCKSIZE: u16 = 2048;
