/*!
# cdctl: Drivers
*/

use crate::{
	CdioError,
	cdio::{
		device_list,
		init,
		owned_c_char_to_path,
		path_to_cstring,
	},
	DriveCaps,
	error::check,
};
use libcdio_sys::{
	driver_id_t,
	driver_id_t_DRIVER_AIX,
	driver_id_t_DRIVER_BINCUE,
	driver_id_t_DRIVER_CDRDAO,
	driver_id_t_DRIVER_DEVICE,
	driver_id_t_DRIVER_FREEBSD,
	driver_id_t_DRIVER_LINUX,
	driver_id_t_DRIVER_NETBSD,
	driver_id_t_DRIVER_NRG,
	driver_id_t_DRIVER_OSX,
	driver_id_t_DRIVER_SOLARIS,
	driver_id_t_DRIVER_UNKNOWN,
	driver_id_t_DRIVER_WIN32,
};
use std::{
	collections::BTreeMap,
	fmt,
	path::{
		Path,
		PathBuf,
	},
};



#[derive(Debug, Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
/// # Driver ID.
///
/// The `libcdio` backends, one per operating system or disc image format,
/// plus a couple of meta entries.
pub enum DriverId {
	#[default]
	/// # Unknown.
	///
	/// When opening a device, this means "figure it out".
	Unknown = driver_id_t_DRIVER_UNKNOWN,

	/// # AIX.
	Aix = driver_id_t_DRIVER_AIX,

	/// # FreeBSD.
	FreeBsd = driver_id_t_DRIVER_FREEBSD,

	/// # NetBSD.
	NetBsd = driver_id_t_DRIVER_NETBSD,

	/// # GNU/Linux.
	Linux = driver_id_t_DRIVER_LINUX,

	/// # Solaris.
	Solaris = driver_id_t_DRIVER_SOLARIS,

	/// # macOS.
	Osx = driver_id_t_DRIVER_OSX,

	/// # Windows.
	Win32 = driver_id_t_DRIVER_WIN32,

	/// # cdrdao TOC Image.
	Cdrdao = driver_id_t_DRIVER_CDRDAO,

	/// # BIN/CUE Image.
	BinCue = driver_id_t_DRIVER_BINCUE,

	/// # Nero NRG Image.
	Nrg = driver_id_t_DRIVER_NRG,

	/// # Device.
	///
	/// Whichever hardware driver is best for the current system.
	Device = driver_id_t_DRIVER_DEVICE,
}

impl fmt::Display for DriverId {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl TryFrom<&str> for DriverId {
	type Error = CdioError;

	fn try_from(src: &str) -> Result<Self, Self::Error> {
		let src = src.trim();
		for d in Self::ALL {
			if src.eq_ignore_ascii_case(d.as_str()) { return Ok(*d); }
		}

		// Some friendlier aliases.
		match src.to_ascii_lowercase().as_str() {
			"auto" => Ok(Self::Unknown),
			"linux" | "gnu-linux" => Ok(Self::Linux),
			"mac" | "macos" | "osx" => Ok(Self::Osx),
			"windows" | "win" => Ok(Self::Win32),
			"bin" | "bincue" | "cue" => Ok(Self::BinCue),
			"toc" => Ok(Self::Cdrdao),
			_ => Err(CdioError::InvalidArg),
		}
	}
}

impl DriverId {
	/// # All Drivers.
	pub const ALL: &'static [Self] = &[
		Self::Unknown, Self::Aix, Self::FreeBsd, Self::NetBsd, Self::Linux,
		Self::Solaris, Self::Osx, Self::Win32, Self::Cdrdao, Self::BinCue,
		Self::Nrg, Self::Device,
	];

	#[must_use]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # From Raw.
	pub const fn from_raw(raw: driver_id_t) -> Option<Self> {
		match raw {
			driver_id_t_DRIVER_UNKNOWN => Some(Self::Unknown),
			driver_id_t_DRIVER_AIX => Some(Self::Aix),
			driver_id_t_DRIVER_FREEBSD => Some(Self::FreeBsd),
			driver_id_t_DRIVER_NETBSD => Some(Self::NetBsd),
			driver_id_t_DRIVER_LINUX => Some(Self::Linux),
			driver_id_t_DRIVER_SOLARIS => Some(Self::Solaris),
			driver_id_t_DRIVER_OSX => Some(Self::Osx),
			driver_id_t_DRIVER_WIN32 => Some(Self::Win32),
			driver_id_t_DRIVER_CDRDAO => Some(Self::Cdrdao),
			driver_id_t_DRIVER_BINCUE => Some(Self::BinCue),
			driver_id_t_DRIVER_NRG => Some(Self::Nrg),
			driver_id_t_DRIVER_DEVICE => Some(Self::Device),
			_ => None,
		}
	}

	#[must_use]
	/// # As Raw.
	pub const fn as_raw(self) -> driver_id_t { self as driver_id_t }

	#[must_use]
	/// # As Str.
	///
	/// Return the name `libcdio` itself uses for the driver.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "Unknown",
			Self::Aix => "AIX",
			Self::FreeBsd => "FreeBSD",
			Self::NetBsd => "NetBSD",
			Self::Linux => "GNU/Linux",
			Self::Solaris => "Solaris",
			Self::Osx => "OS X",
			Self::Win32 => "WIN32",
			Self::Cdrdao => "CDRDAO",
			Self::BinCue => "BIN/CUE",
			Self::Nrg => "NRG",
			Self::Device => "device",
		}
	}

	#[must_use]
	#[allow(unsafe_code)]
	/// # Available?
	///
	/// Returns `true` if support for the driver was compiled into the linked
	/// `libcdio`.
	pub fn is_available(self) -> bool {
		init();
		0 != unsafe { libcdio_sys::cdio_have_driver(self.as_raw()) }
	}

	#[must_use]
	/// # Disc Image Driver?
	pub const fn is_image(self) -> bool {
		matches!(self, Self::Cdrdao | Self::BinCue | Self::Nrg)
	}
}



#[must_use]
/// # All Drivers.
///
/// Return a name-keyed dictionary of every driver `libcdio` knows about,
/// whether or not it is available.
pub fn drivers() -> BTreeMap<&'static str, DriverId> {
	DriverId::ALL.iter().map(|d| (d.as_str(), *d)).collect()
}

#[must_use]
/// # Available Drivers.
///
/// Return the real drivers (i.e. not [`DriverId::Unknown`] or
/// [`DriverId::Device`]) supported by the linked `libcdio`.
pub fn available_drivers() -> Vec<DriverId> {
	DriverId::ALL.iter()
		.copied()
		.filter(|d| ! matches!(d, DriverId::Unknown | DriverId::Device) && d.is_available())
		.collect()
}

#[must_use]
#[allow(unsafe_code)]
/// # Default Device.
///
/// Return the default device for the driver along with the driver actually
/// used to find it, if any.
pub fn default_device(driver: DriverId) -> Option<(PathBuf, DriverId)> {
	init();
	let mut id = driver.as_raw();
	let path = owned_c_char_to_path(unsafe {
		libcdio_sys::cdio_get_default_device_driver(&mut id)
	})?;
	Some((path, DriverId::from_raw(id).unwrap_or(driver)))
}

#[must_use]
#[allow(unsafe_code)]
/// # Devices.
///
/// Return the devices (or images) visible to the driver, along with the
/// driver actually used. When given [`DriverId::Device`] or
/// [`DriverId::Unknown`], `libcdio` picks the first driver that finds
/// something.
pub fn devices(driver: DriverId) -> (Vec<PathBuf>, DriverId) {
	init();
	let mut id = driver.as_raw();
	let list = device_list(unsafe { libcdio_sys::cdio_get_devices_ret(&mut id) });
	(list, DriverId::from_raw(id).unwrap_or(driver))
}

#[allow(unsafe_code)]
/// # Close Tray.
///
/// Close the tray of the given (or default) drive, returning the driver
/// used to do it.
///
/// ## Errors
///
/// Returns an error if the path is invalid or the driver complains.
pub fn close_tray(drive: Option<&Path>, driver: DriverId) -> Result<DriverId, CdioError> {
	init();
	let drive = drive.map(path_to_cstring).transpose()?;
	let mut id = driver.as_raw();
	check(unsafe {
		libcdio_sys::cdio_close_tray(
			drive.as_ref().map_or_else(std::ptr::null, |v| v.as_ptr()),
			&mut id,
		)
	})?;
	Ok(DriverId::from_raw(id).unwrap_or(driver))
}

#[allow(unsafe_code)]
/// # Eject Drive.
///
/// Eject the media from the given (or default) drive without first opening
/// a [`Device`](crate::Device).
///
/// ## Errors
///
/// Returns an error if the path is invalid or the driver complains.
pub fn eject_drive(drive: Option<&Path>) -> Result<(), CdioError> {
	init();
	let drive = drive.map(path_to_cstring).transpose()?;
	check(unsafe {
		libcdio_sys::cdio_eject_media_drive(
			drive.as_ref().map_or_else(std::ptr::null, |v| v.as_ptr())
		)
	})
}

#[must_use]
#[allow(unsafe_code)]
/// # Drive Capabilities (By Name).
///
/// Probe a drive's capabilities without opening a
/// [`Device`](crate::Device).
pub fn drive_cap_dev(drive: &Path) -> DriveCaps {
	init();
	let Ok(drive) = path_to_cstring(drive) else { return DriveCaps::default(); };
	let mut read = 0;
	let mut write = 0;
	let mut misc = 0;
	unsafe {
		libcdio_sys::cdio_get_drive_cap_dev(drive.as_ptr(), &mut read, &mut write, &mut misc);
	}
	DriveCaps::new(read, write, misc)
}

#[must_use]
#[allow(unsafe_code)]
/// # BIN File's CUE.
///
/// If the path looks like a BIN image, return the name of its companion CUE
/// sheet. This is a naming check only; the CUE needn't exist.
pub fn binfile_cue(path: &Path) -> Option<PathBuf> {
	let path = path_to_cstring(path).ok()?;
	owned_c_char_to_path(unsafe { libcdio_sys::cdio_is_binfile(path.as_ptr()) })
}

#[must_use]
#[allow(unsafe_code)]
/// # CUE File's BIN.
///
/// If the path is a valid CUE sheet, return the name of its companion BIN
/// image.
pub fn cuefile_bin(path: &Path) -> Option<PathBuf> {
	let path = path_to_cstring(path).ok()?;
	owned_c_char_to_path(unsafe { libcdio_sys::cdio_is_cuefile(path.as_ptr()) })
}

#[must_use]
#[allow(unsafe_code)]
/// # Is NRG?
pub fn is_nrg(path: &Path) -> bool {
	path_to_cstring(path).is_ok_and(|p|
		0 != unsafe { libcdio_sys::cdio_is_nrg(p.as_ptr()) }
	)
}

#[must_use]
#[allow(unsafe_code)]
/// # Is cdrdao TOC?
pub fn is_tocfile(path: &Path) -> bool {
	path_to_cstring(path).is_ok_and(|p|
		0 != unsafe { libcdio_sys::cdio_is_tocfile(p.as_ptr()) }
	)
}

#[must_use]
#[allow(unsafe_code)]
/// # Is Device?
///
/// Returns `true` if the path is a device the driver could open.
pub fn is_device(path: &Path, driver: DriverId) -> bool {
	init();
	path_to_cstring(path).is_ok_and(|p|
		0 != unsafe { libcdio_sys::cdio_is_device(p.as_ptr(), driver.as_raw()) }
	)
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_names() {
		for d in DriverId::ALL {
			assert_eq!(DriverId::try_from(d.as_str()), Ok(*d));
			assert_eq!(DriverId::try_from(d.as_str().to_ascii_lowercase().as_str()), Ok(*d));
			assert_eq!(DriverId::from_raw(d.as_raw()), Some(*d));
		}

		assert_eq!(DriverId::try_from("linux"), Ok(DriverId::Linux));
		assert_eq!(DriverId::try_from(" bincue "), Ok(DriverId::BinCue));
		assert_eq!(DriverId::try_from("OSX"), Ok(DriverId::Osx));
		assert_eq!(DriverId::try_from("auto"), Ok(DriverId::Unknown));
		assert_eq!(DriverId::try_from("floppy"), Err(CdioError::InvalidArg));

		assert_eq!(DriverId::BinCue.to_string(), "BIN/CUE");
		assert_eq!(DriverId::default(), DriverId::Unknown);
	}

	#[test]
	fn t_drivers() {
		let all = drivers();
		assert_eq!(all.len(), DriverId::ALL.len());
		assert_eq!(all.get("NRG"), Some(&DriverId::Nrg));

		assert!(DriverId::BinCue.is_image());
		assert!(! DriverId::Linux.is_image());

		// Image drivers are always compiled in.
		let available = available_drivers();
		assert!(available.contains(&DriverId::BinCue));
		assert!(available.contains(&DriverId::Cdrdao));
		assert!(available.contains(&DriverId::Nrg));
		assert!(! available.contains(&DriverId::Device));
	}

	#[test]
	fn t_image_names() {
		assert_eq!(
			binfile_cue(Path::new("/tmp/disc.bin")),
			Some(PathBuf::from("/tmp/disc.cue")),
		);
		assert_eq!(
			binfile_cue(Path::new("/tmp/DISC.BIN")),
			Some(PathBuf::from("/tmp/DISC.CUE")),
		);
		assert_eq!(binfile_cue(Path::new("/tmp/disc.wav")), None);

		// Files that don't exist aren't anything.
		let missing = Path::new("/tmp/cdctl-does-not-exist.nrg");
		assert!(! is_nrg(missing));
		assert!(! is_tocfile(missing));
		assert!(cuefile_bin(missing).is_none());
	}
}
