/*!
# cdctl: `libcdio` Wrappers
*/

use crate::{
	CD_LEADOUT_TRACK,
	CdioError,
	DriveCaps,
	DriverId,
	error::check,
	HwInfo,
	INVALID_LSN,
	INVALID_TRACK,
};
use libcdio_sys::{
	bool_3way_t_nope,
	bool_3way_t_yep,
	cdio_hwinfo,
	msf_t,
};
use std::{
	ffi::{
		CStr,
		CString,
		OsStr,
	},
	os::{
		raw::{
			c_char,
			c_int,
		},
		unix::ffi::OsStrExt,
	},
	path::{
		Path,
		PathBuf,
	},
	sync::Once,
};



static LIBCDIO_INIT: Once = Once::new();



#[derive(Debug)]
#[allow(dead_code)] // We just want to make sure source lives as long as the ptr.
/// # CDIO Instance.
///
/// This owns the `libcdio` handle, destroying it when dropped.
pub(crate) struct LibcdioInstance {
	source: Option<CString>,
	ptr: *mut libcdio_sys::CdIo_t,
}

impl Drop for LibcdioInstance {
	#[allow(unsafe_code)]
	fn drop(&mut self) {
		// Release the C memory!
		if ! self.ptr.is_null() {
			unsafe { libcdio_sys::cdio_destroy(self.ptr); }
			self.ptr = std::ptr::null_mut();
		}
	}
}

impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # New!
	///
	/// Initialize a new instance, optionally connecting to a specific device
	/// or image.
	///
	/// ## Errors
	///
	/// This will return an error if initialization fails, or if the provided
	/// source path is obviously wrong.
	pub(crate) fn new(
		source: Option<&Path>,
		driver: DriverId,
		access_mode: Option<&str>,
	) -> Result<Self, CdioError> {
		// Make sure the library has been initialized.
		init();

		// Take a look at the desired source.
		let source = match source {
			Some(src) => {
				if ! src.exists() {
					return Err(CdioError::Device(src.to_string_lossy().into_owned()));
				}
				Some(path_to_cstring(src)?)
			},
			None => None,
		};

		let access_mode = match access_mode {
			Some(am) => Some(CString::new(am).map_err(|_| CdioError::InvalidArg)?),
			None => None,
		};

		// Connect to it.
		let ptr = unsafe {
			libcdio_sys::cdio_open_am(
				source.as_ref().map_or_else(std::ptr::null, |v| v.as_ptr()),
				driver.as_raw(),
				access_mode.as_ref().map_or_else(std::ptr::null, |v| v.as_ptr()),
			)
		};

		// NULL is bad.
		if ptr.is_null() {
			Err(CdioError::DeviceOpen(source.map(|v| v.to_string_lossy().into_owned())))
		}
		// Otherwise good!
		else { Ok(Self { source, ptr }) }
	}
}

impl LibcdioInstance {
	/// # As Ptr.
	pub(crate) const fn as_ptr(&self) -> *const libcdio_sys::CdIo_t { self.ptr.cast() }

	/// # As Mut Ptr.
	pub(crate) const fn as_mut_ptr(&self) -> *mut libcdio_sys::CdIo_t { self.ptr }
}

/// ## Audio.
impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # Pause.
	pub(crate) fn audio_pause(&self) -> Result<(), CdioError> {
		check(unsafe { libcdio_sys::cdio_audio_pause(self.as_mut_ptr()) })
	}

	#[allow(unsafe_code)]
	/// # Play (LSN Range).
	///
	/// `libcdio` only exposes an MSF-based play command, so the LSNs are
	/// converted first.
	pub(crate) fn audio_play_lsn(&self, start: i32, end: i32) -> Result<(), CdioError> {
		let mut start_msf = msf_t { m: 0, s: 0, f: 0 };
		let mut end_msf = msf_t { m: 0, s: 0, f: 0 };
		unsafe {
			libcdio_sys::cdio_lsn_to_msf(start, &mut start_msf);
			libcdio_sys::cdio_lsn_to_msf(end, &mut end_msf);
		}

		check(unsafe {
			libcdio_sys::cdio_audio_play_msf(self.as_mut_ptr(), &mut start_msf, &mut end_msf)
		})
	}

	#[allow(unsafe_code)]
	/// # Resume.
	pub(crate) fn audio_resume(&self) -> Result<(), CdioError> {
		check(unsafe { libcdio_sys::cdio_audio_resume(self.as_mut_ptr()) })
	}

	#[allow(unsafe_code)]
	/// # Stop.
	pub(crate) fn audio_stop(&self) -> Result<(), CdioError> {
		check(unsafe { libcdio_sys::cdio_audio_stop(self.as_mut_ptr()) })
	}
}

/// ## Device/Driver.
impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # Argument.
	///
	/// Return the value of a driver argument, like "source" or
	/// "access-mode".
	pub(crate) fn arg(&self, key: &str) -> Result<Option<String>, CdioError> {
		let key = CString::new(key).map_err(|_| CdioError::InvalidArg)?;
		let raw = unsafe {
			libcdio_sys::cdio_get_arg(self.as_ptr(), key.as_ptr())
		};
		Ok(c_char_to_string(raw))
	}

	#[allow(unsafe_code)]
	/// # Drive Capabilities.
	pub(crate) fn drive_cap(&self) -> DriveCaps {
		let mut read = 0;
		let mut write = 0;
		let mut misc = 0;
		unsafe {
			libcdio_sys::cdio_get_drive_cap(self.as_ptr(), &mut read, &mut write, &mut misc);
		}
		DriveCaps::new(read, write, misc)
	}

	#[allow(unsafe_code)]
	/// # Driver ID.
	pub(crate) fn driver_id(&self) -> DriverId {
		let raw = unsafe { libcdio_sys::cdio_get_driver_id(self.as_ptr()) };
		DriverId::from_raw(raw).unwrap_or_default()
	}

	#[allow(unsafe_code)]
	/// # Driver Name.
	pub(crate) fn driver_name(&self) -> Option<String> {
		c_char_to_string(unsafe { libcdio_sys::cdio_get_driver_name(self.as_ptr()) })
	}

	#[allow(unsafe_code)]
	/// # Hardware Info.
	pub(crate) fn hwinfo(&self) -> Option<HwInfo> {
		let mut raw = cdio_hwinfo {
			psz_vendor: [0; 9],
			psz_model: [0; 17],
			psz_revision: [0; 5],
		};

		// The return code is a bool, true for good, instead of the usual
		// 0 for good.
		if 1 == unsafe { libcdio_sys::cdio_get_hwinfo(self.as_ptr(), &mut raw) } {
			HwInfo::from_raw(&raw.psz_vendor, &raw.psz_model, &raw.psz_revision)
		}
		else { None }
	}

	#[allow(unsafe_code, non_upper_case_globals)]
	/// # Have ATAPI?
	///
	/// Returns `None` if the driver doesn't know.
	pub(crate) fn have_atapi(&self) -> Option<bool> {
		match unsafe { libcdio_sys::cdio_have_atapi(self.as_mut_ptr()) } {
			bool_3way_t_nope => Some(false),
			bool_3way_t_yep => Some(true),
			_ => None,
		}
	}

	#[allow(unsafe_code)]
	/// # Media Changed?
	pub(crate) fn media_changed(&self) -> Result<bool, CdioError> {
		match unsafe { libcdio_sys::cdio_get_media_changed(self.as_mut_ptr()) } {
			0 => Ok(false),
			1 => Ok(true),
			n => Err(CdioError::from_return_code(n).unwrap_or(CdioError::Unknown(n))),
		}
	}

	#[allow(unsafe_code)]
	/// # Set Block Size.
	pub(crate) fn set_blocksize(&self, size: u16) -> Result<(), CdioError> {
		check(unsafe {
			libcdio_sys::cdio_set_blocksize(self.as_ptr(), c_int::from(size))
		})
	}

	#[allow(unsafe_code)]
	/// # Set Speed.
	pub(crate) fn set_speed(&self, speed: u16) -> Result<(), CdioError> {
		check(unsafe {
			libcdio_sys::cdio_set_speed(self.as_ptr(), c_int::from(speed))
		})
	}

	#[allow(unsafe_code)]
	/// # Eject.
	///
	/// On success `libcdio` destroys the handle itself and nulls our pointer,
	/// so there's nothing left for `Drop` to do.
	pub(crate) fn eject(mut self) -> Result<(), CdioError> {
		check(unsafe { libcdio_sys::cdio_eject_media(&mut self.ptr) })
	}
}

/// ## Disc.
impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # Disc Mode.
	pub(crate) fn discmode(&self) -> libcdio_sys::discmode_t {
		unsafe { libcdio_sys::cdio_get_discmode(self.as_mut_ptr()) }
	}

	#[allow(unsafe_code)]
	/// # Disc Last LSN.
	///
	/// This is the LSN of the lead-out.
	pub(crate) fn disc_last_lsn(&self) -> Result<i32, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_disc_last_lsn(self.as_ptr()) };
		if raw == INVALID_LSN { Err(CdioError::DiscLsn) }
		else { Ok(raw) }
	}

	#[allow(unsafe_code)]
	/// # Joliet Level.
	pub(crate) fn joliet_level(&self) -> u8 {
		unsafe { libcdio_sys::cdio_get_joliet_level(self.as_ptr()) }
	}

	#[allow(unsafe_code)]
	/// # Last Session.
	///
	/// Return the LSN of the first track of the last session.
	pub(crate) fn last_session(&self) -> Result<i32, CdioError> {
		let mut lsn = 0;
		check(unsafe {
			libcdio_sys::cdio_get_last_session(self.as_mut_ptr(), &mut lsn)
		})?;
		Ok(lsn)
	}

	#[allow(unsafe_code)]
	/// # MCN.
	///
	/// Return the raw media catalog number, if any.
	pub(crate) fn mcn(&self) -> Option<String> {
		owned_c_char_to_string(unsafe { libcdio_sys::cdio_get_mcn(self.as_ptr()) })
	}
}

/// ## Tracks.
impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # First Track Number.
	pub(crate) fn first_track_num(&self) -> Option<u8> {
		let raw = unsafe { libcdio_sys::cdio_get_first_track_num(self.as_ptr()) };
		valid_track_num(raw)
	}

	#[allow(unsafe_code)]
	/// # Last Track Number.
	pub(crate) fn last_track_num(&self) -> Option<u8> {
		let raw = unsafe { libcdio_sys::cdio_get_last_track_num(self.as_ptr()) };
		valid_track_num(raw)
	}

	#[allow(unsafe_code)]
	/// # Get the Number of Tracks.
	pub(crate) fn num_tracks(&self) -> Result<u8, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_num_tracks(self.as_ptr()) };
		if raw == INVALID_TRACK { Err(CdioError::TrackNumbers) }
		else { Ok(raw) }
	}

	#[allow(unsafe_code)]
	/// # Track For LSN.
	///
	/// Returns `None` if the LSN falls in the lead-in (track zero), at the
	/// lead-out, or outside the disc entirely.
	pub(crate) fn track_for_lsn(&self, lsn: i32) -> Option<u8> {
		let raw = unsafe { libcdio_sys::cdio_get_track(self.as_ptr(), lsn) };
		if matches!(raw, 0 | INVALID_TRACK | CD_LEADOUT_TRACK) { None }
		else { Some(raw) }
	}

	#[allow(unsafe_code)]
	/// # Track Audio Channels.
	pub(crate) fn track_channels(&self, idx: u8) -> Result<u8, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_track_channels(self.as_ptr(), idx) };
		match raw {
			-2 => Err(CdioError::DriverUnsupported),
			2 | 4 => u8::try_from(raw).map_err(|_| CdioError::TrackChannels(idx)),
			_ => Err(CdioError::TrackChannels(idx)),
		}
	}

	#[allow(unsafe_code)]
	/// # Track Copy Permit.
	pub(crate) fn track_copy_permit(&self, idx: u8) -> libcdio_sys::track_flag_t {
		unsafe { libcdio_sys::cdio_get_track_copy_permit(self.as_ptr(), idx) }
	}

	#[allow(unsafe_code)]
	/// # Track Format.
	pub(crate) fn track_format(&self, idx: u8) -> libcdio_sys::track_format_t {
		unsafe { libcdio_sys::cdio_get_track_format(self.as_ptr(), idx) }
	}

	#[allow(unsafe_code)]
	/// # Track Green?
	pub(crate) fn track_green(&self, idx: u8) -> bool {
		0 != unsafe { libcdio_sys::cdio_get_track_green(self.as_ptr(), idx) }
	}

	#[allow(unsafe_code)]
	/// # Track ISRC.
	pub(crate) fn track_isrc(&self, idx: u8) -> Option<String> {
		owned_c_char_to_string(unsafe {
			libcdio_sys::cdio_get_track_isrc(self.as_ptr(), idx)
		})
	}

	#[allow(unsafe_code)]
	/// # Track Last LSN.
	pub(crate) fn track_last_lsn(&self, idx: u8) -> Result<i32, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_track_last_lsn(self.as_ptr(), idx) };
		if raw == INVALID_LSN { Err(CdioError::TrackLsn(idx)) }
		else { Ok(raw) }
	}

	#[allow(unsafe_code)]
	/// # Track LBA.
	pub(crate) fn track_lba(&self, idx: u8) -> Result<i32, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_track_lba(self.as_ptr(), idx) };
		if raw == INVALID_LSN { Err(CdioError::TrackLba(idx)) }
		else { Ok(raw) }
	}

	#[allow(unsafe_code)]
	/// # Track LSN.
	pub(crate) fn track_lsn(&self, idx: u8) -> Result<i32, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_track_lsn(self.as_ptr(), idx) };
		if raw == INVALID_LSN { Err(CdioError::TrackLsn(idx)) }
		else { Ok(raw) }
	}

	#[allow(unsafe_code)]
	/// # Track Preemphasis.
	pub(crate) fn track_preemphasis(&self, idx: u8) -> libcdio_sys::track_flag_t {
		unsafe { libcdio_sys::cdio_get_track_preemphasis(self.as_ptr(), idx) }
	}

	#[allow(unsafe_code)]
	/// # Track Sector Count.
	///
	/// This includes any pregap sectors before the start of the next track.
	pub(crate) fn track_sec_count(&self, idx: u8) -> Result<u32, CdioError> {
		let raw = unsafe { libcdio_sys::cdio_get_track_sec_count(self.as_ptr(), idx) };
		if raw == 0 { Err(CdioError::TrackSectors(idx)) }
		else { Ok(raw) }
	}
}

/// ## I/O.
impl LibcdioInstance {
	#[allow(unsafe_code, clippy::useless_conversion)]
	/// # Seek.
	pub(crate) fn lseek(&self, offset: i64, whence: c_int) -> Result<i64, CdioError> {
		let offset = offset.try_into().map_err(|_| CdioError::Overflow)?;
		let res = unsafe { libcdio_sys::cdio_lseek(self.as_ptr(), offset, whence) };
		let res = i64::from(res);
		if res < 0 { Err(CdioError::Driver) }
		else { Ok(res) }
	}

	#[allow(unsafe_code)]
	/// # Read.
	///
	/// Read up to `buf.len()` bytes from the current position, returning the
	/// number actually read.
	pub(crate) fn read(&self, buf: &mut [u8]) -> Result<usize, CdioError> {
		let res = unsafe {
			libcdio_sys::cdio_read(self.as_ptr(), buf.as_mut_ptr().cast(), buf.len())
		};
		usize::try_from(res).map_err(|_| CdioError::Read(buf.len()))
	}

	#[allow(unsafe_code)]
	/// # Read Data Sectors.
	///
	/// The buffer must hold at least `blocksize * blocks` bytes.
	pub(crate) fn read_data_sectors(
		&self,
		buf: &mut [u8],
		lsn: i32,
		blocksize: u16,
		blocks: u32,
	) -> Result<(), CdioError> {
		if (buf.len() as u64) < u64::from(blocksize) * u64::from(blocks) {
			return Err(CdioError::DriverBadParameter);
		}

		check(unsafe {
			libcdio_sys::cdio_read_data_sectors(
				self.as_ptr(),
				buf.as_mut_ptr().cast(),
				lsn,
				blocksize,
				blocks,
			)
		})
	}

	#[allow(unsafe_code)]
	/// # Read Sectors.
	///
	/// The caller is responsible for sizing the buffer for the mode; see
	/// `ReadMode::block_size`.
	pub(crate) fn read_sectors(
		&self,
		buf: &mut [u8],
		lsn: i32,
		mode: libcdio_sys::cdio_read_mode_t,
		blocks: u32,
	) -> Result<(), CdioError> {
		check(unsafe {
			libcdio_sys::cdio_read_sectors(
				self.as_ptr(),
				buf.as_mut_ptr().cast(),
				lsn,
				mode,
				blocks,
			)
		})
	}
}



#[allow(unsafe_code)]
/// # Initialize `libcdio`.
pub(crate) fn init() {
	LIBCDIO_INIT.call_once(|| unsafe { libcdio_sys::cdio_init(); });
}

/// # Path to C String.
///
/// ## Errors
///
/// Paths with embedded NULs can't be passed to C.
pub(crate) fn path_to_cstring(src: &Path) -> Result<CString, CdioError> {
	CString::new(src.as_os_str().as_bytes())
		.map_err(|_| CdioError::Device(src.to_string_lossy().into_owned()))
}

#[allow(unsafe_code)]
/// # Pointer to String.
///
/// Convert C-string pointers to a string, unless they're null or empty.
///
/// The memory on the other end belongs to `libcdio`.
pub(crate) fn c_char_to_string(ptr: *const c_char) -> Option<String> {
	if ptr.is_null() { None }
	else {
		unsafe { CStr::from_ptr(ptr) }
			.to_str()
			.ok()
			.map(|s| s.trim().to_owned())
			.filter(|s| ! s.is_empty())
	}
}

#[allow(unsafe_code)]
/// # Owned Pointer to String.
///
/// Same as [`c_char_to_string`], but for strings `libcdio` hands over to us,
/// which need to be freed afterward.
pub(crate) fn owned_c_char_to_string(ptr: *mut c_char) -> Option<String> {
	if ptr.is_null() { None }
	else {
		let out = c_char_to_string(ptr);
		unsafe { libcdio_sys::cdio_free(ptr.cast()); }
		out
	}
}

#[allow(unsafe_code)]
/// # Owned Pointer to Path.
///
/// Like [`owned_c_char_to_string`], but for paths, which needn't be UTF-8.
pub(crate) fn owned_c_char_to_path(ptr: *mut c_char) -> Option<PathBuf> {
	if ptr.is_null() { None }
	else {
		let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
		let out =
			if bytes.is_empty() { None }
			else { Some(PathBuf::from(OsStr::from_bytes(bytes))) };
		unsafe { libcdio_sys::cdio_free(ptr.cast()); }
		out
	}
}

#[allow(unsafe_code)]
/// # Device List.
///
/// Convert a NULL-terminated list of C strings into paths, freeing the list
/// afterward.
pub(crate) fn device_list(list: *mut *mut c_char) -> Vec<PathBuf> {
	let mut out = Vec::new();
	if list.is_null() { return out; }

	let mut idx = 0;
	loop {
		let ptr = unsafe { *list.add(idx) };
		if ptr.is_null() { break; }

		let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
		if ! bytes.is_empty() {
			out.push(PathBuf::from(OsStr::from_bytes(bytes)));
		}
		idx += 1;
	}

	unsafe { libcdio_sys::cdio_free_device_list(list); }
	out
}

/// # Valid Track Number.
const fn valid_track_num(raw: u8) -> Option<u8> {
	if raw == 0 || raw == INVALID_TRACK { None }
	else { Some(raw) }
}
