/*!
# cdctl: Errors
*/

use cdtoc::TocError;
use fyi_msg::Msg;
use libcdio_sys::{
	driver_return_code_t,
	driver_return_code_t_DRIVER_OP_BAD_PARAMETER,
	driver_return_code_t_DRIVER_OP_BAD_POINTER,
	driver_return_code_t_DRIVER_OP_ERROR,
	driver_return_code_t_DRIVER_OP_NO_DRIVER,
	driver_return_code_t_DRIVER_OP_NOT_PERMITTED,
	driver_return_code_t_DRIVER_OP_SUCCESS,
	driver_return_code_t_DRIVER_OP_UNINIT,
	driver_return_code_t_DRIVER_OP_UNSUPPORTED,
};
use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r"
cdctl v", env!("CARGO_PKG_VERSION"), r"
Inspect, list, and eject CD-ROM/DVD drives and disc images.

USAGE:
    cdctl <COMMAND> [OPTIONS] [DEVICE]

COMMANDS:
    device            Print the drive's hardware information, capabilities,
                      and the available libcdio drivers.
    eject             Eject the media in the drive, then close the tray
                      again.
    tracks            Print the disc's track listing.

OPTIONS:
    -D, --driver <NAME>
                      The libcdio driver to use, like bincue, nrg, cdrdao, or
                      device. [default: auto]
    -h, --help        Print help information to STDOUT and exit.
    -n, --no-close    Leave the tray open after ejecting. (eject only)
    -V, --version     Print version information to STDOUT and exit.

ARGS:
    <DEVICE>          The device or disc image path, like /dev/cdrom.
                      [default: auto]

EXIT CODES:
    0                 Success.
    1                 The device could not be opened.
    2                 The track listing could not be read, or the command
                      line was invalid.
");



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum CdioError {
	/// # Generic Driver Error.
	Driver,

	/// # Driver Doesn't Support the Operation.
	DriverUnsupported,

	/// # Driver Not Initialized.
	DriverUninit,

	/// # Operation Not Permitted.
	DriverNotPermitted,

	/// # Bad Parameter.
	DriverBadParameter,

	/// # Bad Pointer.
	DriverBadPointer,

	/// # No Driver.
	NoDriver,

	/// # Unrecognized Return Code.
	Unknown(i32),

	/// # CDTOC passthrough.
	Cdtoc(TocError),

	/// # Invalid device path.
	Device(String),

	/// # Unable to open device.
	DeviceOpen(Option<String>),

	/// # Invalid disc-level LSN.
	DiscLsn,

	/// # Invalid Argument Key/Value.
	InvalidArg,

	/// # Numbers can't be converted to the necessary types.
	Overflow,

	/// # Short Read.
	Read(usize),

	/// # Invalid track audio channel count.
	TrackChannels(u8),

	/// # Invalid track flag.
	TrackFlag(u8),

	/// # Unsupported track format or layout.
	TrackFormat(u8),

	/// # Invalid track LBA.
	TrackLba(u8),

	/// # Invalid track LSN.
	TrackLsn(u8),

	/// # Invalid track number.
	TrackNumber(u8),

	/// # Unable to obtain the number of tracks.
	TrackNumbers,

	/// # Invalid track sector count.
	TrackSectors(u8),

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # Missing Command.
	CliCommand,

	#[cfg(feature = "bin")]
	/// # CLI Parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for CdioError {}

impl From<TocError> for CdioError {
	#[inline]
	fn from(err: TocError) -> Self { Self::Cdtoc(err) }
}

impl From<CdioError> for Msg {
	#[inline]
	fn from(src: CdioError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for CdioError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Driver => f.write_str("Driver error."),
			Self::DriverUnsupported => f.write_str("The operation is not supported by the driver."),
			Self::DriverUninit => f.write_str("The driver has not been initialized."),
			Self::DriverNotPermitted => f.write_str("The operation is not permitted."),
			Self::DriverBadParameter => f.write_str("Bad parameter passed to the driver."),
			Self::DriverBadPointer => f.write_str("Bad pointer passed to the driver."),
			Self::NoDriver => f.write_str("No driver is available for the operation."),
			Self::Unknown(n) => write!(f, "Unknown driver error ({n})."),
			Self::Cdtoc(s) => write!(f, "{s}"),
			Self::Device(s) => write!(f, "Invalid device path {s}."),
			Self::DeviceOpen(s) =>
				if let Some(s) = s { write!(f, "Unable to open connection with {s}.") }
				else {
					f.write_str("Unable to open connection with the default device.")
				},
			Self::DiscLsn => f.write_str("Unable to obtain the disc's last LSN."),
			Self::InvalidArg => f.write_str("Invalid argument key or value."),
			Self::Overflow => f.write_str("The numbers are too big for this system architecture."),
			Self::Read(n) => write!(f, "Read error ({n} bytes)."),
			Self::TrackChannels(n) => write!(f, "Unable to obtain the audio channels for track #{n}."),
			Self::TrackFlag(n) => write!(f, "Invalid flag value for track #{n}."),
			Self::TrackFormat(n) => write!(f, "Unsupported format or position for track #{n}."),
			Self::TrackLba(n) => write!(f, "Unable to obtain the LBA for track #{n}."),
			Self::TrackLsn(n) => write!(f, "Unable to obtain the LSN for track #{n}."),
			Self::TrackNumber(n) => write!(f, "Invalid track number ({n})."),
			Self::TrackNumbers => f.write_str("Unable to obtain the track total."),
			Self::TrackSectors(n) => write!(f, "Unable to obtain the sector count for track #{n}."),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliCommand => f.write_str("A command is required: device, eject, or tracks."),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("cdctl v", env!("CARGO_PKG_VERSION"))),
		}
	}
}

impl CdioError {
	#[must_use]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # From Return Code.
	///
	/// Translate a `libcdio` driver return code into the corresponding error,
	/// or `None` if the code signals success.
	///
	/// Codes `libcdio` doesn't document come back as [`CdioError::Unknown`].
	pub const fn from_return_code(code: driver_return_code_t) -> Option<Self> {
		match code {
			driver_return_code_t_DRIVER_OP_SUCCESS => None,
			driver_return_code_t_DRIVER_OP_ERROR => Some(Self::Driver),
			driver_return_code_t_DRIVER_OP_UNSUPPORTED => Some(Self::DriverUnsupported),
			driver_return_code_t_DRIVER_OP_UNINIT => Some(Self::DriverUninit),
			driver_return_code_t_DRIVER_OP_NOT_PERMITTED => Some(Self::DriverNotPermitted),
			driver_return_code_t_DRIVER_OP_BAD_PARAMETER => Some(Self::DriverBadParameter),
			driver_return_code_t_DRIVER_OP_BAD_POINTER => Some(Self::DriverBadPointer),
			driver_return_code_t_DRIVER_OP_NO_DRIVER => Some(Self::NoDriver),
			n => Some(Self::Unknown(n)),
		}
	}

	#[must_use]
	/// # Driver Error?
	///
	/// Returns `true` for the errors that originate from a `libcdio` return
	/// code.
	pub const fn is_driver_error(&self) -> bool {
		matches!(
			self,
			Self::Driver | Self::DriverUnsupported | Self::DriverUninit |
			Self::DriverNotPermitted | Self::DriverBadParameter |
			Self::DriverBadPointer | Self::NoDriver | Self::Unknown(_) |
			Self::DiscLsn
		)
	}

	#[must_use]
	/// # Track Error?
	///
	/// Returns `true` for errors concerning a specific track or the track
	/// total.
	pub const fn is_track_error(&self) -> bool {
		matches!(
			self,
			Self::TrackChannels(_) | Self::TrackFlag(_) | Self::TrackFormat(_) |
			Self::TrackLba(_) |
			Self::TrackLsn(_) | Self::TrackNumber(_) | Self::TrackNumbers |
			Self::TrackSectors(_)
		)
	}

	#[must_use]
	/// # Unsupported?
	///
	/// Both unsupported and not-permitted codes amount to "this drive won't
	/// do that".
	pub const fn is_unsupported(&self) -> bool {
		matches!(self, Self::DriverUnsupported | Self::DriverNotPermitted)
	}
}



/// # Check Return Code.
///
/// This is the `?`-friendly version of [`CdioError::from_return_code`].
pub(crate) const fn check(code: driver_return_code_t) -> Result<(), CdioError> {
	match CdioError::from_return_code(code) {
		None => Ok(()),
		Some(e) => Err(e),
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_return_codes() {
		assert_eq!(CdioError::from_return_code(0), None);
		assert!(check(0).is_ok());

		for (code, expected) in [
			(-1, CdioError::Driver),
			(-2, CdioError::DriverUnsupported),
			(-3, CdioError::DriverUninit),
			(-4, CdioError::DriverNotPermitted),
			(-5, CdioError::DriverBadParameter),
			(-6, CdioError::DriverBadPointer),
			(-7, CdioError::NoDriver),
		] {
			assert_eq!(CdioError::from_return_code(code), Some(expected.clone()));
			assert_eq!(check(code), Err(expected.clone()));
			assert!(expected.is_driver_error(), "{expected:?} should be a driver error.");
			assert!(! expected.is_track_error(), "{expected:?} should not be a track error.");
		}

		// Anything else is generic.
		assert_eq!(CdioError::from_return_code(-99), Some(CdioError::Unknown(-99)));
		assert_eq!(CdioError::from_return_code(5), Some(CdioError::Unknown(5)));
		assert_eq!(
			CdioError::Unknown(-99).to_string(),
			"Unknown driver error (-99).",
		);
	}

	#[test]
	fn t_classify() {
		assert!(CdioError::TrackLsn(3).is_track_error());
		assert!(CdioError::TrackNumbers.is_track_error());
		assert!(! CdioError::TrackLsn(3).is_driver_error());
		assert!(CdioError::DriverNotPermitted.is_unsupported());
		assert!(CdioError::DriverUnsupported.is_unsupported());
		assert!(! CdioError::Driver.is_unsupported());
		assert!(! CdioError::DeviceOpen(None).is_driver_error());

		assert_eq!(
			CdioError::TrackLsn(3).to_string(),
			"Unable to obtain the LSN for track #3.",
		);
	}
}
