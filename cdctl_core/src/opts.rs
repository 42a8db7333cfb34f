/*!
# cdctl: Open Options
*/

use crate::DriverId;
use std::path::{
	Path,
	PathBuf,
};



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Open Options.
///
/// This struct holds the settings used to open a [`Device`](crate::Device):
/// the source (a device or disc image path), the driver, and the access mode.
///
/// Options are set using builder-style methods, like:
///
/// ```
/// use cdctl_core::{DriverId, OpenOptions};
///
/// let opts = OpenOptions::default()
///     .with_source("/tmp/disc.cue")
///     .with_driver(DriverId::BinCue);
///
/// assert_eq!(opts.driver(), DriverId::BinCue);
/// assert!(opts.access_mode().is_none());
/// ```
pub struct OpenOptions {
	source: Option<PathBuf>,
	driver: DriverId,
	access_mode: Option<String>,
}

/// ## Setters.
impl OpenOptions {
	#[must_use]
	/// # Source.
	///
	/// The device or disc image to open. If unset, `libcdio` will pick the
	/// default device for the driver.
	pub fn with_source<P>(self, source: P) -> Self
	where P: AsRef<Path> {
		Self {
			source: Some(source.as_ref().to_path_buf()),
			..self
		}
	}

	#[must_use]
	/// # Driver.
	///
	/// The default, [`DriverId::Unknown`], lets `libcdio` figure out which
	/// driver makes sense for the source.
	pub fn with_driver(self, driver: DriverId) -> Self {
		Self {
			driver,
			..self
		}
	}

	#[must_use]
	/// # Access Mode.
	///
	/// Driver-specific access modes, like `"IOCTL"` or `"MMC_RDWR"` for
	/// GNU/Linux. Empty values are treated as unset.
	pub fn with_access_mode<S>(self, mode: S) -> Self
	where S: AsRef<str> {
		let mode = mode.as_ref().trim();
		Self {
			access_mode: if mode.is_empty() { None } else { Some(mode.to_owned()) },
			..self
		}
	}
}

/// ## Getters.
impl OpenOptions {
	#[must_use]
	/// # Source.
	pub fn source(&self) -> Option<&Path> { self.source.as_deref() }

	#[must_use]
	/// # Driver.
	pub const fn driver(&self) -> DriverId { self.driver }

	#[must_use]
	/// # Access Mode.
	pub fn access_mode(&self) -> Option<&str> { self.access_mode.as_deref() }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_opts() {
		let opts = OpenOptions::default();
		assert!(opts.source().is_none());
		assert_eq!(opts.driver(), DriverId::Unknown);
		assert!(opts.access_mode().is_none());

		let opts = opts
			.with_driver(DriverId::Nrg)
			.with_source("/tmp/foo.nrg")
			.with_access_mode(" IOCTL ");
		assert_eq!(opts.source(), Some(Path::new("/tmp/foo.nrg")));
		assert_eq!(opts.driver(), DriverId::Nrg);
		assert_eq!(opts.access_mode(), Some("IOCTL"));

		// Empty access modes reset.
		let opts = opts.with_access_mode("");
		assert!(opts.access_mode().is_none());
	}
}
