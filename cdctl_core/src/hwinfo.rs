/*!
# cdctl: Hardware Info
*/

use std::{
	ffi::CStr,
	fmt,
	os::raw::c_char,
};



#[derive(Debug, Clone, Default, Eq, Hash, PartialEq)]
/// # Drive Hardware Info.
///
/// The vendor, model, and firmware revision reported by a drive in response
/// to a SCSI INQUIRY.
///
/// Disc images have no hardware, so `libcdio` fills in something generic for
/// them, like vendor "libcdio".
pub struct HwInfo {
	vendor: String,
	model: String,
	revision: String,
}

impl fmt::Display for HwInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.vendor.is_empty() { f.write_str(&self.model)?; }
		else { write!(f, "{} {}", self.vendor, self.model)?; }

		if self.revision.is_empty() { Ok(()) }
		else { write!(f, " ({})", self.revision) }
	}
}

impl HwInfo {
	#[must_use]
	/// # From Raw Parts.
	///
	/// Build from the fixed-length, NUL-terminated buffers of a
	/// `cdio_hwinfo` struct.
	///
	/// Returns `None` if the model is missing, since that's the one field
	/// every drive should have.
	pub(crate) fn from_raw(vendor: &[c_char], model: &[c_char], revision: &[c_char])
	-> Option<Self> {
		let model = raw_to_string(model);
		if model.is_empty() { return None; }

		Some(Self {
			vendor: raw_to_string(vendor),
			model,
			revision: raw_to_string(revision),
		})
	}

	#[must_use]
	/// # Vendor.
	pub fn vendor(&self) -> &str { &self.vendor }

	#[must_use]
	/// # Model.
	pub fn model(&self) -> &str { &self.model }

	#[must_use]
	/// # Revision.
	pub fn revision(&self) -> &str { &self.revision }
}



#[allow(clippy::cast_sign_loss)]
/// # Raw to String.
///
/// Rather than deal with the uncertainty of pointers, recast the signs since
/// we have everything right here, then trim and own the result.
fn raw_to_string(raw: &[c_char]) -> String {
	let bytes: Vec<u8> = raw.iter().map(|&b| b as u8).collect();
	CStr::from_bytes_until_nul(&bytes)
		.ok()
		.and_then(|v| v.to_str().ok())
		.map_or_else(String::new, |v| v.trim().to_owned())
}



#[cfg(test)]
mod tests {
	use super::*;

	#[allow(clippy::cast_possible_wrap)]
	fn raw<const N: usize>(src: &[u8]) -> [c_char; N] {
		let mut out = [0; N];
		for (o, &b) in out.iter_mut().zip(src) { *o = b as c_char; }
		out
	}

	#[test]
	fn t_hwinfo() {
		let vendor: [c_char; 9] = raw(b"HL-DT-ST");
		let model: [c_char; 17] = raw(b"BD-RE  WH16NS40 ");
		let revision: [c_char; 5] = raw(b"1.05");

		let info = HwInfo::from_raw(&vendor, &model, &revision).expect("HwInfo failed.");
		assert_eq!(info.vendor(), "HL-DT-ST");
		assert_eq!(info.model(), "BD-RE  WH16NS40");
		assert_eq!(info.revision(), "1.05");
		assert_eq!(info.to_string(), "HL-DT-ST BD-RE  WH16NS40 (1.05)");

		// No vendor is fine.
		let empty: [c_char; 9] = [0; 9];
		let info = HwInfo::from_raw(&empty, &model, &empty).expect("HwInfo failed.");
		assert_eq!(info.to_string(), "BD-RE  WH16NS40");

		// No model is not.
		let empty17: [c_char; 17] = [0; 17];
		assert!(HwInfo::from_raw(&vendor, &empty17, &revision).is_none());
	}

	#[test]
	fn t_unterminated() {
		// A buffer without a NUL can't be trusted.
		let model: [c_char; 4] = raw(b"ABCD");
		assert!(HwInfo::from_raw(&[0], &model, &[0]).is_none());
	}
}
