/*!
# cdctl: Media Catalog Number
*/

use crate::CdioError;
use std::fmt;
use trimothy::TrimSliceMatches;



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Media Catalog Number.
///
/// This is a simple wrapper for the thirteen-digit MCN (a UPC/EAN barcode)
/// some discs carry in their subchannel data.
///
/// Drives report a missing MCN in all sorts of ways, so values are trimmed of
/// whitespace and NULs, and all-zero values are rejected outright.
pub struct Mcn([u8; 13]);

impl fmt::Display for Mcn {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl TryFrom<&[u8]> for Mcn {
	type Error = CdioError;
	fn try_from(mut src: &[u8]) -> Result<Self, Self::Error> {
		src = src.trim_start_matches(|b| b.is_ascii_whitespace() || b == 0);
		src = src.trim_end_matches(|b| b.is_ascii_whitespace() || b == 0);

		// Make sure we've got 13 ASCII digits and nothing else.
		if src.len() != 13 || ! src.iter().all(u8::is_ascii_digit) {
			return Err(CdioError::InvalidArg);
		}

		// All zeroes is just a fancy way of saying "nothing".
		if src.iter().all(|&b| b == b'0') { return Err(CdioError::InvalidArg); }

		let mut out = [b'0'; 13];
		out.copy_from_slice(src);
		Ok(Self(out))
	}
}

impl TryFrom<&str> for Mcn {
	type Error = CdioError;

	#[inline]
	fn try_from(src: &str) -> Result<Self, Self::Error> {
		Self::try_from(src.as_bytes())
	}
}

impl Mcn {
	#[must_use]
	/// # As Str.
	pub fn as_str(&self) -> &str {
		// The digits were all verified during construction.
		std::str::from_utf8(self.0.as_slice()).unwrap_or_default()
	}

	#[must_use]
	/// # Valid EAN-13?
	///
	/// Returns `true` if the check digit adds up.
	pub fn is_ean13(&self) -> bool {
		let mut total = 0_u32;
		for (k, num) in self.0[..12].iter().enumerate() {
			let num = u32::from(num ^ b'0');
			total += if k % 2 == 0 { num } else { num * 3 };
		}

		let chk = (10 - total % 10) % 10;
		chk == u32::from(self.0[12] ^ b'0')
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_ean13() {
		for (raw, valid) in [
			("0008811126827", true),
			("0018861006529", true),
			("0042282848420", true),
			("0075597996524", true),
			("0075992742320", true),
			("0089218545555", false),
			("0089218545992", true),
			("0731455829921", true),
			("0732455829921", false),
			("0886977200922", true),
			("5099997200628", true),
			("9332727016318", true),
		] {
			let mcn = Mcn::try_from(raw).expect("MCN failed.");
			assert_eq!(mcn.is_ean13(), valid, "{raw}");
			assert_eq!(mcn.to_string(), raw);
		}
	}

	#[test]
	fn t_trim() {
		let mcn = Mcn::try_from(&b" 9332727016318\0\0"[..]).expect("MCN failed.");
		assert_eq!(mcn.as_str(), "9332727016318");

		assert!(Mcn::try_from("0000000000000").is_err());
		assert!(Mcn::try_from("").is_err());
		assert!(Mcn::try_from("933272701631").is_err());
		assert!(Mcn::try_from("93327270163180").is_err());
		assert!(Mcn::try_from("933272701631X").is_err());
	}
}
