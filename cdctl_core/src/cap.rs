/*!
# cdctl: Drive Capabilities
*/

use std::{
	collections::BTreeMap,
	fmt,
};



/// # Helper: Capability Flags.
///
/// This generates a flag enum and a companion bitmask set for one of the
/// three `libcdio` capability families.
macro_rules! caps {
	(
		$flag:ident $set:ident $title:literal
		$( $k:ident $bit:literal $kstr:literal ),+ $(,)?
	) => (
		#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
		#[doc = concat!("# ", $title, " Capability.")]
		pub enum $flag {
			$(
				#[doc = concat!("# ", $kstr, ".")]
				$k,
			)+
		}

		impl fmt::Display for $flag {
			#[inline]
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				<str as fmt::Display>::fmt(self.as_str(), f)
			}
		}

		impl $flag {
			/// # All Flags.
			pub const ALL: &'static [Self] = &[ $( Self::$k, )+ ];

			#[must_use]
			/// # Bit.
			///
			/// Return the `libcdio` bitmask value for the flag.
			pub const fn bit(self) -> u32 {
				match self {
					$( Self::$k => $bit, )+
				}
			}

			#[must_use]
			/// # As Str.
			///
			/// Return the `libcdio` constant name for the flag.
			pub const fn as_str(self) -> &'static str {
				match self {
					$( Self::$k => $kstr, )+
				}
			}
		}

		#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
		#[doc = concat!("# ", $title, " Capabilities.")]
		///
		/// A set of capability flags, as reported by the drive.
		pub struct $set(u32);

		impl From<u32> for $set {
			#[inline]
			fn from(src: u32) -> Self { Self(src) }
		}

		impl fmt::Display for $set {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				let mut first = true;
				for flag in self.iter() {
					if first { first = false; }
					else { f.write_str(", ")?; }
					<$flag as fmt::Display>::fmt(&flag, f)?;
				}
				Ok(())
			}
		}

		impl $set {
			#[must_use]
			/// # Bits.
			pub const fn bits(self) -> u32 { self.0 }

			#[must_use]
			/// # Contains?
			pub const fn contains(self, flag: $flag) -> bool {
				let bit = flag.bit();
				bit != 0 && bit == self.0 & bit
			}

			#[must_use]
			/// # Is Empty?
			///
			/// Returns `true` if none of the known flags are set.
			pub fn is_empty(self) -> bool { self.iter().next().is_none() }

			/// # Iterate Set Flags.
			pub fn iter(self) -> impl Iterator<Item=$flag> {
				$flag::ALL.iter().copied().filter(move |f| self.contains(*f))
			}

			#[must_use]
			/// # As Map.
			///
			/// Return the flags that are set as a name-keyed dictionary.
			pub fn to_map(self) -> BTreeMap<&'static str, bool> {
				self.iter().map(|f| (f.as_str(), true)).collect()
			}
		}
	);
}

caps! {
	ReadCap ReadCaps "Read"
	Audio      0x0_0001 "DRIVE_CAP_READ_AUDIO",
	CdDa       0x0_0002 "DRIVE_CAP_READ_CD_DA",
	CdG        0x0_0004 "DRIVE_CAP_READ_CD_G",
	CdR        0x0_0008 "DRIVE_CAP_READ_CD_R",
	CdRw       0x0_0010 "DRIVE_CAP_READ_CD_RW",
	DvdR       0x0_0020 "DRIVE_CAP_READ_DVD_R",
	DvdPr      0x0_0040 "DRIVE_CAP_READ_DVD_PR",
	DvdRam     0x0_0080 "DRIVE_CAP_READ_DVD_RAM",
	DvdRom     0x0_0100 "DRIVE_CAP_READ_DVD_ROM",
	DvdRw      0x0_0200 "DRIVE_CAP_READ_DVD_RW",
	DvdRpw     0x0_0400 "DRIVE_CAP_READ_DVD_RPW",
	C2Errs     0x0_0800 "DRIVE_CAP_READ_C2_ERRS",
	Mode2Form1 0x0_1000 "DRIVE_CAP_READ_MODE2_FORM1",
	Mode2Form2 0x0_2000 "DRIVE_CAP_READ_MODE2_FORM2",
	Mcn        0x0_4000 "DRIVE_CAP_READ_MCN",
	Isrc       0x0_8000 "DRIVE_CAP_READ_ISRC",
}

caps! {
	WriteCap WriteCaps "Write"
	CdR        0x0_0001 "DRIVE_CAP_WRITE_CD_R",
	CdRw       0x0_0002 "DRIVE_CAP_WRITE_CD_RW",
	DvdR       0x0_0004 "DRIVE_CAP_WRITE_DVD_R",
	DvdPr      0x0_0008 "DRIVE_CAP_WRITE_DVD_PR",
	DvdRam     0x0_0010 "DRIVE_CAP_WRITE_DVD_RAM",
	DvdRw      0x0_0020 "DRIVE_CAP_WRITE_DVD_RW",
	DvdRpw     0x0_0040 "DRIVE_CAP_WRITE_DVD_RPW",
	MtRainier  0x0_0080 "DRIVE_CAP_WRITE_MT_RAINIER",
	BurnProof  0x0_0100 "DRIVE_CAP_WRITE_BURN_PROOF",
}

caps! {
	MiscCap MiscCaps "Misc"
	Error        0x4_0000 "DRIVE_CAP_ERROR",
	Unknown      0x8_0000 "DRIVE_CAP_UNKNOWN",
	CloseTray    0x0_0001 "DRIVE_CAP_MISC_CLOSE_TRAY",
	Eject        0x0_0002 "DRIVE_CAP_MISC_EJECT",
	Lock         0x0_0004 "DRIVE_CAP_MISC_LOCK",
	SelectSpeed  0x0_0008 "DRIVE_CAP_MISC_SELECT_SPEED",
	SelectDisc   0x0_0010 "DRIVE_CAP_MISC_SELECT_DISC",
	MultiSession 0x0_0020 "DRIVE_CAP_MISC_MULTI_SESSION",
	MediaChanged 0x0_0080 "DRIVE_CAP_MISC_MEDIA_CHANGED",
	Reset        0x0_0100 "DRIVE_CAP_MISC_RESET",
	File         0x2_0000 "DRIVE_CAP_MISC_FILE",
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Drive Capabilities.
///
/// The read, write, and miscellaneous capabilities reported for a drive.
///
/// Note: some drivers can't query a drive with no media in it, in which case
/// the capabilities come back empty or [`MiscCap::Unknown`] even though the
/// hardware is perfectly capable.
pub struct DriveCaps {
	/// # Read.
	pub read: ReadCaps,

	/// # Write.
	pub write: WriteCaps,

	/// # Misc.
	pub misc: MiscCaps,
}

impl DriveCaps {
	#[must_use]
	/// # New.
	pub const fn new(read: u32, write: u32, misc: u32) -> Self {
		Self {
			read: ReadCaps(read),
			write: WriteCaps(write),
			misc: MiscCaps(misc),
		}
	}

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool {
		self.read.is_empty() && self.write.is_empty() && self.misc.is_empty()
	}

	#[must_use]
	/// # Unknown?
	///
	/// Returns `true` if the driver was unable to determine the capabilities,
	/// or reported an error trying.
	pub const fn is_unknown(&self) -> bool {
		self.misc.contains(MiscCap::Unknown) || self.misc.contains(MiscCap::Error)
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_read_caps() {
		let caps = ReadCaps::from(0x0_0001 | 0x0_0800 | 0x0_8000);
		assert!(caps.contains(ReadCap::Audio));
		assert!(caps.contains(ReadCap::C2Errs));
		assert!(caps.contains(ReadCap::Isrc));
		assert!(! caps.contains(ReadCap::CdDa));
		assert!(! caps.is_empty());

		assert_eq!(
			caps.iter().collect::<Vec<_>>(),
			[ReadCap::Audio, ReadCap::C2Errs, ReadCap::Isrc],
		);

		let map = caps.to_map();
		assert_eq!(map.len(), 3);
		assert_eq!(map.get("DRIVE_CAP_READ_AUDIO"), Some(&true));
		assert_eq!(map.get("DRIVE_CAP_READ_CD_DA"), None);

		assert_eq!(
			caps.to_string(),
			"DRIVE_CAP_READ_AUDIO, DRIVE_CAP_READ_C2_ERRS, DRIVE_CAP_READ_ISRC",
		);
	}

	#[test]
	fn t_empty() {
		// Nothing set means nothing in the map.
		assert!(ReadCaps::default().to_map().is_empty());
		assert!(WriteCaps::from(0).is_empty());
		assert!(DriveCaps::default().is_empty());

		// Unknown bits are ignored.
		assert!(WriteCaps::from(0x8000_0000).is_empty());
		assert_eq!(WriteCaps::from(0x8000_0000).bits(), 0x8000_0000);
	}

	#[test]
	fn t_misc_caps() {
		let caps = DriveCaps::new(0, 0x0_0003, 0x0_0002 | 0x2_0000);
		assert!(caps.misc.contains(MiscCap::Eject));
		assert!(caps.misc.contains(MiscCap::File));
		assert!(! caps.misc.contains(MiscCap::CloseTray));
		assert!(! caps.is_unknown());
		assert!(! caps.is_empty());
		assert_eq!(
			caps.write.iter().collect::<Vec<_>>(),
			[WriteCap::CdR, WriteCap::CdRw],
		);

		let caps = DriveCaps::new(0, 0, 0x8_0000);
		assert!(caps.is_unknown());
	}

	#[test]
	fn t_bits_unique() {
		// Make sure we didn't fat-finger any of the bitmasks.
		fn chk(bits: &[u32]) {
			let mut all = 0_u32;
			for b in bits {
				assert_eq!(b.count_ones(), 1, "Flags should be single bits.");
				assert_eq!(all & b, 0, "Flags should not overlap.");
				all |= b;
			}
		}

		chk(&ReadCap::ALL.iter().map(|f| f.bit()).collect::<Vec<_>>());
		chk(&WriteCap::ALL.iter().map(|f| f.bit()).collect::<Vec<_>>());
		chk(&MiscCap::ALL.iter().map(|f| f.bit()).collect::<Vec<_>>());
	}
}
