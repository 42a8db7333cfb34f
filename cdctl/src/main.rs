/*!
# cdctl
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]



mod cli;

use cdctl_core::{
	available_drivers,
	CD_LEADOUT_TRACK,
	CdioError,
	Device,
};
use cli::{
	Command,
	Settings,
};
use dactyl::NiceU32;
use fyi_ansi::{
	bold,
	dim,
};
use fyi_msg::Msg;
use oxford_join::OxfordJoin;
use std::{
	io::Write,
	path::PathBuf,
	process::ExitCode,
};



/// # Track Table Header.
///
/// Column widths match the rows printed by `tracks`.
const TRACK_HEADER: &str = bold!("  #: LSN     MSF       Sectors  Format");



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match main__() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e @ (CdioError::PrintHelp | CdioError::PrintVersion)) => {
			println!("{e}");
			ExitCode::SUCCESS
		},
		Err(e @ (CdioError::Device(_) | CdioError::DeviceOpen(_))) => {
			Msg::from(e).eprint();
			ExitCode::from(1)
		},
		Err(e) => {
			Msg::from(e).eprint();
			ExitCode::from(2)
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff.
fn main__() -> Result<(), CdioError> {
	let Settings { command, opts, close } = cli::parse()?;
	let dev = Device::open(&opts)?;

	match command {
		Command::Device => {
			device_info(&dev);
			dev.close();
			Ok(())
		},
		Command::Eject => {
			eject(dev, close);
			Ok(())
		},
		Command::Tracks => {
			let res = tracks(&dev);
			dev.close();
			res
		},
	}
}



/// # Device Name.
///
/// Return the source the device was opened with, or a placeholder.
fn device_name(dev: &Device) -> String {
	dev.source().unwrap_or_else(|| "(default device)".to_owned())
}

/// # Device Information.
///
/// Print the drive's hardware details, capabilities, and the drivers
/// compiled into `libcdio`.
fn device_info(dev: &Device) {
	let writer = std::io::stdout();
	let mut handle = writer.lock();

	let name = device_name(dev);
	match dev.hwinfo() {
		Some(hw) => {
			let _res = writeln!(
				&mut handle,
				"drive: {name}, vendor: {}, model: {}, revision: {}",
				hw.vendor(),
				hw.model(),
				hw.revision(),
			);
		},
		None => {
			let _res = writeln!(&mut handle, "drive: {name}, vendor: ?, model: ?, revision: ?");
		},
	}

	// Capabilities, one per line.
	let caps = dev.drive_cap();
	let _res = writeln!(&mut handle, "\nDrive capabilities for {name}...");
	if caps.is_empty() {
		let _res = writeln!(&mut handle, dim!("  (none reported)"));
	}
	else {
		for cap in caps.read.to_map().into_keys()
			.chain(caps.write.to_map().into_keys())
			.chain(caps.misc.to_map().into_keys())
		{
			let _res = writeln!(&mut handle, "  {cap}");
		}
	}

	// Drivers.
	let drivers = available_drivers();
	let _res = writeln!(&mut handle, "\nDriver availability...");
	if drivers.is_empty() {
		let _res = writeln!(&mut handle, dim!("  (none)"));
	}
	else {
		let names: Vec<&str> = drivers.iter().map(|d| d.as_str()).collect();
		let _res = writeln!(&mut handle, "  Installed: {}.", names.oxford_and());
	}

	let _res = handle.flush();
}

/// # Eject.
///
/// Eject the media, then close the tray again unless `--no-close` was given.
/// Failures are reported but aren't fatal.
fn eject(dev: Device, close: bool) {
	let name = device_name(&dev);
	let driver = dev.driver_id();
	let path = dev.source().map(PathBuf::from);

	Msg::info(format!("Ejecting CD in drive {name}.")).eprint();
	match dev.eject() {
		Ok(()) => {
			Msg::success(format!("Ejected {name}.")).eprint();
			if close {
				match cdctl_core::close_tray(path.as_deref(), driver) {
					Ok(_) => Msg::success(format!("Closed tray of CD-ROM drive {name}.")).eprint(),
					Err(e) => Msg::warning(format!(
						"Closing tray of CD-ROM drive {name} failed: {e}"
					)).eprint(),
				}
			}
		},
		Err(e) if e.is_unsupported() =>
			Msg::warning(format!("Eject not supported for {name}.")).eprint(),
		Err(e) =>
			Msg::error(format!("Eject of CD-ROM drive {name} failed: {e}")).eprint(),
	}
}

/// # Track Listing.
///
/// Print a summary of the disc followed by the position and format of each
/// track.
///
/// ## Errors
///
/// If there isn't even a first track, there's nothing to list.
fn tracks(dev: &Device) -> Result<(), CdioError> {
	if dev.first_track().is_none() { return Err(CdioError::TrackNumbers); }
	let num = dev.num_tracks()?;
	let name = device_name(dev);

	let writer = std::io::stdout();
	let mut handle = writer.lock();

	match dev.last_session() {
		Ok(lsn) => {
			let _res = writeln!(
				&mut handle,
				"CD-ROM {name} has {num} track(s); the last session starts at LSN {lsn}.",
			);
		},
		Err(_) => {
			let _res = writeln!(&mut handle, "CD-ROM {name} has {num} track(s).");
		},
	}

	let mode = dev.disc_mode();
	let _res = writeln!(&mut handle, "Disc mode is {mode}.");
	if let Some(mcn) = dev.mcn() {
		let _res = writeln!(&mut handle, "Media Catalog Number: {mcn}");
	}

	// The table.
	let _res = writeln!(&mut handle, "{TRACK_HEADER}");
	for track in dev.tracks()? {
		// Skip anything unreadable.
		let Ok(lsn) = track.lsn() else { continue; };
		let Ok(msf) = track.msf() else { continue; };
		let sectors = track.sec_count().map_or_else(
			|_| "?".to_owned(),
			|n| NiceU32::from(n).as_str().to_owned(),
		);
		let _res = writeln!(
			&mut handle,
			"{:>3}: {lsn:06}  {msf}  {sectors:>7}  {}",
			track.number(),
			track.format(),
		);
	}

	// The leadout.
	let leadout = dev.disc_last_lsn()?;
	let _res = writeln!(&mut handle, "{CD_LEADOUT_TRACK:>3X}: {leadout:06}  leadout");

	// Audio discs have IDs!
	if mode.has_audio() {
		if let Ok(toc) = dev.toc() {
			let _res = writeln!(
				&mut handle,
				"\nCDDB:        {}\nMusicBrainz: {}",
				toc.cddb_id(),
				toc.musicbrainz_id(),
			);
		}
	}

	let _res = handle.flush();
	Ok(())
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_track_header() {
		assert_eq!(
			TRACK_HEADER,
			"\x1b[1m  #: LSN     MSF       Sectors  Format\x1b[0m",
		);

		// The columns should line up with a formatted row.
		let row = format!(
			"{:>3}: {:06}  {}  {:>7}  {}",
			1, 150, "00:02:00", "1,234", "audio",
		);
		let header = TRACK_HEADER
			.trim_start_matches("\x1b[1m")
			.trim_end_matches("\x1b[0m");
		assert_eq!(header.find("LSN"), row.find("000150"), "LSN column misaligned.");
		assert_eq!(header.find("MSF"), row.find("00:02:00"), "MSF column misaligned.");
		assert_eq!(header.find("Format"), row.find("audio"), "Format column misaligned.");
	}
}
