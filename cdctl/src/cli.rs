/*!
# cdctl: CLI
*/

use argyle::Argument;
use cdctl_core::{
	CdioError,
	DriverId,
	OpenOptions,
};
use std::path::PathBuf;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Command.
pub(super) enum Command {
	/// # Drive Information.
	Device,

	/// # Eject.
	Eject,

	/// # Track Listing.
	Tracks,
}



#[derive(Debug)]
/// # Parsed Settings.
pub(super) struct Settings {
	/// # Command.
	pub(super) command: Command,

	/// # Open Options.
	pub(super) opts: OpenOptions,

	/// # Close Tray After Eject?
	pub(super) close: bool,
}



/// # Parse Options.
pub(super) fn parse() -> Result<Settings, CdioError> {
	parse_args(
		argyle::args()
			.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")))
	)
}

/// # Parse Arguments.
///
/// The device may arrive as a plain argument, as a non-UTF-8 path, or as the
/// sole entry after a `--` terminator; only one is allowed.
fn parse_args<I>(args: I) -> Result<Settings, CdioError>
where I: IntoIterator<Item=Argument> {
	let mut command = None;
	let mut opts = OpenOptions::default();
	let mut close = true;
	let mut dev: Option<PathBuf> = None;
	for arg in args {
		match arg {
			Argument::Command("device") => { command.replace(Command::Device); },
			Argument::Command("eject") => { command.replace(Command::Eject); },
			Argument::Command("tracks") => { command.replace(Command::Tracks); },

			Argument::Key("-n" | "--no-close") => { close = false; },
			Argument::Key("-h" | "--help") => return Err(CdioError::PrintHelp),
			Argument::Key("-V" | "--version") => return Err(CdioError::PrintVersion),

			Argument::KeyWithValue("-D" | "--driver", s) => {
				let driver = DriverId::try_from(s.as_str())
					.map_err(|_| CdioError::CliParse("-D/--driver"))?;
				opts = opts.with_driver(driver);
			},

			// The device path, or a mistake.
			Argument::Other(s) => {
				if s.starts_with('-') || dev.is_some() {
					return Err(CdioError::CliArg(s));
				}
				if ! s.trim().is_empty() { dev.replace(PathBuf::from(s)); }
			},

			Argument::InvalidUtf8(s) => {
				if dev.is_some() {
					return Err(CdioError::CliArg(s.to_string_lossy().into_owned()));
				}
				dev.replace(PathBuf::from(s));
			},

			// Everything after "--" is taken literally.
			Argument::End(rest) => {
				let mut rest = rest.into_iter();
				if let Some(s) = rest.next() {
					if dev.is_some() {
						return Err(CdioError::CliArg(s.to_string_lossy().into_owned()));
					}
					if let Some(extra) = rest.next() {
						return Err(CdioError::CliArg(extra.to_string_lossy().into_owned()));
					}
					dev.replace(PathBuf::from(s));
				}
			},

			Argument::Command(s) | Argument::Key(s) | Argument::KeyWithValue(s, _) =>
				return Err(CdioError::CliArg(s.to_owned())),
		}
	}

	let command = command.ok_or(CdioError::CliCommand)?;
	if let Some(dev) = dev { opts = opts.with_source(dev); }

	Ok(Settings { command, opts, close })
}



#[cfg(test)]
mod tests {
	use super::*;
	use std::{
		ffi::OsString,
		path::Path,
	};

	#[test]
	fn t_parse_args() {
		let set = parse_args([
			Argument::Command("tracks"),
			Argument::Other("/dev/sr1".to_owned()),
		]).expect("Parse failed.");
		assert_eq!(set.command, Command::Tracks);
		assert_eq!(set.opts.source(), Some(Path::new("/dev/sr1")));
		assert!(set.close, "Eject should close the tray by default.");

		let set = parse_args([
			Argument::Command("eject"),
			Argument::Key("--no-close"),
		]).expect("Parse failed.");
		assert_eq!(set.command, Command::Eject);
		assert!(! set.close, "--no-close was ignored.");
		assert!(set.opts.source().is_none());

		// No command.
		assert!(matches!(
			parse_args([Argument::Other("/dev/sr1".to_owned())]),
			Err(CdioError::CliCommand),
		));

		// Bad driver.
		assert!(matches!(
			parse_args([
				Argument::Command("device"),
				Argument::KeyWithValue("-D", "floppy".to_owned()),
			]),
			Err(CdioError::CliParse(_)),
		));
	}

	#[cfg(unix)]
	#[test]
	fn t_parse_invalid_utf8() {
		use std::os::unix::ffi::OsStringExt;

		let raw = OsString::from_vec(vec![b'/', b't', b'm', b'p', b'/', 0xFF, b'.', b'c', b'u', b'e']);
		let set = parse_args([
			Argument::Command("eject"),
			Argument::InvalidUtf8(raw.clone()),
		]).expect("Parse failed.");
		assert_eq!(set.opts.source(), Some(Path::new(&raw)));

		// Only one device.
		assert!(matches!(
			parse_args([
				Argument::Command("eject"),
				Argument::Other("/dev/sr0".to_owned()),
				Argument::InvalidUtf8(raw),
			]),
			Err(CdioError::CliArg(_)),
		));
	}

	#[test]
	fn t_parse_end() {
		let set = parse_args([
			Argument::Command("eject"),
			Argument::End(vec![OsString::from("-weird-name.cue")]),
		]).expect("Parse failed.");
		assert_eq!(set.opts.source(), Some(Path::new("-weird-name.cue")));

		// An empty terminator changes nothing.
		let set = parse_args([
			Argument::Command("eject"),
			Argument::End(Vec::new()),
		]).expect("Parse failed.");
		assert!(set.opts.source().is_none());

		// Too many.
		assert!(matches!(
			parse_args([
				Argument::Command("eject"),
				Argument::End(vec![OsString::from("/dev/sr0"), OsString::from("/dev/sr1")]),
			]),
			Err(CdioError::CliArg(s)) if s == "/dev/sr1",
		));
		assert!(matches!(
			parse_args([
				Argument::Command("eject"),
				Argument::Other("/dev/sr0".to_owned()),
				Argument::End(vec![OsString::from("/dev/sr1")]),
			]),
			Err(CdioError::CliArg(s)) if s == "/dev/sr1",
		));
	}
}
