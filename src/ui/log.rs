//! Unified logging system

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}

	/// Route all log lines to stderr so stdout carries only machine-readable output
	pub fn set_quiet_stdout(enabled: bool) {
		QUIET.store(enabled, Ordering::Relaxed);
	}
}

fn emit(icon: ColoredString, msg: ColoredString) {
	let time = Local::now().format("%H:%M:%S").to_string().dimmed();
	if QUIET.load(Ordering::Relaxed) {
		eprintln!("[{}] {} {}", time, icon, msg);
	} else {
		println!("[{}] {} {}", time, icon, msg);
	}
}

pub fn info(msg: &str) {
	emit("ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	emit("✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	emit("⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	emit("✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		emit("⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	let line = format!("─── {} ───", text).bright_blue().bold();
	if QUIET.load(Ordering::Relaxed) {
		eprintln!("\n{}", line);
	} else {
		println!("\n{}", line);
	}
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let filename = path
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or("unknown");

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, shorten(filename, max_len))
}

/// Middle-elide long names, respecting char boundaries
pub fn shorten(name: &str, max_len: usize) -> String {
	let count = name.chars().count();
	if count <= max_len || max_len < 8 {
		return name.to_string();
	}
	let head: String = name.chars().take(max_len / 2).collect();
	let tail: String = name.chars().skip(count - (max_len / 2 - 3)).collect();
	format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_names_untouched() {
		assert_eq!(shorten("flood.jpg", 50), "flood.jpg");
	}

	#[test]
	fn long_names_elided_to_max() {
		let name = "a".repeat(30) + "_harbour_storm_2024.jpg";
		let short = shorten(&name, 20);
		assert!(short.contains("..."));
		assert_eq!(short.chars().count(), 20);
		assert!(short.ends_with(".jpg"));
	}

	#[test]
	fn multibyte_names_do_not_panic() {
		let name = "ü".repeat(40);
		assert_eq!(shorten(&name, 10).chars().count(), 10);
	}

	#[test]
	fn link_wraps_display_name() {
		let link = path_link(std::path::Path::new("/tmp/x/photo.png"), 50);
		assert!(link.starts_with("\x1b]8;;file://"));
		assert!(link.contains("photo.png"));
	}
}
