//! Collecting the news text and image uploads from the command line

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::IMAGE_EXTENSIONS;
use crate::core::ImagePayload;
use crate::ui;

/// Where the reference text comes from
#[derive(Debug, Clone)]
pub enum TextSource {
	Inline(String),
	File(PathBuf),
	Stdin,
}

impl TextSource {
	/// `--text` wins over `--text-file`; a file named `-` means stdin
	pub fn from_args(text: Option<String>, text_file: Option<PathBuf>) -> Option<Self> {
		match (text, text_file) {
			(Some(t), _) => Some(Self::Inline(t)),
			(None, Some(p)) if p.as_os_str() == "-" => Some(Self::Stdin),
			(None, Some(p)) => Some(Self::File(p)),
			(None, None) => None,
		}
	}

	pub fn read(&self) -> Result<String> {
		match self {
			Self::Inline(t) => Ok(t.clone()),
			Self::File(p) => fs::read_to_string(p).with_context(|| format!("Failed to read news text: {}", p.display())),
			Self::Stdin => {
				let mut buf = String::new();
				std::io::stdin().read_to_string(&mut buf).context("Failed to read news text from stdin")?;
				Ok(buf)
			}
		}
	}
}

pub fn is_image(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Expand files and directories into image paths, keeping argument order.
///
/// Directory entries are sorted by file name. Duplicates (same canonical path) are kept
/// once, at their first position.
pub fn collect_paths(inputs: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
	let mut seen = HashSet::new();
	let mut paths = Vec::new();

	for input in inputs {
		if input.is_dir() {
			let skipped = walk_dir(input, recursive, &mut seen, &mut paths);
			if skipped > 0 {
				ui::debug(&format!("{} entries skipped under {}", skipped, input.display()));
			}
		} else if input.is_file() {
			if !is_image(input) {
				ui::debug(&format!("Not a recognised image extension, sending anyway: {}", input.display()));
			}
			push_unique(input, &mut seen, &mut paths);
		} else {
			ui::warn(&format!("Not found: {}", input.display()));
		}
	}

	paths
}

/// Add a directory's images to `paths`, returning how many entries could not be read
fn walk_dir(root: &Path, recursive: bool, seen: &mut HashSet<PathBuf>, paths: &mut Vec<PathBuf>) -> usize {
	let depth = if recursive { usize::MAX } else { 1 };
	let walker = WalkDir::new(root)
		.max_depth(depth)
		.follow_links(true)
		.sort_by_file_name()
		.into_iter()
		.filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

	let mut skipped = 0;
	for entry in walker {
		match entry {
			Ok(entry) => {
				let path = entry.path();
				if entry.file_type().is_file() && is_image(path) {
					push_unique(path, seen, paths);
				}
			}
			Err(e) => {
				skipped += 1;
				ui::warn(&format!("Skipped unreadable entry: {}", e));
			}
		}
	}

	skipped
}

/// Read every path into a payload, numbering uploads in order.
///
/// Unreadable files are skipped with a warning and do not consume an index.
pub fn load_images(paths: &[PathBuf]) -> Vec<ImagePayload> {
	let mut images = Vec::with_capacity(paths.len());

	for path in paths {
		match ImagePayload::load(images.len(), path) {
			Ok(payload) => {
				ui::debug(&format!("Loaded {} ({} bytes, {})", payload.name, payload.bytes.len(), payload.id.short()));
				images.push(payload);
			}
			Err(e) => ui::warn(&format!("{:#}", e)),
		}
	}

	images
}

fn push_unique(path: &Path, seen: &mut HashSet<PathBuf>, paths: &mut Vec<PathBuf>) {
	let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
	if seen.insert(canonical) {
		paths.push(path.to_path_buf());
	}
}

fn is_hidden(path: &Path) -> bool {
	path.file_name()
		.and_then(|n| n.to_str())
		.is_some_and(|n| n.starts_with('.'))
}
