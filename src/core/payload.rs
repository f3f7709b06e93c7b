//! Uploaded image payloads

use anyhow::{Context, Result};
use base64::Engine as _;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::ContentId;
use crate::config::DEFAULT_MIME;

/// One uploaded image, kept as opaque bytes
#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
	/// Position in upload order (0-based), used as the ranking tie-break
	pub index: usize,
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<PathBuf>,
	pub id: ContentId,
	#[serde(skip)]
	pub bytes: Vec<u8>,
}

impl ImagePayload {
	pub fn new(index: usize, name: impl Into<String>, bytes: Vec<u8>) -> Self {
		let id = ContentId::compute(&bytes);
		Self {
			index,
			name: name.into(),
			path: None,
			id,
			bytes,
		}
	}

	/// Read an image file from disk
	pub fn load(index: usize, path: &Path) -> Result<Self> {
		let bytes = fs::read(path).with_context(|| format!("Failed to read image: {}", path.display()))?;
		let name = path
			.file_name()
			.and_then(|n| n.to_str())
			.unwrap_or("unknown")
			.to_string();

		let mut payload = Self::new(index, name, bytes);
		payload.path = Some(path.to_path_buf());
		Ok(payload)
	}

	/// MIME type sniffed from magic bytes, `image/png` when unknown
	pub fn mime_type(&self) -> &'static str {
		image::guess_format(&self.bytes)
			.map(|f| f.to_mime_type())
			.unwrap_or(DEFAULT_MIME)
	}

	pub fn base64(&self) -> String {
		base64::engine::general_purpose::STANDARD.encode(&self.bytes)
	}

	pub fn data_url(&self) -> String {
		format!("data:{};base64,{}", self.mime_type(), self.base64())
	}
}
