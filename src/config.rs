//! Application configuration and constants

use std::time::Duration;

use crate::cli::ProviderKind;

// === Provider Defaults ===
pub const DEFAULT_PROMPT: &str = "Describe the following image.";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MIME: &str = "image/png";

// === Environment ===
pub const ENV_API_KEY: &str = "NEWSFRAME_API_KEY";
pub const ENV_GEMINI_KEY: &str = "GEMINI_API_KEY";
pub const ENV_OPENAI_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "NEWSFRAME_MODEL";
pub const ENV_BASE_URL: &str = "NEWSFRAME_BASE_URL";

// === File Extensions ===
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif"];

// === Report ===
pub const ERROR_BODY_PREVIEW: usize = 200;
pub const LOW_SCORE_HINT: f64 = 0.10;

/// Resolved settings for one description provider session
#[derive(Debug, Clone)]
pub struct ProviderSettings {
	pub kind: ProviderKind,
	pub api_key: Option<String>,
	pub model: String,
	pub base_url: String,
	pub prompt: String,
	pub timeout: Duration,
	pub shared_context: bool,
}

impl ProviderSettings {
	/// Resolve settings: explicit flags win, then environment, then built-in defaults
	pub fn resolve(
		kind: ProviderKind,
		api_key: Option<String>,
		model: Option<String>,
		base_url: Option<String>,
		prompt: Option<String>,
		timeout_secs: u64,
		shared_context: bool,
	) -> Self {
		let api_key = api_key.or_else(|| env_key(kind));
		let model = model
			.or_else(|| env_non_empty(ENV_MODEL))
			.unwrap_or_else(|| default_model(kind).to_string());
		let base_url = base_url
			.or_else(|| env_non_empty(ENV_BASE_URL))
			.unwrap_or_else(|| default_base_url(kind).to_string());

		Self {
			kind,
			api_key,
			model,
			base_url: base_url.trim_end_matches('/').to_string(),
			prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
			timeout: Duration::from_secs(timeout_secs.max(1)),
			shared_context,
		}
	}
}

pub fn default_model(kind: ProviderKind) -> &'static str {
	match kind {
		ProviderKind::Gemini => DEFAULT_GEMINI_MODEL,
		ProviderKind::Openai => DEFAULT_OPENAI_MODEL,
	}
}

pub fn default_base_url(kind: ProviderKind) -> &'static str {
	match kind {
		ProviderKind::Gemini => GEMINI_BASE_URL,
		ProviderKind::Openai => OPENAI_BASE_URL,
	}
}

/// API key lookup: NEWSFRAME_API_KEY first, then the vendor-specific variable
fn env_key(kind: ProviderKind) -> Option<String> {
	if let Some(key) = env_non_empty(ENV_API_KEY) {
		crate::ui::debug(&format!("Using API key from {}", ENV_API_KEY));
		return Some(key);
	}

	let vendor = match kind {
		ProviderKind::Gemini => ENV_GEMINI_KEY,
		ProviderKind::Openai => ENV_OPENAI_KEY,
	};
	let key = env_non_empty(vendor);
	if key.is_some() {
		crate::ui::debug(&format!("Using API key from {}", vendor));
	}
	key
}

fn env_non_empty(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
