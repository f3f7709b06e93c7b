//! # Command Implementations
//!
//! Each submodule handles one CLI command (rank, describe, compare).

pub mod compare;
pub mod describe;
pub mod rank;

use colored::*;

use crate::cli::ProviderArgs;
use crate::config::ProviderSettings;
use crate::pipeline::{Progress, Schedule};
use crate::ui;

impl ProviderArgs {
	pub fn settings(&self) -> ProviderSettings {
		ProviderSettings::resolve(
			self.provider,
			self.api_key.clone(),
			self.model.clone(),
			self.base_url.clone(),
			self.prompt.clone(),
			self.timeout_secs,
			self.shared_context,
		)
	}

	pub fn schedule(&self) -> Schedule {
		Schedule {
			jobs: self.jobs,
			shared_context: self.shared_context,
		}
	}
}

/// Per-image progress lines while descriptions come in
pub fn log_progress(progress: Progress<'_>) {
	match progress {
		Progress::Started { image, total } => {
			ui::debug(&format!("[{}/{}] Describing {}...", image.index + 1, total, image.name));
		}
		Progress::Described { image, description } => {
			let queue = format!("[{}]", image.index + 1).bright_blue().bold();
			let name = match &image.path {
				Some(path) => ui::path_link(path, 50),
				None => image.name.clone(),
			};
			ui::success(&format!("{} {} {}", queue, name, preview(description, 60).dimmed()));
		}
		Progress::Failed { image, error } => {
			let queue = format!("[{}]", image.index + 1).yellow().bold();
			ui::warn(&format!("{} {}: {}", queue, image.name, error.reason));
		}
	}
}

/// First line of a description, cut to `max` chars
fn preview(text: &str, max: usize) -> String {
	let line = text.lines().next().unwrap_or("");
	if line.chars().count() > max || text.lines().nth(1).is_some() {
		let cut: String = line.chars().take(max).collect();
		format!("{}…", cut.trim_end())
	} else {
		line.to_string()
	}
}
