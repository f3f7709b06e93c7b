//! Rank command - describe images and order them by relevance to a news text

use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::ProviderArgs;
use crate::core::RankError;
use crate::input::{self, TextSource};
use crate::ui::{self, Log};
use crate::{pipeline, provider};

/// Presentation options applied after ranking
#[derive(Debug, Clone, Copy)]
pub struct Output {
	pub limit: Option<usize>,
	pub min_score: f64,
	pub json: bool,
	pub open: bool,
}

pub fn run(
	inputs: &[PathBuf],
	text: Option<TextSource>,
	recursive: bool,
	output: Output,
	args: &ProviderArgs,
) -> Result<()> {
	let start = Instant::now();
	Log::set_quiet_stdout(output.json);

	let Some(source) = text else {
		return Err(RankError::InvalidInput("news text required (--text or --text-file)".into()).into());
	};
	let reference = source.read()?;

	let paths = input::collect_paths(inputs, recursive);
	let images = input::load_images(&paths);
	pipeline::validate(&reference, &images)?;

	let settings = args.settings();
	let provider = provider::connect(&settings)?;

	let total = images.len();
	ui::info(&format!(
		"Ranking {} images against {} chars of news text with {} ({})",
		total,
		reference.chars().count(),
		provider.name(),
		settings.model
	));
	if settings.shared_context {
		ui::info("Shared context: each request sees earlier descriptions");
	}

	ui::header("Processing");
	let mut report = pipeline::evaluate(
		&reference,
		images,
		provider.as_ref(),
		args.schedule(),
		&super::log_progress,
	)?;

	let described = report.len();
	report.retain_min_score(output.min_score);
	if let Some(limit) = output.limit {
		report.truncate(limit);
	}

	if output.json {
		println!("{}", ui::report::to_json(&reference, &report)?);
		if let Some(notice) = ui::report::empty_notice(&report, described, output.min_score) {
			ui::warn(&notice);
		}
	} else {
		ui::report::render(&report, described, output.min_score);
	}

	ui::success(&format!(
		"Ranked {} of {} images in {:.1}s",
		described,
		total,
		start.elapsed().as_secs_f32()
	));
	if !report.warnings().is_empty() {
		ui::warn(&format!("{} images skipped (no description)", report.warnings().len()));
	}

	if output.open {
		if let Some(path) = report.top().and_then(|top| top.image.path.as_ref()) {
			ui::info(&format!("Opening: {}", path.display()));
			if let Err(e) = open::that(path) {
				ui::warn(&format!("Failed to open: {}", e));
			}
		}
	}

	Ok(())
}
