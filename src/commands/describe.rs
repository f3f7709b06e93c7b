//! Describe command - generate descriptions without ranking

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::ProviderArgs;
use crate::core::RankError;
use crate::{input, pipeline, provider, ui};

pub fn run(inputs: &[PathBuf], recursive: bool, args: &ProviderArgs) -> Result<()> {
	let start = Instant::now();

	let paths = input::collect_paths(inputs, recursive);
	let images = input::load_images(&paths);
	if images.is_empty() {
		return Err(RankError::InvalidInput("no images provided".into()).into());
	}

	let settings = args.settings();
	let provider = provider::connect(&settings)?;
	ui::info(&format!("Describing {} images with {} ({})", images.len(), provider.name(), settings.model));

	ui::header("Processing");
	let result = pipeline::describe_all(images, provider.as_ref(), args.schedule(), &super::log_progress)?;

	ui::header("Descriptions");
	for (image, description) in &result.described {
		println!("{} {}", format!("{:2}.", image.index + 1).bright_blue().bold(), image.name.bright_white());
		println!("    {}", description.replace('\n', "\n    ").dimmed());
	}
	println!();

	ui::success(&format!(
		"Described {} images in {:.1}s",
		result.described.len(),
		start.elapsed().as_secs_f32()
	));
	if !result.warnings.is_empty() {
		ui::warn(&format!("{} images could not be described", result.warnings.len()));
	}

	Ok(())
}
