//! Compare command - similarity of two texts

use anyhow::Result;

use crate::similarity;
use crate::ui;
use crate::ui::report::format_score;

pub fn run(reference: &str, candidate: &str) -> Result<()> {
	let score = similarity::ratio(reference, candidate);
	ui::debug(&format!(
		"Compared {} vs {} chars",
		reference.chars().count(),
		candidate.chars().count()
	));
	ui::success(&format!("Similarity: {}", format_score(score)));
	Ok(())
}
