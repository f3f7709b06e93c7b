//! Rendering a relevance report

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use crate::config::LOW_SCORE_HINT;
use crate::core::{RelevanceItem, RelevanceReport};

/// Score with two decimals, as shown next to each image
pub fn format_score(score: f64) -> String {
	format!("{:.2}", score)
}

fn display_name(item: &RelevanceItem) -> String {
	match &item.image.path {
		Some(path) => super::path_link(path, 50),
		None => item.image.name.clone(),
	}
}

/// Why the ranked list is empty, given how many images were described before filtering
pub fn empty_notice(report: &RelevanceReport, described: usize, min_score: f64) -> Option<String> {
	if !report.is_empty() {
		return None;
	}
	if described == 0 {
		return Some("No images could be ranked".to_string());
	}
	Some(format!(
		"All {} described images fell below the minimum score ({})",
		described,
		format_score(min_score)
	))
}

/// Ranked list with descriptions, followed by dropped images
pub fn render(report: &RelevanceReport, described: usize, min_score: f64) {
	super::header("Relevant Images");

	if let Some(notice) = empty_notice(report, described, min_score) {
		super::warn(&notice);
	}

	for (i, item) in report.items().iter().enumerate() {
		println!(
			"{} {} {}",
			format!("{:2}.", i + 1).bright_blue().bold(),
			display_name(item).bright_white(),
			format!("(similarity: {})", format_score(item.score)).dimmed(),
		);
		println!("    {}", item.description.replace('\n', "\n    ").dimmed());
	}

	if !report.warnings().is_empty() {
		super::header("Skipped");
		for warning in report.warnings() {
			println!(
				"{} {} {}",
				format!("#{}", warning.index + 1).yellow().bold(),
				warning.name.bright_white(),
				warning.reason.dimmed()
			);
		}
	}

	println!();

	if let Some(top) = report.top() {
		if top.score < LOW_SCORE_HINT {
			super::warn(&format!("Top result has low similarity (<{})", format_score(LOW_SCORE_HINT)));
			println!("  {} Similarity is lexical: it rewards shared wording, not shared meaning.", "💡".bright_blue().bold());
			println!("     • Try a --prompt that asks for the vocabulary your news text uses");
			println!("     • Trim boilerplate from the news text so the key nouns dominate");
			println!();
		}
	}
}

#[derive(Serialize)]
struct JsonReport<'a> {
	version: &'static str,
	reference_chars: usize,
	#[serde(flatten)]
	report: &'a RelevanceReport,
}

/// Machine-readable report for `--json`
pub fn to_json(reference: &str, report: &RelevanceReport) -> Result<String> {
	let doc = JsonReport {
		version: env!("CARGO_PKG_VERSION"),
		reference_chars: reference.chars().count(),
		report,
	};
	serde_json::to_string_pretty(&doc).context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{ImagePayload, ItemWarning};
	use crate::ranking::rank;

	#[test]
	fn scores_use_two_decimals() {
		assert_eq!(format_score(1.0), "1.00");
		assert_eq!(format_score(0.8205128205128205), "0.82");
		assert_eq!(format_score(0.0), "0.00");
	}

	#[test]
	fn json_lists_items_in_rank_order_with_warnings() {
		let described = vec![
			(ImagePayload::new(0, "dog.png", vec![1]), "a dog runs in a field".to_string()),
			(ImagePayload::new(2, "cat.png", vec![3]), "cat sitting on a mat".to_string()),
		];
		let report = rank("cat sitting on a mat", described).with_warnings(vec![ItemWarning {
			index: 1,
			name: "broken.png".into(),
			reason: "request timed out".into(),
		}]);

		let json = to_json("cat sitting on a mat", &report).unwrap();
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();

		assert_eq!(value["reference_chars"], 20);
		assert_eq!(value["items"][0]["name"], "cat.png");
		assert_eq!(value["items"][0]["index"], 2);
		assert_eq!(value["items"][0]["score"], 1.0);
		assert_eq!(value["items"][1]["description"], "a dog runs in a field");
		assert!(value["items"][0].get("bytes").is_none());
		assert_eq!(value["warnings"][0]["name"], "broken.png");
	}

	#[test]
	fn empty_report_names_the_score_filter() {
		let described = vec![(ImagePayload::new(0, "dog.png", vec![1]), "a dog runs in a field".to_string())];
		let mut report = rank("cat sitting on a mat", described);
		assert_eq!(empty_notice(&report, 1, 0.9), None);

		report.retain_min_score(0.9);
		let notice = empty_notice(&report, 1, 0.9).unwrap();
		assert!(notice.contains("below the minimum score (0.90)"), "{}", notice);
	}

	#[test]
	fn empty_report_without_descriptions() {
		let report = rank("cat sitting on a mat", Vec::new()).with_warnings(vec![ItemWarning {
			index: 0,
			name: "broken.png".into(),
			reason: "request timed out".into(),
		}]);
		assert_eq!(empty_notice(&report, 0, 0.0).as_deref(), Some("No images could be ranked"));
	}
}
