//! Relevance ranking of described images against a reference text

use crate::core::{ImagePayload, RelevanceItem, RelevanceReport};
use crate::similarity;

/// Score every (image, description) pair against `reference` and order by score.
///
/// Pure and deterministic. Equal scores keep upload order (`ImagePayload::index`), so a
/// report built from out-of-order input matches the serial one.
pub fn rank(reference: &str, described: Vec<(ImagePayload, String)>) -> RelevanceReport {
	let mut items: Vec<RelevanceItem> = described
		.into_iter()
		.map(|(image, description)| {
			let score = similarity::ratio(reference, &description);
			RelevanceItem { image, description, score }
		})
		.collect();

	items.sort_by(|a, b| {
		b.score
			.total_cmp(&a.score)
			.then_with(|| a.image.index.cmp(&b.image.index))
	});

	RelevanceReport::from_ranked(items)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn described(texts: &[&str]) -> Vec<(ImagePayload, String)> {
		texts
			.iter()
			.enumerate()
			.map(|(i, t)| (ImagePayload::new(i, format!("img{}.png", i), vec![i as u8]), t.to_string()))
			.collect()
	}

	fn order(report: &RelevanceReport) -> Vec<usize> {
		report.items().iter().map(|item| item.image.index).collect()
	}

	#[test]
	fn identical_description_scores_one() {
		let report = rank("a flooded street", described(&["a flooded street"]));
		assert_eq!(report.len(), 1);
		assert_eq!(report.items()[0].score, 1.0);
	}

	#[test]
	fn disjoint_description_scores_zero() {
		let report = rank("abc", described(&["xyz"]));
		assert_eq!(report.items()[0].score, 0.0);
	}

	#[test]
	fn empty_input_gives_empty_report() {
		let report = rank("anything", Vec::new());
		assert!(report.is_empty());
		assert!(report.warnings().is_empty());
	}

	#[test]
	fn empty_reference_does_not_panic() {
		let report = rank("", described(&["a boat", ""]));
		assert_eq!(report.items()[0].score, 1.0);
		assert_eq!(report.items()[0].image.index, 1);
		assert_eq!(report.items()[1].score, 0.0);
	}

	#[test]
	fn cat_example_orders_exact_then_partial_then_unrelated() {
		let report = rank(
			"cat sitting on a mat",
			described(&["a cat sits on a mat", "a dog runs in a field", "cat sitting on a mat"]),
		);

		assert_eq!(order(&report), vec![2, 0, 1]);
		assert_eq!(report.items()[0].score, 1.0);
		assert!((report.items()[1].score - 0.8205).abs() < 1e-3);
		assert!((report.items()[2].score - 0.3902).abs() < 1e-3);
	}

	#[test]
	fn ties_keep_upload_order() {
		let report = rank("xyz", described(&["first", "same", "last", "xyz"]));
		assert_eq!(order(&report), vec![3, 0, 1, 2]);
	}

	#[test]
	fn ties_keep_upload_order_for_shuffled_input() {
		let mut input = described(&["abc", "abc", "abc"]);
		input.reverse();
		let report = rank("ab", input);
		assert_eq!(order(&report), vec![0, 1, 2]);
	}

	#[test]
	fn ranking_is_deterministic() {
		let texts = ["a storm over the harbour", "boats in a harbour", "a quiet field"];
		let first = rank("storm hits harbour", described(&texts));
		let second = rank("storm hits harbour", described(&texts));

		let bits = |r: &RelevanceReport| r.items().iter().map(|i| (i.image.index, i.score.to_bits())).collect::<Vec<_>>();
		assert_eq!(bits(&first), bits(&second));
	}

	#[test]
	fn scores_stay_in_unit_range() {
		let report = rank(
			"Officials confirmed the bridge closure on Monday",
			described(&["a bridge", "", "Officials confirmed the bridge closure on Monday!!", "🌉"]),
		);
		assert!(report.items().iter().all(|i| (0.0..=1.0).contains(&i.score)));
	}
}
