//! Describe-then-rank driver with per-image fault isolation

use rayon::prelude::*;

use crate::core::{DescriptionUnavailable, ImagePayload, ItemWarning, RankError, RelevanceReport};
use crate::provider::{Conversation, DescriptionProvider, Turn};
use crate::ranking;

/// How provider calls are scheduled
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
	/// Worker threads for provider calls; 1 means strictly serial in upload order
	pub jobs: usize,
	/// Reuse one conversation across images (always serial)
	pub shared_context: bool,
}

impl Default for Schedule {
	fn default() -> Self {
		Self { jobs: 1, shared_context: false }
	}
}

/// Per-image events, delivered as they happen
pub enum Progress<'a> {
	Started { image: &'a ImagePayload, total: usize },
	Described { image: &'a ImagePayload, description: &'a str },
	Failed { image: &'a ImagePayload, error: &'a DescriptionUnavailable },
}

/// Outcome of describing a batch: successes in upload order plus warnings for failures
#[derive(Debug, Default)]
pub struct Descriptions {
	pub described: Vec<(ImagePayload, String)>,
	pub warnings: Vec<ItemWarning>,
}

/// Reject runs that cannot produce a report before any provider call is made
pub fn validate(reference: &str, images: &[ImagePayload]) -> Result<(), RankError> {
	if reference.trim().is_empty() {
		return Err(RankError::InvalidInput("news text is empty".into()));
	}
	if images.is_empty() {
		return Err(RankError::InvalidInput("no images provided".into()));
	}
	Ok(())
}

/// Describe every image (one call each) and rank the successes against `reference`
pub fn evaluate(
	reference: &str,
	images: Vec<ImagePayload>,
	provider: &dyn DescriptionProvider,
	schedule: Schedule,
	observer: &(dyn Fn(Progress<'_>) + Sync),
) -> Result<RelevanceReport, RankError> {
	validate(reference, &images)?;

	let Descriptions { described, warnings } = describe_all(images, provider, schedule, observer)?;
	Ok(ranking::rank(reference, described).with_warnings(warnings))
}

/// Describe every image, isolating failures per image
pub fn describe_all(
	images: Vec<ImagePayload>,
	provider: &dyn DescriptionProvider,
	schedule: Schedule,
	observer: &(dyn Fn(Progress<'_>) + Sync),
) -> Result<Descriptions, RankError> {
	let total = images.len();

	let describe_one = |image: &ImagePayload, history: &[Turn]| {
		observer(Progress::Started { image, total });
		let outcome = provider.describe(image, history);
		match &outcome {
			Ok(description) => observer(Progress::Described { image, description }),
			Err(error) => observer(Progress::Failed { image, error }),
		}
		outcome
	};

	let outcomes: Vec<(ImagePayload, Result<String, DescriptionUnavailable>)> = if schedule.shared_context {
		if schedule.jobs > 1 {
			crate::ui::debug("Shared context requires serial requests, ignoring --jobs");
		}
		let mut conversation = Conversation::new();
		images
			.into_iter()
			.map(|image| {
				let outcome = describe_one(&image, conversation.turns());
				if let Ok(description) = &outcome {
					conversation.record(&image.name, description);
				}
				(image, outcome)
			})
			.collect()
	} else if schedule.jobs > 1 {
		let pool = rayon::ThreadPoolBuilder::new()
			.num_threads(schedule.jobs)
			.build()
			.map_err(|e| RankError::Provider(format!("failed to start worker pool: {}", e)))?;
		pool.install(|| {
			images
				.into_par_iter()
				.map(|image| {
					let outcome = describe_one(&image, &[]);
					(image, outcome)
				})
				.collect()
		})
	} else {
		images
			.into_iter()
			.map(|image| {
				let outcome = describe_one(&image, &[]);
				(image, outcome)
			})
			.collect()
	};

	let mut result = Descriptions::default();
	for (image, outcome) in outcomes {
		match outcome {
			Ok(description) => result.described.push((image, description)),
			Err(error) => result.warnings.push(ItemWarning {
				index: image.index,
				name: image.name,
				reason: error.reason,
			}),
		}
	}

	Ok(result)
}
