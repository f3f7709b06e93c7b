//! Ranked results of one evaluation run

use serde::Serialize;

use super::ImagePayload;

/// One successfully described and scored image
#[derive(Debug, Clone, Serialize)]
pub struct RelevanceItem {
	#[serde(flatten)]
	pub image: ImagePayload,
	pub description: String,
	pub score: f64,
}

/// An image that was dropped because its description could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemWarning {
	pub index: usize,
	pub name: String,
	pub reason: String,
}

/// Items sorted by score descending, ties in upload order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelevanceReport {
	items: Vec<RelevanceItem>,
	warnings: Vec<ItemWarning>,
}

impl RelevanceReport {
	/// Callers must pass items already in ranked order
	pub(crate) fn from_ranked(items: Vec<RelevanceItem>) -> Self {
		Self { items, warnings: Vec::new() }
	}

	pub fn with_warnings(mut self, mut warnings: Vec<ItemWarning>) -> Self {
		warnings.sort_by_key(|w| w.index);
		self.warnings = warnings;
		self
	}

	pub fn items(&self) -> &[RelevanceItem] {
		&self.items
	}

	pub fn warnings(&self) -> &[ItemWarning] {
		&self.warnings
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn top(&self) -> Option<&RelevanceItem> {
		self.items.first()
	}

	/// Drop items scoring below `min_score`; order is untouched
	pub fn retain_min_score(&mut self, min_score: f64) {
		self.items.retain(|item| item.score >= min_score);
	}

	pub fn truncate(&mut self, limit: usize) {
		self.items.truncate(limit);
	}
}
