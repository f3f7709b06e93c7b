//! Error taxonomy for description retrieval and ranking runs

use thiserror::Error;

/// A single provider call failed (auth, network, service error, unusable reply).
///
/// Non-fatal: the image is dropped from the report and surfaced as a warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("description unavailable: {reason}")]
pub struct DescriptionUnavailable {
	pub reason: String,
}

impl DescriptionUnavailable {
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}
}

/// Fatal errors for a whole ranking run
#[derive(Error, Debug)]
pub enum RankError {
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("provider setup failed: {0}")]
	Provider(String),
}
