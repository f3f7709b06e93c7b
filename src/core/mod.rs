//! Core domain types

pub mod error;
pub mod hash;
pub mod payload;
pub mod report;

pub use error::{DescriptionUnavailable, RankError};
pub use hash::ContentId;
pub use payload::ImagePayload;
pub use report::{ItemWarning, RelevanceItem, RelevanceReport};
