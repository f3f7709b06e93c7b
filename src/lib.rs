//! # newsframe Library
//!
//! Ranks images by relevance to a news text. Each image is described once by a hosted
//! multimodal model, and the description is scored against the text with a lexical
//! similarity ratio.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod input;
pub mod pipeline;
pub mod provider;
pub mod ranking;
pub mod similarity;
pub mod ui;
