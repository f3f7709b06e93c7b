use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DEFAULT_TIMEOUT_SECS;

/// Hosted multimodal chat service used to describe images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
	/// Google Gemini (generateContent API)
	#[default]
	Gemini,
	/// OpenAI-compatible chat completions (OpenAI, OpenRouter, Groq, Ollama, ...)
	Openai,
}

impl ProviderKind {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Gemini => "gemini",
			Self::Openai => "openai",
		}
	}
}

fn parse_score(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !(0.0..=1.0).contains(&val) {
		Err(format!("score must be between 0.0 and 1.0, got {}", val))
	} else {
		Ok(val)
	}
}

fn parse_jobs(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid count", s))?;
	if val == 0 {
		Err("jobs must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "newsframe",
	author,
	version,
	about = "Rank images by relevance to a news text",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {rank}      {rank_args}   {rank_desc}
  {bin} {rank}      {rank_file_args}     {rank_file_desc}
  {bin} {describe}  {describe_args}              {describe_desc}
  {bin} {compare}   {compare_args}          {compare_desc}
  {bin} {help}      {help_args}                    {help_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "newsframe".bright_blue(),
		rank = "rank".yellow(),
		rank_args = "-t \"Storm floods harbour\" ./photos/",
		rank_desc = "Rank a folder of images".dimmed(),
		rank_file_args = "-f article.txt a.jpg b.png --json",
		rank_file_desc = "JSON report".dimmed(),
		describe = "describe".yellow(),
		describe_args = "./photos/ -r",
		describe_desc = "Only describe images".dimmed(),
		compare = "compare".yellow(),
		compare_args = "\"a cat\" \"the cat\"",
		compare_desc = "Similarity of two texts".dimmed(),
		help = "help".yellow(),
		help_args = "rank",
		help_desc = "Show help for rank".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Options shared by every command that calls a description provider
#[derive(Args, Debug, Clone)]
pub struct ProviderArgs {
	/// Description provider
	#[arg(short = 'p', long = "provider", default_value = "gemini")]
	pub provider: ProviderKind,

	/// Model name (default depends on provider, or NEWSFRAME_MODEL)
	#[arg(short = 'm', long = "model")]
	pub model: Option<String>,

	/// API key (or NEWSFRAME_API_KEY / GEMINI_API_KEY / OPENAI_API_KEY)
	#[arg(long = "api-key")]
	pub api_key: Option<String>,

	/// Override the service base URL (or NEWSFRAME_BASE_URL)
	#[arg(long = "base-url", value_name = "URL")]
	pub base_url: Option<String>,

	/// Prompt sent with every image
	#[arg(long = "prompt")]
	pub prompt: Option<String>,

	/// Per-request timeout in seconds
	#[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
	pub timeout_secs: u64,

	/// Concurrent provider requests (1 = serial, in upload order)
	#[arg(short = 'j', long = "jobs", default_value_t = 1, value_parser = parse_jobs)]
	pub jobs: usize,

	/// Reuse one chat conversation across images instead of independent requests
	#[arg(long = "shared-context")]
	pub shared_context: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Describe images and rank them by similarity to a news text
	Rank {
		/// Image files or directories, in upload order
		#[arg(value_name = "IMAGES", required = true)]
		images: Vec<PathBuf>,

		/// News text
		#[arg(short = 't', long = "text", conflicts_with = "text_file")]
		text: Option<String>,

		/// Read news text from a file ('-' for stdin)
		#[arg(short = 'f', long = "text-file", value_name = "PATH")]
		text_file: Option<PathBuf>,

		/// Scan directories recursively
		#[arg(short = 'r', long = "recursive")]
		recursive: bool,

		/// Number of results to show (default: all)
		#[arg(short = 'n', long = "limit")]
		limit: Option<usize>,

		/// Minimum similarity score (0.0-1.0)
		#[arg(short = 's', long = "score", default_value_t = 0.0, value_parser = parse_score)]
		min_score: f64,

		/// Print the report as JSON on stdout
		#[arg(long = "json")]
		json: bool,

		/// Open best match in default viewer
		#[arg(short = 'o', long = "open")]
		open: bool,

		#[command(flatten)]
		provider: ProviderArgs,
	},

	/// Describe images without ranking
	Describe {
		/// Image files or directories
		#[arg(value_name = "IMAGES", required = true)]
		images: Vec<PathBuf>,

		/// Scan directories recursively
		#[arg(short = 'r', long = "recursive")]
		recursive: bool,

		#[command(flatten)]
		provider: ProviderArgs,
	},

	/// Similarity score of two texts (no provider needed)
	Compare {
		/// Reference text
		reference: String,

		/// Text to compare against the reference
		candidate: String,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn rank_parses_defaults() {
		let cli = Cli::try_parse_from(["newsframe", "rank", "-t", "storm", "a.png", "b.png"]).unwrap();
		let Command::Rank { images, text, min_score, limit, provider, .. } = cli.command else {
			panic!("expected rank");
		};
		assert_eq!(images.len(), 2);
		assert_eq!(text.as_deref(), Some("storm"));
		assert_eq!(min_score, 0.0);
		assert!(limit.is_none());
		assert_eq!(provider.provider, ProviderKind::Gemini);
		assert_eq!(provider.jobs, 1);
		assert_eq!(provider.timeout_secs, DEFAULT_TIMEOUT_SECS);
		assert!(!provider.shared_context);
	}

	#[test]
	fn text_and_text_file_conflict() {
		assert!(Cli::try_parse_from(["newsframe", "rank", "-t", "x", "-f", "n.txt", "a.png"]).is_err());
	}

	#[test]
	fn out_of_range_values_are_rejected() {
		assert!(Cli::try_parse_from(["newsframe", "rank", "-t", "x", "-s", "1.5", "a.png"]).is_err());
		assert!(Cli::try_parse_from(["newsframe", "rank", "-t", "x", "-j", "0", "a.png"]).is_err());
	}

	#[test]
	fn rank_requires_images() {
		assert!(Cli::try_parse_from(["newsframe", "rank", "-t", "x"]).is_err());
	}
}
