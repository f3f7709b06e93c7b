//! newsframe - rank images by relevance to a news text
//!
//! Describes each image with a hosted multimodal model and ranks the images by
//! textual similarity between the news text and each description.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use newsframe::cli::{Cli, Command};
use newsframe::commands;
use newsframe::commands::rank::Output;
use newsframe::input::TextSource;
use newsframe::ui::{self, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);

	if let Err(e) = run(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(command: Command) -> Result<()> {
	match command {
		Command::Rank {
			images,
			text,
			text_file,
			recursive,
			limit,
			min_score,
			json,
			open,
			provider,
		} => {
			let output = Output { limit, min_score, json, open };
			commands::rank::run(
				&images,
				TextSource::from_args(text, text_file),
				recursive,
				output,
				&provider,
			)
		}
		Command::Describe { images, recursive, provider } => {
			commands::describe::run(&images, recursive, &provider)
		}
		Command::Compare { reference, candidate } => commands::compare::run(&reference, &candidate),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						ui::error(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
