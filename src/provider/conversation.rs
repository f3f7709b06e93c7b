//! Shared chat history for the `--shared-context` mode

/// One completed exchange: which image was asked about and what came back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
	pub image_name: String,
	pub reply: String,
}

/// History reused across images. Only successful replies are recorded.
#[derive(Debug, Default)]
pub struct Conversation {
	turns: Vec<Turn>,
}

impl Conversation {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn turns(&self) -> &[Turn] {
		&self.turns
	}

	pub fn record(&mut self, image_name: &str, reply: &str) {
		self.turns.push(Turn {
			image_name: image_name.to_string(),
			reply: reply.to_string(),
		});
	}
}

/// User-side text for a past turn (the image itself is not resent)
pub(crate) fn past_prompt(prompt: &str, turn: &Turn) -> String {
	format!("{} [image: {}]", prompt, turn.image_name)
}
