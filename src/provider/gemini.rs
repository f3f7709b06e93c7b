//! Gemini `generateContent` provider

use reqwest::blocking::Client;
use serde_json::{json, Value};

use super::conversation::past_prompt;
use super::{non_empty, send_json, DescriptionProvider, Turn};
use crate::config::ProviderSettings;
use crate::core::{DescriptionUnavailable, ImagePayload};

pub struct GeminiProvider {
	client: Client,
	url: String,
	api_key: String,
	prompt: String,
}

impl GeminiProvider {
	pub fn new(client: Client, settings: &ProviderSettings) -> Self {
		Self {
			client,
			url: format!("{}/models/{}:generateContent", settings.base_url, settings.model),
			api_key: settings.api_key.clone().unwrap_or_default(),
			prompt: settings.prompt.clone(),
		}
	}
}

impl DescriptionProvider for GeminiProvider {
	fn name(&self) -> &str {
		"gemini"
	}

	fn describe(&self, image: &ImagePayload, history: &[Turn]) -> Result<String, DescriptionUnavailable> {
		let body = request_body(&self.prompt, image, history);
		let request = self.client.post(&self.url).header("x-goog-api-key", &self.api_key);
		let reply = send_json(request, &body)?;
		parse_reply(&reply)
	}
}

pub fn request_body(prompt: &str, image: &ImagePayload, history: &[Turn]) -> Value {
	let mut contents: Vec<Value> = Vec::with_capacity(history.len() * 2 + 1);

	for turn in history {
		contents.push(json!({"role": "user", "parts": [{"text": past_prompt(prompt, turn)}]}));
		contents.push(json!({"role": "model", "parts": [{"text": turn.reply}]}));
	}

	contents.push(json!({
		"role": "user",
		"parts": [
			{"text": prompt},
			{"inline_data": {"mime_type": image.mime_type(), "data": image.base64()}}
		]
	}));

	json!({ "contents": contents })
}

/// Join all text parts of the first candidate
pub fn parse_reply(reply: &Value) -> Result<String, DescriptionUnavailable> {
	if let Some(reason) = reply.pointer("/promptFeedback/blockReason").and_then(|r| r.as_str()) {
		return Err(DescriptionUnavailable::new(format!("prompt blocked: {}", reason)));
	}

	let parts = reply
		.pointer("/candidates/0/content/parts")
		.and_then(|p| p.as_array())
		.ok_or_else(|| {
			let finish = reply
				.pointer("/candidates/0/finishReason")
				.and_then(|r| r.as_str())
				.unwrap_or("no candidates");
			DescriptionUnavailable::new(format!("no description in response ({})", finish))
		})?;

	let text: String = parts
		.iter()
		.filter_map(|p| p.get("text").and_then(|t| t.as_str()))
		.collect();

	non_empty(text)
}
