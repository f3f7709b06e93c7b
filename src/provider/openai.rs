//! OpenAI-compatible chat completions provider (OpenAI, OpenRouter, Groq, Ollama, ...)

use reqwest::blocking::Client;
use serde_json::{json, Value};

use super::conversation::past_prompt;
use super::{non_empty, send_json, DescriptionProvider, Turn};
use crate::config::ProviderSettings;
use crate::core::{DescriptionUnavailable, ImagePayload};

pub struct OpenAiProvider {
	client: Client,
	url: String,
	api_key: Option<String>,
	model: String,
	prompt: String,
}

impl OpenAiProvider {
	pub fn new(client: Client, settings: &ProviderSettings) -> Self {
		Self {
			client,
			url: format!("{}/chat/completions", settings.base_url),
			api_key: settings.api_key.clone(),
			model: settings.model.clone(),
			prompt: settings.prompt.clone(),
		}
	}
}

impl DescriptionProvider for OpenAiProvider {
	fn name(&self) -> &str {
		"openai"
	}

	fn describe(&self, image: &ImagePayload, history: &[Turn]) -> Result<String, DescriptionUnavailable> {
		let body = request_body(&self.model, &self.prompt, image, history);
		let mut request = self.client.post(&self.url);
		if let Some(key) = self.api_key.as_deref() {
			request = request.bearer_auth(key);
		}
		let reply = send_json(request, &body)?;
		parse_reply(&reply)
	}
}

pub fn request_body(model: &str, prompt: &str, image: &ImagePayload, history: &[Turn]) -> Value {
	let mut messages: Vec<Value> = Vec::with_capacity(history.len() * 2 + 1);

	for turn in history {
		messages.push(json!({"role": "user", "content": past_prompt(prompt, turn)}));
		messages.push(json!({"role": "assistant", "content": turn.reply}));
	}

	messages.push(json!({
		"role": "user",
		"content": [
			{"type": "text", "text": prompt},
			{"type": "image_url", "image_url": {"url": image.data_url()}}
		]
	}));

	json!({
		"model": model,
		"messages": messages,
		"temperature": 0.2
	})
}

/// `choices[0].message.content`, either a string or a list of text parts
pub fn parse_reply(reply: &Value) -> Result<String, DescriptionUnavailable> {
	if let Some(message) = reply.pointer("/error/message").and_then(|m| m.as_str()) {
		return Err(DescriptionUnavailable::new(format!("service error: {}", message)));
	}

	let content = reply
		.pointer("/choices/0/message/content")
		.ok_or_else(|| DescriptionUnavailable::new("no description in response"))?;

	let text = match content {
		Value::String(s) => s.clone(),
		Value::Array(parts) => parts
			.iter()
			.filter_map(|p| p.get("text").and_then(|t| t.as_str()))
			.collect(),
		_ => return Err(DescriptionUnavailable::new("unexpected content type in response")),
	};

	non_empty(text)
}
