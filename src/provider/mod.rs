//! # Description Providers
//!
//! Hosted multimodal chat services that turn one image into a text description.
//! Every image gets exactly one call; failures are returned, never retried.

pub mod conversation;
pub mod gemini;
pub mod openai;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use crate::cli::ProviderKind;
use crate::config::{ProviderSettings, ERROR_BODY_PREVIEW, OPENAI_BASE_URL};
use crate::core::{DescriptionUnavailable, ImagePayload, RankError};

pub use conversation::{Conversation, Turn};
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Turns an image into a natural-language description.
///
/// `history` holds earlier turns when a shared conversation is in use and is empty for
/// independent requests.
pub trait DescriptionProvider: Send + Sync {
	fn name(&self) -> &str;

	fn describe(&self, image: &ImagePayload, history: &[Turn]) -> Result<String, DescriptionUnavailable>;
}

/// Build the provider for a run. The HTTP client lives as long as the returned handle.
pub fn connect(settings: &ProviderSettings) -> Result<Box<dyn DescriptionProvider>, RankError> {
	let needs_key = match settings.kind {
		ProviderKind::Gemini => true,
		ProviderKind::Openai => settings.base_url == OPENAI_BASE_URL,
	};
	if needs_key && settings.api_key.is_none() {
		return Err(RankError::Provider(format!(
			"no API key for {} (use --api-key or set {})",
			settings.kind.label(),
			crate::config::ENV_API_KEY
		)));
	}

	let client = Client::builder()
		.timeout(settings.timeout)
		.user_agent(concat!("newsframe/", env!("CARGO_PKG_VERSION")))
		.build()
		.map_err(|e| RankError::Provider(format!("failed to build HTTP client: {}", e)))?;

	crate::ui::debug(&format!(
		"Provider: {} model={} base={} timeout={}s",
		settings.kind.label(),
		settings.model,
		settings.base_url,
		settings.timeout.as_secs()
	));

	Ok(match settings.kind {
		ProviderKind::Gemini => Box::new(GeminiProvider::new(client, settings)),
		ProviderKind::Openai => Box::new(OpenAiProvider::new(client, settings)),
	})
}

/// Send a JSON request and return the parsed JSON reply, mapping every failure
fn send_json(request: RequestBuilder, body: &Value) -> Result<Value, DescriptionUnavailable> {
	let response = request.json(body).send().map_err(|e| {
		if e.is_timeout() {
			DescriptionUnavailable::new("request timed out")
		} else {
			DescriptionUnavailable::new(format!("request failed: {}", e))
		}
	})?;

	let status = response.status();
	if !status.is_success() {
		let text = response.text().unwrap_or_default();
		return Err(DescriptionUnavailable::new(format!(
			"service returned {}: {}",
			status,
			preview(&text)
		)));
	}

	response
		.json::<Value>()
		.map_err(|e| DescriptionUnavailable::new(format!("unreadable response: {}", e)))
}

/// First `ERROR_BODY_PREVIEW` chars of an error body, on one line
fn preview(text: &str) -> String {
	let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
	if flat.chars().count() > ERROR_BODY_PREVIEW {
		let cut: String = flat.chars().take(ERROR_BODY_PREVIEW).collect();
		format!("{}...", cut)
	} else {
		flat
	}
}

/// Reject blank replies so they never reach the ranker as empty descriptions
fn non_empty(text: String) -> Result<String, DescriptionUnavailable> {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		Err(DescriptionUnavailable::new("service returned an empty description"))
	} else {
		Ok(trimmed.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	fn settings(kind: ProviderKind, api_key: Option<&str>, base_url: &str) -> ProviderSettings {
		ProviderSettings {
			kind,
			api_key: api_key.map(String::from),
			model: "test-model".into(),
			base_url: base_url.into(),
			prompt: "Describe".into(),
			timeout: Duration::from_secs(3),
			shared_context: false,
		}
	}

	#[test]
	fn gemini_without_key_is_rejected() {
		let err = connect(&settings(ProviderKind::Gemini, None, crate::config::GEMINI_BASE_URL)).err().unwrap();
		assert!(matches!(err, RankError::Provider(_)));
	}

	#[test]
	fn local_openai_compatible_server_needs_no_key() {
		let provider = connect(&settings(ProviderKind::Openai, None, "http://localhost:11434/v1")).unwrap();
		assert_eq!(provider.name(), "openai");
	}

	#[test]
	fn hosted_openai_needs_key() {
		assert!(connect(&settings(ProviderKind::Openai, None, OPENAI_BASE_URL)).is_err());
		assert!(connect(&settings(ProviderKind::Openai, Some("sk"), OPENAI_BASE_URL)).is_ok());
	}

	#[test]
	fn preview_flattens_and_truncates() {
		assert_eq!(preview("bad\n  request"), "bad request");
		let long = "x".repeat(ERROR_BODY_PREVIEW + 10);
		let shown = preview(&long);
		assert!(shown.ends_with("..."));
		assert_eq!(shown.chars().count(), ERROR_BODY_PREVIEW + 3);
	}

	/// Accept `replies.len()` connections on a local port, answer each with the next reply
	/// after `delay`, and hand back the raw requests
	fn serve(replies: Vec<String>, delay: Duration) -> (String, std::thread::JoinHandle<Vec<String>>) {
		use std::io::{Read, Write};

		let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
		let base = format!("http://{}/v1", listener.local_addr().unwrap());

		let handle = std::thread::spawn(move || {
			let mut requests = Vec::new();
			for reply in replies {
				let (mut stream, _) = listener.accept().unwrap();
				let mut raw = Vec::new();
				let mut buf = [0u8; 4096];
				loop {
					let n = stream.read(&mut buf).unwrap_or(0);
					if n == 0 {
						break;
					}
					raw.extend_from_slice(&buf[..n]);
					let text = String::from_utf8_lossy(&raw);
					if let Some(end) = text.find("\r\n\r\n") {
						let length = text[..end]
							.lines()
							.find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
							.and_then(|v| v.parse::<usize>().ok())
							.unwrap_or(0);
						if raw.len() >= end + 4 + length {
							break;
						}
					}
				}
				requests.push(String::from_utf8_lossy(&raw).to_string());
				std::thread::sleep(delay);
				let _ = stream.write_all(reply.as_bytes());
				let _ = stream.flush();
			}
			requests
		});

		(base, handle)
	}

	fn http(status: &str, body: &str) -> String {
		format!(
			"HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			body.len(),
			body
		)
	}

	fn image() -> ImagePayload {
		ImagePayload::new(0, "cat.png", b"\x89PNG\r\n\x1a\n".to_vec())
	}

	#[test]
	fn openai_describe_over_http() {
		let (base, server) = serve(
			vec![http("200 OK", r#"{"choices":[{"message":{"content":"a cat"}}]}"#)],
			Duration::ZERO,
		);
		let provider = connect(&settings(ProviderKind::Openai, Some("sk-test"), &base)).unwrap();

		assert_eq!(provider.describe(&image(), &[]).unwrap(), "a cat");

		let requests = server.join().unwrap();
		assert!(requests[0].starts_with("POST /v1/chat/completions"));
		assert!(requests[0].to_ascii_lowercase().contains("authorization: bearer sk-test"));
		assert!(requests[0].contains("data:image/png;base64,"));
	}

	#[test]
	fn gemini_describe_over_http() {
		let (base, server) = serve(
			vec![http("200 OK", r#"{"candidates":[{"content":{"parts":[{"text":"a harbour"}]}}]}"#)],
			Duration::ZERO,
		);
		let provider = connect(&settings(ProviderKind::Gemini, Some("g-key"), &base)).unwrap();

		assert_eq!(provider.describe(&image(), &[]).unwrap(), "a harbour");

		let requests = server.join().unwrap();
		assert!(requests[0].starts_with("POST /v1/models/test-model:generateContent"));
		assert!(requests[0].to_ascii_lowercase().contains("x-goog-api-key: g-key"));
	}

	#[test]
	fn error_status_carries_status_and_body() {
		let (base, server) = serve(
			vec![http("503 Service Unavailable", r#"{"error":"busy"}"#)],
			Duration::ZERO,
		);
		let provider = connect(&settings(ProviderKind::Openai, Some("sk"), &base)).unwrap();

		let err = provider.describe(&image(), &[]).unwrap_err();
		assert!(err.reason.contains("503"), "{}", err.reason);
		assert!(err.reason.contains("busy"), "{}", err.reason);
		server.join().unwrap();
	}

	#[test]
	fn non_json_body_is_unreadable() {
		let (base, server) = serve(vec![http("200 OK", "<html>oops</html>")], Duration::ZERO);
		let provider = connect(&settings(ProviderKind::Openai, Some("sk"), &base)).unwrap();

		let err = provider.describe(&image(), &[]).unwrap_err();
		assert!(err.reason.starts_with("unreadable response"), "{}", err.reason);
		server.join().unwrap();
	}

	#[test]
	fn slow_reply_times_out() {
		let (base, server) = serve(
			vec![http("200 OK", r#"{"choices":[{"message":{"content":"late"}}]}"#)],
			Duration::from_millis(1500),
		);
		let mut slow = settings(ProviderKind::Openai, Some("sk"), &base);
		slow.timeout = Duration::from_millis(300);
		let provider = connect(&slow).unwrap();

		let err = provider.describe(&image(), &[]).unwrap_err();
		assert_eq!(err.reason, "request timed out");
		server.join().unwrap();
	}

	#[test]
	fn refused_connection_is_request_failure() {
		let port = {
			let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
			listener.local_addr().unwrap().port()
		};
		let base = format!("http://127.0.0.1:{}/v1", port);
		let provider = connect(&settings(ProviderKind::Openai, Some("sk"), &base)).unwrap();

		let err = provider.describe(&image(), &[]).unwrap_err();
		assert!(err.reason.starts_with("request failed"), "{}", err.reason);
	}

	#[test]
	fn blank_reply_is_unavailable() {
		assert!(non_empty("  \n".into()).is_err());
		assert_eq!(non_empty(" a harbour \n".into()).unwrap(), "a harbour");
	}
}
