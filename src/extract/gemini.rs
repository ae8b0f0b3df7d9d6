//! Minimal client for the Gemini `generateContent` REST endpoint.

use super::{Extractor, ImageInput};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

pub struct GeminiExtractor {
    endpoint: String,
    model: String,
    api_key: String,
    agent: ureq::Agent,
}

impl GeminiExtractor {
    pub fn new(endpoint: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            agent,
        }
    }

    /// Build a client from the configuration; the API key is read from the
    /// environment variable named by `extract_api_key_env`.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let api_key = std::env::var(&cfg.extract_api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "environment variable {} is not set",
                    cfg.extract_api_key_env
                ))
            })?;

        Ok(Self::new(
            &cfg.extract_endpoint,
            &cfg.extract_model,
            &api_key,
            Duration::from_secs(cfg.extract_timeout_secs),
        ))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

fn build_request(prompt: &str, images: &[ImageInput]) -> GenerateRequest {
    let mut parts = vec![Part::Text {
        text: prompt.to_string(),
    }];
    parts.extend(images.iter().map(|img| Part::InlineData {
        inline_data: InlineData {
            mime_type: img.mime_type.to_string(),
            data: STANDARD.encode(&img.bytes),
        },
    }));

    GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
    }
}

/// Concatenate the text parts of the first candidate.
fn response_text(resp: GenerateResponse) -> AppResult<String> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let why = resp
            .prompt_feedback
            .map(|f| f.to_string())
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(AppError::Extraction(format!("empty response: {why}")));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        })
        .collect();

    if text.trim().is_empty() {
        return Err(AppError::Extraction(format!(
            "response has no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

impl Extractor for GeminiExtractor {
    fn extract(&self, prompt: &str, images: &[ImageInput]) -> AppResult<String> {
        let body = build_request(prompt, images);
        let resp: GenerateResponse = self
            .agent
            .post(&self.url())
            .set("x-goog-api-key", &self.api_key)
            .send_json(&body)?
            .into_json()?;
        response_text(resp)
    }
}
