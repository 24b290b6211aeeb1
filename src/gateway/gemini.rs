//! Gemini `generateContent` client over reqwest.
//!
//! API key goes in the `x-goog-api-key` header. No retries; the transport's
//! default timeout applies.

use super::model::{Content, GenerateRequest, TextModel};
use crate::error::{CosmosError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireResponseContent>,
}

#[derive(Deserialize)]
struct WireResponseContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
}

fn wire_content(content: &Content) -> WireContent<'_> {
    WireContent {
        role: Some(content.role.as_str()),
        parts: vec![WirePart {
            text: &content.text,
        }],
    }
}

fn build_body(request: &GenerateRequest) -> WireRequest<'_> {
    WireRequest {
        contents: request.contents.iter().map(wire_content).collect(),
        system_instruction: request.system_instruction.as_deref().map(|text| WireContent {
            role: None,
            parts: vec![WirePart { text }],
        }),
        generation_config: request
            .response_schema
            .as_ref()
            .map(|schema| WireGenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            }),
    }
}

/// Concatenated text parts of the first candidate, if any.
fn response_text(response: WireResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    api_base: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, api_base: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cosmos/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

impl TextModel for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let url = self.endpoint();
        debug!(model = %self.model, turns = request.contents.len(), "generateContent");

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(request))
            .send()?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(CosmosError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WireResponse = res
            .json()
            .map_err(|e| CosmosError::MalformedResponse(e.to_string()))?;

        response_text(parsed).ok_or(CosmosError::EmptyResponse)
    }
}
