//! Access to the generative text service.
//!
//! [`Gateway`] formats the four request kinds (daily wisdom, dream reading,
//! star map reading, chat turn) and maps every failure onto either a fallback
//! value or a user-facing [`CosmosError`]. The HTTP transport sits behind the
//! [`TextModel`] trait.

mod chat;
mod gemini;
mod model;
mod prompts;
mod types;

pub use chat::{ChatMessage, ChatSession, INTERFERENCE_MESSAGE, SILENT_REPLY, WELCOME_MESSAGE};
pub use gemini::GeminiClient;
pub use model::{Content, GenerateRequest, Role, TextModel};
pub use types::{DailyWisdom, DreamInterpretation, DreamSymbol, StarMapReading};

use crate::error::{CosmosError, Result};
use chrono::Local;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};

/// Credentials and endpoint for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl GatewayConfig {
    fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Cheap to clone; workers each hold their own copy.
#[derive(Clone)]
pub struct Gateway {
    model: Option<Arc<dyn TextModel>>,
}

impl Gateway {
    /// Build a gateway from config. A missing key yields an unavailable
    /// gateway rather than an error.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let model = match config.usable_key() {
            Some(key) => {
                let client = GeminiClient::new(key, &config.model, &config.api_base)?;
                Some(Arc::new(client) as Arc<dyn TextModel>)
            }
            None => None,
        };
        Ok(Self { model })
    }

    pub fn with_model(model: Arc<dyn TextModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    fn model(&self) -> Result<&dyn TextModel> {
        self.model.as_deref().ok_or(CosmosError::Unconfigured)
    }

    fn generate_json<T: DeserializeOwned>(&self, request: &GenerateRequest) -> Result<T> {
        let text = self.model()?.generate(request)?;
        serde_json::from_str(&text).map_err(|e| CosmosError::MalformedResponse(e.to_string()))
    }

    /// Never fails. Without a key, or on any error, a fixed record is returned.
    pub fn daily_wisdom(&self) -> DailyWisdom {
        if !self.is_available() {
            return DailyWisdom::unconfigured();
        }
        let request = GenerateRequest::structured(prompts::WISDOM_PROMPT, prompts::wisdom_schema());
        match self.generate_json(&request) {
            Ok(wisdom) => {
                info!("daily wisdom received");
                wisdom
            }
            Err(e) => {
                error!(error = %e, "failed to fetch daily wisdom");
                DailyWisdom::fallback()
            }
        }
    }

    pub fn interpret_dream(&self, dream: &str) -> Result<DreamInterpretation> {
        if !self.is_available() {
            return Err(CosmosError::Unconfigured);
        }
        if dream.trim().is_empty() {
            return Err(CosmosError::EmptyDream);
        }
        let request =
            GenerateRequest::structured(prompts::dream_prompt(dream), prompts::dream_schema());
        self.generate_json(&request).map_err(|e| {
            error!(error = %e, "dream interpretation failed");
            CosmosError::DreamReading
        })
    }

    /// `date` and `time` are forwarded verbatim; callers check their shape.
    pub fn star_map_reading(&self, date: &str, time: &str) -> Result<StarMapReading> {
        if !self.is_available() {
            return Err(CosmosError::Unconfigured);
        }
        let today = Local::now().date_naive();
        let request = GenerateRequest::structured(
            prompts::star_map_prompt(date, time, today),
            prompts::star_map_schema(),
        );
        self.generate_json(&request).map_err(|e| {
            error!(error = %e, "star map reading failed");
            CosmosError::StarMapReading
        })
    }

    pub fn create_chat_session(&self) -> Result<ChatSession> {
        self.model()?;
        Ok(ChatSession::new())
    }

    /// One chat request: persona, prior `history`, then `text` as the new
    /// user turn.
    pub fn chat_turn(&self, history: &[Content], text: &str) -> Result<String> {
        let model = self.model()?;
        let mut contents = history.to_vec();
        contents.push(Content::user(text));
        let request = GenerateRequest {
            system_instruction: Some(prompts::ORION_PERSONA.to_string()),
            contents,
            response_schema: None,
        };
        match model.generate(&request) {
            Ok(reply) => Ok(reply),
            Err(CosmosError::EmptyResponse) => Ok(SILENT_REPLY.to_string()),
            Err(e) => {
                error!(error = %e, "chat transmission failed");
                Err(CosmosError::ChatTransmission)
            }
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("available", &self.is_available())
            .finish()
    }
}
