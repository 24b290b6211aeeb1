//! Transport-neutral request shape and the `TextModel` seam.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One turn of conversation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: Role,
    pub text: String,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A single text-generation call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<Content>,
    /// When set, the reply must be JSON matching this schema.
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    /// A one-shot prompt expecting JSON shaped by `schema`.
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            system_instruction: None,
            contents: vec![Content::user(prompt)],
            response_schema: Some(schema),
        }
    }
}

/// A generative text backend. Each call is exactly one outbound request.
pub trait TextModel: Send + Sync {
    /// Returns the reply text, or an error when the request fails or the
    /// reply carries no text.
    fn generate(&self, request: &GenerateRequest) -> Result<String>;
}
