//! Conversation state for the Órion oracle.

use super::model::{Content, Role};
use super::Gateway;
use crate::error::Result;
use chrono::{DateTime, Local};
use tracing::warn;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Saudações. Sou Órion. O que busca no cosmos hoje? ✨";
pub const SILENT_REPLY: &str = "O vácuo está silencioso. Tente sintonizar novamente 🌌.";
pub const INTERFERENCE_MESSAGE: &str =
    "Houve uma interferência na transmissão estelar. Tente novamente.";

const WELCOME_ID: &str = "welcome";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            ..Self::new(Role::Model, WELCOME_MESSAGE)
        }
    }
}

/// Displayed transcript plus the model-facing history.
///
/// The transcript is append-only. The history only ever holds completed
/// user/model pairs, so a failed turn leaves it as it was.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    history: Vec<Content>,
}

impl ChatSession {
    pub(crate) fn new() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            history: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Append the user's message to the transcript.
    pub fn push_user(&mut self, text: &str) -> &ChatMessage {
        self.push(ChatMessage::new(Role::User, text))
    }

    /// Record the outcome of a turn started with `push_user`.
    pub fn complete_turn(&mut self, user_text: &str, reply: Result<String>) -> &ChatMessage {
        match reply {
            Ok(text) => {
                self.history.push(Content::user(user_text));
                self.history.push(Content::model(text.clone()));
                self.push(ChatMessage::new(Role::Model, text))
            }
            Err(e) => {
                warn!(error = %e, "chat turn failed");
                self.push(ChatMessage::new(Role::Model, INTERFERENCE_MESSAGE))
            }
        }
    }

    /// Send one message and wait for Órion's answer. Blank input sends nothing.
    pub fn send_message(&mut self, gateway: &Gateway, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push_user(text);
        let reply = gateway.chat_turn(&self.history, text);
        Some(self.complete_turn(text, reply))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CosmosError;
    use crate::gateway::testing::ScriptedModel;
    use std::sync::Arc;

    #[test]
    fn test_new_session_starts_with_welcome() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].id, "welcome");
        assert_eq!(session.messages()[0].role, Role::Model);
        assert_eq!(session.messages()[0].text, WELCOME_MESSAGE);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut session = ChatSession::new();
        let a = session.push_user("a").id.clone();
        let b = session.push_user("b").id.clone();
        assert_ne!(a, b);
        assert_ne!(a, "welcome");
    }

    #[test]
    fn test_successful_turn_extends_history() {
        let mut session = ChatSession::new();
        session.push_user("oi");
        let reply = session.complete_turn("oi", Ok("Olá, viajante ✨".to_string()));
        assert_eq!(reply.text, "Olá, viajante ✨");
        assert_eq!(session.messages().len(), 3);
        assert_eq!(
            session.history(),
            &[Content::user("oi"), Content::model("Olá, viajante ✨")]
        );
    }

    #[test]
    fn test_failed_turn_keeps_history() {
        let mut session = ChatSession::new();
        session.push_user("oi");
        session.complete_turn("oi", Ok("olá".to_string()));
        session.push_user("e agora?");
        let reply = session.complete_turn("e agora?", Err(CosmosError::EmptyResponse));
        assert_eq!(reply.text, INTERFERENCE_MESSAGE);
        assert_eq!(reply.role, Role::Model);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.messages().len(), 5);
    }

    #[test]
    fn test_send_message_passes_prior_history() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok("primeira".to_string()),
            Ok("segunda".to_string()),
        ]));
        let gateway = Gateway::with_model(model.clone());
        let mut session = gateway.create_chat_session().unwrap();

        session.send_message(&gateway, "um");
        let reply = session.send_message(&gateway, "dois").unwrap();
        assert_eq!(reply.text, "segunda");

        let requests = model.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].contents, vec![Content::user("um")]);
        assert_eq!(
            requests[1].contents,
            vec![
                Content::user("um"),
                Content::model("primeira"),
                Content::user("dois")
            ]
        );
        assert!(requests[1].system_instruction.is_some());
    }

    #[test]
    fn test_send_message_blank_is_ignored() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let gateway = Gateway::with_model(model.clone());
        let mut session = gateway.create_chat_session().unwrap();
        assert!(session.send_message(&gateway, "   ").is_none());
        assert!(model.requests().is_empty());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_send_message_failure_appends_interference() {
        let model = Arc::new(ScriptedModel::new(vec![Err("boom".to_string())]));
        let gateway = Gateway::with_model(model);
        let mut session = gateway.create_chat_session().unwrap();
        let reply = session.send_message(&gateway, "oi").unwrap();
        assert_eq!(reply.text, INTERFERENCE_MESSAGE);
        assert!(session.history().is_empty());
    }
}
