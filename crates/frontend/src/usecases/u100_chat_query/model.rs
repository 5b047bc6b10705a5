use chrono::{DateTime, Utc};
use contracts::shared::error::ApiError;
use contracts::usecases::u100_chat_query::ChatReply;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "¡Hola! Soy el asistente de SugarBI. Puedes hacerme preguntas sobre la producción de caña, fincas, variedades, y más. ¿En qué te puedo ayudar?";
const TRANSPORT_APOLOGY: &str =
    "Lo siento, hubo un error al procesar tu consulta. Por favor, inténtalo de nuevo.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sql: Option<String>,
    pub record_count: Option<u64>,
    pub error: Option<String>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            sql: None,
            record_count: None,
            error: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn welcome() -> Self {
        Self::new(ChatRole::Bot, WELCOME_MESSAGE)
    }

    pub fn from_reply(reply: &ChatReply) -> Self {
        Self {
            sql: reply.sql.clone().filter(|s| !s.trim().is_empty()),
            record_count: Some(reply.row_count()),
            ..Self::new(ChatRole::Bot, reply.answer_text())
        }
    }

    /// Backend refusals are shown as-is, transport failures get an apology
    pub fn from_error(error: &ApiError) -> Self {
        let content = match error {
            ApiError::Backend(message) => message.clone(),
            _ => TRANSPORT_APOLOGY.to_string(),
        };
        Self {
            error: Some(error.to_string()),
            ..Self::new(ChatRole::Bot, content)
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// Message log of the chat page. One question may be in flight at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
    pub pending: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            pending: false,
        }
    }

    /// Records the question and returns the text to send, `None` when the
    /// input is blank or a reply is still pending
    pub fn ask(&mut self, input: &str) -> Option<String> {
        let query = input.trim();
        if query.is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage::user(query));
        self.pending = true;
        Some(query.to_string())
    }

    pub fn resolve(&mut self, outcome: Result<ChatReply, ApiError>) {
        let message = match &outcome {
            Ok(reply) => ChatMessage::from_reply(reply),
            Err(e) => ChatMessage::from_error(e),
        };
        self.messages.push(message);
        self.pending = false;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn question_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply() -> ChatReply {
        serde_json::from_value(serde_json::json!({
            "query": "top 3 fincas",
            "sql": "SELECT nombre_finca FROM hechos_cosecha LIMIT 3",
            "raw_data": [{"nombre_finca": "A"}, {"nombre_finca": "B"}, {"nombre_finca": "C"}],
            "natural_response": "Estas son las 3 fincas con mayor producción."
        }))
        .unwrap()
    }

    #[test]
    fn test_new_conversation_starts_with_welcome() {
        let conv = Conversation::new();
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].role, ChatRole::Bot);
        assert_eq!(conv.messages[0].content, WELCOME_MESSAGE);
        assert!(!conv.pending);
    }

    #[test]
    fn test_ask_trims_and_blocks_while_pending() {
        let mut conv = Conversation::new();
        assert_eq!(conv.ask("   "), None);
        assert_eq!(conv.ask("  top 3 fincas "), Some("top 3 fincas".to_string()));
        assert!(conv.pending);
        assert_eq!(conv.ask("otra pregunta"), None);
        assert_eq!(conv.question_count(), 1);
    }

    #[test]
    fn test_resolve_with_reply() {
        let mut conv = Conversation::new();
        conv.ask("top 3 fincas");
        conv.resolve(Ok(reply()));
        let last = conv.messages.last().unwrap();
        assert!(!conv.pending);
        assert_eq!(last.role, ChatRole::Bot);
        assert_eq!(last.content, "Estas son las 3 fincas con mayor producción.");
        assert_eq!(last.record_count, Some(3));
        assert!(last.sql.is_some());
        assert!(last.error.is_none());
    }

    #[test]
    fn test_resolve_with_errors() {
        let mut conv = Conversation::new();
        conv.ask("¿?");
        conv.resolve(Err(ApiError::Backend("No entendí la consulta".into())));
        assert_eq!(conv.messages.last().unwrap().content, "No entendí la consulta");

        conv.ask("toneladas por zona");
        conv.resolve(Err(ApiError::Network("offline".into())));
        let last = conv.messages.last().unwrap();
        assert_eq!(last.content, TRANSPORT_APOLOGY);
        assert!(last.error.is_some());
        assert!(!conv.pending);
    }

    #[test]
    fn test_clear_keeps_only_welcome() {
        let mut conv = Conversation::new();
        conv.ask("hola");
        conv.clear();
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.question_count(), 0);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("a");
        assert_ne!(a.id, b.id);
    }
}
