use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/chat` and `POST /api/chat/langchain`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// How the backend interpreted the question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatIntent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub filters: Option<Value>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// `data` of a chat reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub intent: Option<ChatIntent>,
    #[serde(default)]
    pub sql: Option<String>,
    /// Suggested chart, passed through untouched
    #[serde(default)]
    pub visualization: Option<Value>,
    #[serde(default)]
    pub raw_data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub record_count: Option<u64>,
    #[serde(default)]
    pub natural_response: Option<String>,
}

impl ChatReply {
    pub fn row_count(&self) -> u64 {
        self.record_count.unwrap_or(self.raw_data.len() as u64)
    }

    /// Text shown in the bot bubble
    pub fn answer_text(&self) -> String {
        match self.natural_response.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("Encontré {} registros para tu consulta.", self.row_count()),
        }
    }
}

/// `data` of `/api/examples`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamplesPayload {
    #[serde(default)]
    pub examples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_prefers_natural_response() {
        let reply: ChatReply = serde_json::from_value(serde_json::json!({
            "query": "top 5 fincas",
            "intent": {"type": "top", "metric": "toneladas", "dimension": "finca", "limit": 5},
            "sql": "SELECT ...",
            "raw_data": [{"nombre_finca": "A"}, {"nombre_finca": "B"}],
            "natural_response": "La finca A lidera la producción."
        }))
        .unwrap();
        assert_eq!(reply.answer_text(), "La finca A lidera la producción.");
        assert_eq!(reply.intent.unwrap().kind.as_deref(), Some("top"));
    }

    #[test]
    fn test_answer_falls_back_to_record_count() {
        let reply: ChatReply = serde_json::from_value(serde_json::json!({
            "query": "toneladas por zona",
            "raw_data": [{"zona": "Norte"}],
            "record_count": 3,
            "natural_response": "  "
        }))
        .unwrap();
        assert_eq!(reply.answer_text(), "Encontré 3 registros para tu consulta.");
    }
}
