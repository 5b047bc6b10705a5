use contracts::shared::error::ApiError;
use contracts::usecases::u100_chat_query::{ChatReply, ChatRequest, ExamplesPayload};

use crate::shared::api_utils::{get_json, post_json};

/// Backend pipeline that answers a question
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatEngine {
    #[default]
    Classic,
    LangChain,
}

impl ChatEngine {
    pub fn path(self) -> &'static str {
        match self {
            ChatEngine::Classic => "/api/chat",
            ChatEngine::LangChain => "/api/chat/langchain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChatEngine::Classic => "Clásico",
            ChatEngine::LangChain => "LangChain",
        }
    }
}

pub async fn send_query(engine: ChatEngine, query: String) -> Result<ChatReply, ApiError> {
    log::info!("chat query via {}", engine.path());
    post_json(engine.path(), &ChatRequest { query }).await
}

pub async fn get_examples() -> Result<Vec<String>, ApiError> {
    let payload: ExamplesPayload = get_json("/api/examples").await?;
    Ok(payload.examples)
}
