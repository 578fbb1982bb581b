use super::{CHAT_HISTORY_PATH, CHAT_PATH};
use crate::client::ApiClient;
use crate::types::{ChatLog, ChatRequest, ChatResponse};
use crate::Result;

impl ApiClient {
    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post(CHAT_PATH, request).await
    }

    pub async fn chat_history(&self, group_id: i64) -> Result<Vec<ChatLog>> {
        self.get(&format!("{}?group_id={}", CHAT_HISTORY_PATH, group_id)).await
    }
}
