use crate::{APIResponse, BaseClient, LiveStream, ID};
use companion_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct MessageClient {
    base: Arc<BaseClient>,
}

pub type SendMessageInput = send_message::RequestBody;

fn conversation_query(user_id1: &ID, user_id2: &ID) -> String {
    format!("userId1={}&userId2={}", user_id1, user_id2)
}

impl MessageClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn send(&self, input: SendMessageInput) -> APIResponse<send_message::APIResponse> {
        self.base
            .post(input, "messages".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_conversation(
        &self,
        user_id1: ID,
        user_id2: ID,
    ) -> APIResponse<get_messages::APIResponse> {
        self.base
            .get(
                format!("messages?{}", conversation_query(&user_id1, &user_id2)),
                StatusCode::OK,
            )
            .await
    }

    pub async fn live(
        &self,
        user_id1: ID,
        user_id2: ID,
    ) -> APIResponse<LiveStream<get_messages_live::APIResponse>> {
        self.base
            .live(format!(
                "messages/live?{}",
                conversation_query(&user_id1, &user_id2)
            ))
            .await
    }
}
