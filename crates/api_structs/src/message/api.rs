use crate::dtos::MessageDTO;
use companion_reminders_domain::{Message, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: MessageDTO,
}

impl MessageResponse {
    pub fn new(message: Message) -> Self {
        Self {
            message: MessageDTO::new(message),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub user_id1: ID,
    pub user_id2: ID,
}

pub mod send_message {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub sender_id: ID,
        pub receiver_id: ID,
        pub message: String,
    }

    pub type APIResponse = MessageResponse;
}

pub mod get_messages {
    use super::*;

    pub type QueryParams = ConversationQuery;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub messages: Vec<MessageDTO>,
    }

    impl APIResponse {
        pub fn new(messages: Vec<Message>) -> Self {
            Self {
                messages: messages.into_iter().map(MessageDTO::new).collect(),
            }
        }
    }
}

pub mod get_messages_live {
    use super::*;

    pub type QueryParams = ConversationQuery;

    /// Each line of the streamed response
    pub type APIResponse = MessageDTO;
}
