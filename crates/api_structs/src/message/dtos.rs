use chrono::{DateTime, Utc};
use companion_reminders_domain::{Message, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: ID,
    pub sender_id: ID,
    pub receiver_id: ID,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl MessageDTO {
    pub fn new(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            message: message.message,
            created_at: message.created,
        }
    }
}
