use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};

/// A chat `Message` between a patient and a companion
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: ID,
    pub sender_id: ID,
    pub receiver_id: ID,
    pub message: String,
    pub created: DateTime<Utc>,
}

impl Message {
    /// Whether this message was exchanged between the two given users,
    /// in either direction
    pub fn belongs_to_conversation(&self, user1: &ID, user2: &ID) -> bool {
        (self.sender_id == *user1 && self.receiver_id == *user2)
            || (self.sender_id == *user2 && self.receiver_id == *user1)
    }
}

impl Entity<ID> for Message {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub sender_id: ID,
    pub receiver_id: ID,
    pub message: String,
}

impl NewMessage {
    pub fn into_message(self, id: ID, created: DateTime<Utc>) -> Message {
        Message {
            id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            message: self.message,
            created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_membership_is_symmetric() {
        let (a, b, c) = (ID::new(), ID::new(), ID::new());
        let msg = NewMessage {
            sender_id: a.clone(),
            receiver_id: b.clone(),
            message: "hi".into(),
        }
        .into_message(ID::new(), Utc::now());

        assert!(msg.belongs_to_conversation(&a, &b));
        assert!(msg.belongs_to_conversation(&b, &a));
        assert!(!msg.belongs_to_conversation(&a, &c));
        assert!(!msg.belongs_to_conversation(&a, &a));
    }
}
