use super::IMessageRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::{forward_broadcast, Change, StoreError, Subscription};
use chrono::Utc;
use companion_reminders_domain::{Message, NewMessage, ID};
use tokio::sync::broadcast;

const CHANGE_FEED_CAPACITY: usize = 256;

pub struct InMemoryMessageRepo {
    messages: std::sync::Mutex<Vec<Message>>,
    changes: broadcast::Sender<Change<Message>>,
}

impl InMemoryMessageRepo {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            messages: std::sync::Mutex::new(vec![]),
            changes,
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for InMemoryMessageRepo {
    async fn create(&self, message: NewMessage) -> Result<Message, StoreError> {
        let message = message.into_message(ID::new(), Utc::now());
        insert(&message, &self.messages);
        let _ = self.changes.send(Change::Created(message.clone()));
        Ok(message)
    }

    async fn find_conversation(&self, user1: &ID, user2: &ID) -> Result<Vec<Message>, StoreError> {
        // Insertion order is creation order
        Ok(find_by(&self.messages, |m| {
            m.belongs_to_conversation(user1, user2)
        }))
    }

    async fn find_latest(&self) -> Result<Option<Message>, StoreError> {
        Ok(find_by(&self.messages, |_| true).pop())
    }

    async fn subscribe_conversation(&self, user1: &ID, user2: &ID) -> Subscription<Message> {
        let (user1, user2) = (user1.clone(), user2.clone());
        forward_broadcast(self.changes.subscribe(), move |m: &Message| {
            m.belongs_to_conversation(&user1, &user2)
        })
    }
}
