use super::IMessageRepo;
use crate::services::firestore::{
    Direction, FieldOperator, FirestoreDocument, FirestoreRestApi, StructuredQuery, Value,
};
use crate::{poll_changes, StoreError, Subscription};
use chrono::Utc;
use companion_reminders_domain::{Message, NewMessage, ID};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn from_document(doc: &FirestoreDocument) -> Result<Message, StoreError> {
    Ok(Message {
        id: doc.id()?,
        sender_id: doc.get_id("senderID")?,
        receiver_id: doc.get_id("receiverID")?,
        message: doc.get_string("message")?,
        created: doc.get_timestamp("createdAt")?,
    })
}

#[derive(Clone)]
pub struct FirestoreMessageRepo {
    api: Arc<FirestoreRestApi>,
    collection: String,
    poll_interval: Duration,
}

impl FirestoreMessageRepo {
    pub fn new(api: Arc<FirestoreRestApi>, collection: String, poll_interval: Duration) -> Self {
        Self {
            api,
            collection,
            poll_interval,
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for FirestoreMessageRepo {
    async fn create(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut fields = HashMap::new();
        fields.insert("senderID".to_string(), Value::string(message.sender_id.as_str()));
        fields.insert(
            "receiverID".to_string(),
            Value::string(message.receiver_id.as_str()),
        );
        fields.insert("message".to_string(), Value::string(&message.message));
        fields.insert("createdAt".to_string(), Value::timestamp(&Utc::now()));

        let doc = self
            .api
            .create_document(&self.collection, None, &fields)
            .await?;
        from_document(&doc)
    }

    async fn find_conversation(&self, user1: &ID, user2: &ID) -> Result<Vec<Message>, StoreError> {
        // Firestore allows a single IN filter per query, the receiver is
        // checked after fetching
        let query = StructuredQuery::new(&self.collection)
            .filter(
                "senderID",
                FieldOperator::In,
                Value::strings(&[user1.as_str(), user2.as_str()]),
            )
            .order_by("createdAt", Direction::Ascending);

        let mut messages = Vec::new();
        for doc in self.api.run_query(&query).await? {
            let message = from_document(&doc)?;
            if message.belongs_to_conversation(user1, user2) {
                messages.push(message);
            }
        }
        Ok(messages)
    }

    async fn find_latest(&self) -> Result<Option<Message>, StoreError> {
        let query = StructuredQuery::new(&self.collection)
            .order_by("createdAt", Direction::Descending)
            .limit(1);
        self.api
            .run_query(&query)
            .await?
            .first()
            .map(from_document)
            .transpose()
    }

    async fn subscribe_conversation(&self, user1: &ID, user2: &ID) -> Subscription<Message> {
        let repo = self.clone();
        let (user1, user2) = (user1.clone(), user2.clone());
        poll_changes(self.poll_interval, move || {
            let repo = repo.clone();
            let (user1, user2) = (user1.clone(), user2.clone());
            async move { repo.find_conversation(&user1, &user2).await }
        })
        .await
    }
}
