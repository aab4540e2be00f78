use super::IMessageRepo;
use crate::repos::shared::timestamp::parse_timestamp;
use crate::services::appwrite::{AppwriteQuery, AppwriteRestApi, UNIQUE_DOCUMENT_ID};
use crate::{poll_changes, StoreError, Subscription};
use companion_reminders_domain::{Message, NewMessage, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct MessageAttributes<'a> {
    #[serde(rename = "senderID")]
    sender_id: &'a str,
    #[serde(rename = "receiverID")]
    receiver_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$createdAt")]
    created_at: String,
    #[serde(rename = "senderID")]
    sender_id: String,
    #[serde(rename = "receiverID")]
    receiver_id: String,
    message: String,
}

impl TryFrom<MessageDocument> for Message {
    type Error = StoreError;

    fn try_from(doc: MessageDocument) -> Result<Self, Self::Error> {
        let parse_id = |raw: &str| {
            raw.parse::<ID>()
                .map_err(|_| StoreError::Decode(format!("Invalid id in message document: {}", raw)))
        };
        Ok(Self {
            id: parse_id(&doc.id)?,
            sender_id: parse_id(&doc.sender_id)?,
            receiver_id: parse_id(&doc.receiver_id)?,
            message: doc.message,
            created: parse_timestamp(&doc.created_at)?,
        })
    }
}

#[derive(Clone)]
pub struct AppwriteMessageRepo {
    api: Arc<AppwriteRestApi>,
    collection_id: String,
    poll_interval: Duration,
}

impl AppwriteMessageRepo {
    pub fn new(api: Arc<AppwriteRestApi>, collection_id: String, poll_interval: Duration) -> Self {
        Self {
            api,
            collection_id,
            poll_interval,
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for AppwriteMessageRepo {
    async fn create(&self, message: NewMessage) -> Result<Message, StoreError> {
        let attributes = MessageAttributes {
            sender_id: message.sender_id.as_str(),
            receiver_id: message.receiver_id.as_str(),
            message: &message.message,
        };
        let doc: MessageDocument = self
            .api
            .create_document(&self.collection_id, UNIQUE_DOCUMENT_ID, &attributes)
            .await?;
        doc.try_into()
    }

    async fn find_conversation(&self, user1: &ID, user2: &ID) -> Result<Vec<Message>, StoreError> {
        let users = [user1.as_str(), user2.as_str()];
        let docs: Vec<MessageDocument> = self
            .api
            .list_documents(
                &self.collection_id,
                &[
                    AppwriteQuery::equal_any("senderID", &users),
                    AppwriteQuery::equal_any("receiverID", &users),
                    AppwriteQuery::OrderAsc("$createdAt".into()),
                ],
            )
            .await?;
        let mut messages = Vec::with_capacity(docs.len());
        for doc in docs {
            let message = Message::try_from(doc)?;
            // The query also matches messages a user sent to themselves
            if message.belongs_to_conversation(user1, user2) {
                messages.push(message);
            }
        }
        Ok(messages)
    }

    async fn find_latest(&self) -> Result<Option<Message>, StoreError> {
        let mut docs: Vec<MessageDocument> = self
            .api
            .list_documents(
                &self.collection_id,
                &[
                    AppwriteQuery::OrderDesc("$createdAt".into()),
                    AppwriteQuery::Limit(1),
                ],
            )
            .await?;
        docs.pop().map(Message::try_from).transpose()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_message_document() {
        let doc: MessageDocument = serde_json::from_str(
            r#"{
                "$id": "msg1",
                "$createdAt": "2024-03-01T08:00:00.000+00:00",
                "senderID": "patient1",
                "receiverID": "companion1",
                "message": "Hello"
            }"#,
        )
        .unwrap();

        let message = Message::try_from(doc).unwrap();
        assert_eq!(message.sender_id.as_str(), "patient1");
        assert_eq!(message.created.to_rfc3339(), "2024-03-01T08:00:00+00:00");
    }
}
