mod appwrite;
mod firestore;
mod inmemory;

pub use appwrite::AppwriteMessageRepo;
pub use firestore::FirestoreMessageRepo;
pub use inmemory::InMemoryMessageRepo;

use crate::{StoreError, Subscription};
use companion_reminders_domain::{Message, NewMessage, ID};

#[async_trait::async_trait]
pub trait IMessageRepo: Send + Sync {
    /// Appends a message, the store assigns id and creation time
    async fn create(&self, message: NewMessage) -> Result<Message, StoreError>;
    /// Messages between the two users in both directions, oldest first
    async fn find_conversation(&self, user1: &ID, user2: &ID) -> Result<Vec<Message>, StoreError>;
    async fn find_latest(&self) -> Result<Option<Message>, StoreError>;
    /// New messages of the conversation between the two users
    async fn subscribe_conversation(&self, user1: &ID, user2: &ID) -> Subscription<Message>;
}
