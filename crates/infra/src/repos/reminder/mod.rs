mod appwrite;
mod firestore;
mod inmemory;

pub use appwrite::AppwriteReminderRepo;
pub use firestore::FirestoreReminderRepo;
pub use inmemory::InMemoryReminderRepo;

use crate::{StoreError, Subscription};
use companion_reminders_domain::{NewReminder, Reminder, ReminderPatch, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Persists the reminder, the store assigns the id
    async fn create(&self, reminder: NewReminder) -> Result<Reminder, StoreError>;
    async fn find(&self, reminder_id: &ID) -> Result<Option<Reminder>, StoreError>;
    /// Ordered by due date ascending
    async fn find_by_patient(&self, patient_id: &ID) -> Result<Vec<Reminder>, StoreError>;
    async fn update(&self, reminder_id: &ID, patch: &ReminderPatch) -> Result<Reminder, StoreError>;
    /// Changes to any reminder of the patient
    async fn subscribe(&self, patient_id: &ID) -> Subscription<Reminder>;
}
