mod inmemory;

pub use inmemory::InMemoryAlertRepo;

use companion_reminders_domain::{ReminderAlert, ID};

/// Alerts are device local and never leave the process
#[async_trait::async_trait]
pub trait IAlertRepo: Send + Sync {
    /// Creates or replaces the alert of the reminder
    async fn save(&self, alert: &ReminderAlert);
    async fn find(&self, reminder_id: &ID) -> Option<ReminderAlert>;
    async fn delete(&self, reminder_id: &ID) -> Option<ReminderAlert>;
}
