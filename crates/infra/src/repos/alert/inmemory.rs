use super::IAlertRepo;
use crate::repos::shared::inmemory_repo::*;
use companion_reminders_domain::{ReminderAlert, ID};

pub struct InMemoryAlertRepo {
    alerts: std::sync::Mutex<Vec<ReminderAlert>>,
}

impl InMemoryAlertRepo {
    pub fn new() -> Self {
        Self {
            alerts: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAlertRepo for InMemoryAlertRepo {
    async fn save(&self, alert: &ReminderAlert) {
        upsert(alert, &self.alerts);
    }

    async fn find(&self, reminder_id: &ID) -> Option<ReminderAlert> {
        find(reminder_id, &self.alerts)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<ReminderAlert> {
        delete(reminder_id, &self.alerts)
    }
}
