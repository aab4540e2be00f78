use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::{forward_broadcast, Change, StoreError, Subscription};
use companion_reminders_domain::{NewReminder, Reminder, ReminderPatch, ID};
use tokio::sync::broadcast;

const CHANGE_FEED_CAPACITY: usize = 256;

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
    changes: broadcast::Sender<Change<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            reminders: std::sync::Mutex::new(vec![]),
            changes,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn create(&self, reminder: NewReminder) -> Result<Reminder, StoreError> {
        let reminder = reminder.into_reminder(ID::new());
        insert(&reminder, &self.reminders);
        let _ = self.changes.send(Change::Created(reminder.clone()));
        Ok(reminder)
    }

    async fn find(&self, reminder_id: &ID) -> Result<Option<Reminder>, StoreError> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_patient(&self, patient_id: &ID) -> Result<Vec<Reminder>, StoreError> {
        let mut reminders = find_by(&self.reminders, |r| r.patient_id == *patient_id);
        reminders.sort_by_key(|r| r.due_date);
        Ok(reminders)
    }

    async fn update(&self, reminder_id: &ID, patch: &ReminderPatch) -> Result<Reminder, StoreError> {
        let reminder =
            update(reminder_id, &self.reminders, |r| patch.apply(r)).ok_or(StoreError::NotFound)?;
        let _ = self.changes.send(Change::Updated(reminder.clone()));
        Ok(reminder)
    }

    async fn subscribe(&self, patient_id: &ID) -> Subscription<Reminder> {
        let patient_id = patient_id.clone();
        forward_broadcast(self.changes.subscribe(), move |r: &Reminder| {
            r.patient_id == patient_id
        })
    }
}
