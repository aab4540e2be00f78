use crate::{
    reminder::Reminder,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Data carried by a device notification so that the alert can be shown
/// without looking the `Reminder` up in the store first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub reminder_id: ID,
    pub reminder_text: String,
    /// Time as the user entered it, e.g. "9:00 AM"
    pub reminder_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub data: NotificationPayload,
}

impl NotificationContent {
    pub fn for_reminder(reminder: &Reminder, reminder_time: String) -> Self {
        Self {
            title: "Reminder".into(),
            body: reminder.title.clone(),
            data: NotificationPayload {
                reminder_id: reminder.id.clone(),
                reminder_text: reminder.title.clone(),
                reminder_time,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerKind {
    /// Scheduled when the `Reminder` was created
    Initial,
    /// The patient asked to be reminded again later
    Snooze,
    /// The patient said the task was not done
    Escalation,
}

/// A device local alarm that raises a notification at `fire_at`.
/// There is at most one outstanding `Trigger` per `Reminder`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub reminder_id: ID,
    /// Timestamp in millis
    pub fire_at: i64,
    pub content: NotificationContent,
    pub kind: TriggerKind,
}

impl Trigger {
    pub fn new(content: NotificationContent, fire_at: DateTime<Utc>, kind: TriggerKind) -> Self {
        Self {
            reminder_id: content.data.reminder_id.clone(),
            fire_at: fire_at.timestamp_millis(),
            content,
            kind,
        }
    }
}

impl Entity<ID> for Trigger {
    fn id(&self) -> ID {
        self.reminder_id.clone()
    }
}

/// A `Trigger` that has fired and was presented on the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredNotification {
    pub content: NotificationContent,
    pub kind: TriggerKind,
    pub fire_at: i64,
    pub delivered_at: i64,
}

impl DeliveredNotification {
    pub fn new(trigger: Trigger, delivered_at: i64) -> Self {
        Self {
            content: trigger.content,
            kind: trigger.kind,
            fire_at: trigger.fire_at,
            delivered_at,
        }
    }
}
