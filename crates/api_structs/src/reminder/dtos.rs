use chrono::{DateTime, Utc};
use companion_reminders_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub is_acknowledged: bool,
    pub patient_id: ID,
    pub added_by: ID,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            title: reminder.title,
            description: reminder.description,
            due_date: reminder.due_date,
            is_completed: reminder.is_completed,
            is_acknowledged: reminder.is_acknowledged,
            patient_id: reminder.patient_id,
            added_by: reminder.added_by,
        }
    }
}

/// One rendering of a patient's reminder list
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderListSnapshotDTO {
    pub reminders: Vec<ReminderDTO>,
    /// Set once the live subscription failed, no further snapshots follow
    pub error: Option<String>,
}
