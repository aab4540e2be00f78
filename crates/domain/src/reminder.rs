use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};

/// A `Reminder` is a task the patient should perform at `due_date`.
/// It is created either by the patient or by a paired companion and is
/// never deleted, only flagged as completed and acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// Assigned by the store on creation
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    /// The instant the device notification should fire
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    /// True once the patient has responded to the fired alert
    pub is_acknowledged: bool,
    /// The `User` this reminder is for
    pub patient_id: ID,
    /// The `User` that created the reminder, either the patient or a companion
    pub added_by: ID,
}

impl Reminder {
    pub fn added_by_companion(&self) -> bool {
        self.added_by != self.patient_id
    }
}

impl Entity<ID> for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// A `Reminder` that has not been written to a store yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub patient_id: ID,
    pub added_by: ID,
}

impl NewReminder {
    pub fn into_reminder(self, id: ID) -> Reminder {
        Reminder {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            is_completed: false,
            is_acknowledged: false,
            patient_id: self.patient_id,
            added_by: self.added_by,
        }
    }
}

/// Partial update of a `Reminder`. Only the status flags are ever mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderPatch {
    pub is_completed: Option<bool>,
    pub is_acknowledged: Option<bool>,
}

impl ReminderPatch {
    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }

    pub fn acknowledged() -> Self {
        Self {
            is_acknowledged: Some(true),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_completed.is_none() && self.is_acknowledged.is_none()
    }

    pub fn apply(&self, reminder: &mut Reminder) {
        if let Some(is_completed) = self.is_completed {
            reminder.is_completed = is_completed;
        }
        if let Some(is_acknowledged) = self.is_acknowledged {
            reminder.is_acknowledged = is_acknowledged;
        }
    }
}
