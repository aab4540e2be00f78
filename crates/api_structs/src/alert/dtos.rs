use companion_reminders_domain::{AlertState, ReminderAlert, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertDTO {
    pub reminder_id: ID,
    pub reminder_text: String,
    pub reminder_time: String,
    pub state: AlertState,
    pub opened_at: i64,
}

impl AlertDTO {
    pub fn new(alert: ReminderAlert) -> Self {
        Self {
            reminder_id: alert.reminder_id,
            reminder_text: alert.reminder_text,
            reminder_time: alert.reminder_time,
            state: alert.state,
            opened_at: alert.opened_at,
        }
    }
}
