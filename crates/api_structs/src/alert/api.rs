use crate::dtos::{AlertDTO, ReminderDTO, TriggerDTO};
use companion_reminders_domain::{ReminderAlert, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub alert: AlertDTO,
}

impl AlertResponse {
    pub fn new(alert: ReminderAlert) -> Self {
        Self {
            alert: AlertDTO::new(alert),
        }
    }
}

pub mod open_alert {
    use super::*;

    /// The data of the notification the patient tapped
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_id: ID,
        pub reminder_text: String,
        pub reminder_time: String,
    }

    pub type APIResponse = AlertResponse;
}

pub mod get_alert {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = AlertResponse;
}

pub mod respond_to_alert {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    /// Answer to "Did you complete the task?"
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ConfirmRequestBody {
        pub completed: bool,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub alert: AlertDTO,
        /// The reminder after the store was updated, if it was touched
        pub reminder: Option<ReminderDTO>,
        /// The trigger registered by a snooze or escalation
        pub trigger: Option<TriggerDTO>,
        pub escalated: bool,
        /// Set when an escalation was recorded but could not be notified again
        pub reschedule_error: Option<String>,
    }
}
