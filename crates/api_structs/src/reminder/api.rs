use crate::dtos::{ReminderDTO, TriggerDTO};
use companion_reminders_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;
    use companion_reminders_domain::Trigger;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        /// Wall clock time, e.g. "9:00 AM" or "21:30"
        pub time: String,
        /// The companion creating the reminder, defaults to the patient
        #[serde(default)]
        pub added_by: Option<ID>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        pub trigger: TriggerDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, trigger: Trigger) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                trigger: TriggerDTO::new(trigger),
            }
        }
    }
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub is_completed: Option<bool>,
        #[serde(default)]
        pub is_acknowledged: Option<bool>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod toggle_reminder_completion {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod sync_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    /// Each line of the streamed response
    pub type APIResponse = crate::dtos::ReminderListSnapshotDTO;
}
