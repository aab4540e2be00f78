use crate::dtos::TriggerDTO;
use companion_reminders_domain::{Trigger, ID};
use serde::{Deserialize, Serialize};

pub mod get_pending_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub trigger: TriggerDTO,
    }

    impl APIResponse {
        pub fn new(trigger: Trigger) -> Self {
            Self {
                trigger: TriggerDTO::new(trigger),
            }
        }
    }
}

pub mod get_received_notifications_live {
    /// Each line of the streamed response
    pub type APIResponse = crate::dtos::DeliveredNotificationDTO;
}
