use crate::dtos::MessageDTO;
use chrono::{DateTime, Utc};
use companion_reminders_domain::ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusDTO {
    pub name: String,
    pub running: bool,
    /// The last error or panic of the job, cleared by a reset
    pub fault: Option<String>,
}

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub jobs: Vec<JobStatusDTO>,
    }
}

pub mod reset_jobs {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub jobs: Vec<JobStatusDTO>,
    }
}

pub mod get_companion_status {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub connected: bool,
        pub latest_message: Option<MessageDTO>,
        pub error: Option<String>,
        pub timestamp: DateTime<Utc>,
    }
}

pub mod send_test_message {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
    }

    pub type APIResponse = crate::MessageResponse;
}
