use crate::dtos::UserDTO;
use companion_reminders_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod register_user {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        /// Defaults to the name
        #[serde(default)]
        pub username: Option<String>,
    }

    pub type APIResponse = UserResponse;
}

pub mod get_user {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = UserResponse;
}

pub mod get_user_by_shareable_id {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub shareable_id: String,
    }

    pub type APIResponse = UserResponse;
}

pub mod update_user_settings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub can_companion_add_task: bool,
    }

    pub type APIResponse = UserResponse;
}
