use crate::{APIResponse, BaseClient, ID};
use companion_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

pub type RegisterUserInput = register_user::RequestBody;

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn register(&self, input: RegisterUserInput) -> APIResponse<register_user::APIResponse> {
        self.base
            .post(input, "users".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, user_id: ID) -> APIResponse<get_user::APIResponse> {
        self.base
            .get(format!("users/{}", user_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_shareable_id(
        &self,
        shareable_id: &str,
    ) -> APIResponse<get_user_by_shareable_id::APIResponse> {
        self.base
            .get(format!("users/shareable/{}", shareable_id), StatusCode::OK)
            .await
    }

    pub async fn set_companion_can_add_task(
        &self,
        user_id: ID,
        can_companion_add_task: bool,
    ) -> APIResponse<update_user_settings::APIResponse> {
        let body = update_user_settings::RequestBody {
            can_companion_add_task,
        };
        self.base
            .put(body, format!("users/{}/settings", user_id), StatusCode::OK)
            .await
    }
}
