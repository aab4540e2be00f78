use crate::{APIResponse, BaseClient, ID};
use companion_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct StatusClient {
    base: Arc<BaseClient>,
}

impl StatusClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn check_health(&self) -> APIResponse<get_service_health::APIResponse> {
        self.base.get("".into(), StatusCode::OK).await
    }

    pub async fn reset_jobs(&self) -> APIResponse<reset_jobs::APIResponse> {
        self.base
            .post((), "status/jobs/reset".into(), StatusCode::OK)
            .await
    }

    pub async fn companion(&self) -> APIResponse<get_companion_status::APIResponse> {
        self.base
            .get("companion/status".into(), StatusCode::OK)
            .await
    }

    pub async fn send_test_message(
        &self,
        user_id: ID,
    ) -> APIResponse<send_test_message::APIResponse> {
        let body = send_test_message::RequestBody { user_id };
        self.base
            .post(body, "companion/test-message".into(), StatusCode::CREATED)
            .await
    }
}
