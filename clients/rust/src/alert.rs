use crate::{APIResponse, BaseClient, ID};
use companion_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AlertClient {
    base: Arc<BaseClient>,
}

pub type OpenAlertInput = open_alert::RequestBody;

impl AlertClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn open(&self, input: OpenAlertInput) -> APIResponse<open_alert::APIResponse> {
        self.base
            .post(input, "alerts".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_alert::APIResponse> {
        self.base
            .get(format!("alerts/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn complete(&self, reminder_id: ID) -> APIResponse<respond_to_alert::APIResponse> {
        self.respond(reminder_id, "complete").await
    }

    pub async fn snooze(&self, reminder_id: ID) -> APIResponse<respond_to_alert::APIResponse> {
        self.respond(reminder_id, "snooze").await
    }

    pub async fn dismiss(&self, reminder_id: ID) -> APIResponse<respond_to_alert::APIResponse> {
        self.respond(reminder_id, "dismiss").await
    }

    /// Answer to "Did you complete the task?"
    pub async fn confirm(
        &self,
        reminder_id: ID,
        completed: bool,
    ) -> APIResponse<respond_to_alert::APIResponse> {
        let body = respond_to_alert::ConfirmRequestBody { completed };
        self.base
            .post(
                body,
                format!("alerts/{}/confirm", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    async fn respond(
        &self,
        reminder_id: ID,
        action: &str,
    ) -> APIResponse<respond_to_alert::APIResponse> {
        self.base
            .post(
                (),
                format!("alerts/{}/{}", reminder_id, action),
                StatusCode::OK,
            )
            .await
    }
}
