use crate::{APIResponse, BaseClient, LiveStream, ID};
use companion_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Wall clock time, e.g. "9:00 AM"
    pub time: String,
    /// Set when a companion creates the reminder for the user
    pub added_by: Option<ID>,
}

pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub is_completed: Option<bool>,
    pub is_acknowledged: Option<bool>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            title: input.title,
            description: input.description,
            time: input.time,
            added_by: input.added_by,
        };
        self.base
            .post(
                body,
                format!("users/{}/reminders", input.user_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_user(&self, user_id: ID) -> APIResponse<get_reminders::APIResponse> {
        self.base
            .get(format!("users/{}/reminders", user_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            is_completed: input.is_completed,
            is_acknowledged: input.is_acknowledged,
        };
        self.base
            .patch(
                body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn toggle_completion(
        &self,
        reminder_id: ID,
    ) -> APIResponse<toggle_reminder_completion::APIResponse> {
        self.base
            .post(
                (),
                format!("reminders/{}/toggle-completion", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    /// Snapshots of the user's reminder list, the first one right away
    pub async fn sync(
        &self,
        user_id: ID,
    ) -> APIResponse<LiveStream<sync_reminders::APIResponse>> {
        self.base
            .live(format!("users/{}/reminders/live", user_id))
            .await
    }
}
