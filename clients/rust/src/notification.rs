use crate::{APIResponse, BaseClient, LiveStream, ID};
use companion_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_pending(
        &self,
        reminder_id: ID,
    ) -> APIResponse<get_pending_notification::APIResponse> {
        self.base
            .get(format!("notifications/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn received(
        &self,
    ) -> APIResponse<LiveStream<get_received_notifications_live::APIResponse>> {
        self.base.live("notifications/received/live".into()).await
    }
}
