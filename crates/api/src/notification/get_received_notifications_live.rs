use crate::error::CompanionError;
use crate::shared::live::ndjson_response;
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_received_notifications_live::*;
use companion_reminders_infra::CompanionContext;
use futures::stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

/// Streams every notification presented on the device from now on
pub async fn get_received_notifications_live_controller(
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let receiver = ctx.notifications.subscribe_received();

    let notifications = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(notification) => return Some((APIResponse::new(notification), receiver)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Live notification listener skipped {} notifications", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(ndjson_response(notifications))
}
