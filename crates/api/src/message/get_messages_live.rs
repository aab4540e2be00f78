use crate::error::CompanionError;
use crate::shared::live::{ndjson_response, subscription_stream};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_messages_live::*;
use companion_reminders_infra::{Change, CompanionContext};
use futures::StreamExt;
use tracing::warn;

/// Streams new messages of the conversation as they arrive, one per line
pub async fn get_messages_live_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let query = query_params.into_inner();
    let subscription = ctx
        .repos
        .messages
        .subscribe_conversation(&query.user_id1, &query.user_id2)
        .await;

    let messages = subscription_stream(subscription)
        .take_while(|change| {
            if let Err(e) = change {
                warn!("Conversation subscription failed: {:?}", e);
            }
            futures::future::ready(change.is_ok())
        })
        .filter_map(|change| {
            let message = match change {
                Ok(Change::Created(message)) => Some(APIResponse::new(message)),
                _ => None,
            };
            futures::future::ready(message)
        });

    Ok(ndjson_response(messages))
}
