use crate::error::CompanionError;
use crate::message::send_message::SendMessageUseCase;
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::send_test_message::*;
use companion_reminders_domain::ID;
use companion_reminders_infra::CompanionContext;

/// Sends a message from the user to themselves to check the round trip
pub async fn send_test_message_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = test_message(body.0.user_id, &ctx);

    execute(usecase, &ctx)
        .await
        .map(|message| HttpResponse::Created().json(APIResponse::new(message)))
        .map_err(CompanionError::from)
}

fn test_message(user_id: ID, ctx: &CompanionContext) -> SendMessageUseCase {
    SendMessageUseCase {
        sender_id: user_id.clone(),
        receiver_id: user_id,
        message: format!("Test message from mobile app - {}", ctx.sys.now().to_rfc3339()),
    }
}
