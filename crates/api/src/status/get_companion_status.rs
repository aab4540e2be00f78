use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use companion_reminders_api_structs::dtos::MessageDTO;
use companion_reminders_api_structs::get_companion_status::*;
use companion_reminders_domain::Message;
use companion_reminders_infra::CompanionContext;
use std::convert::Infallible;

pub async fn get_companion_status_controller(
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let status = match execute(GetCompanionStatusUseCase, &ctx).await {
        Ok(status) => status,
        Err(e) => match e {},
    };

    Ok(HttpResponse::Ok().json(APIResponse {
        connected: status.connected,
        latest_message: status.latest_message.map(MessageDTO::new),
        error: status.error,
        timestamp: status.timestamp,
    }))
}

/// Checks that the message store used to reach the companion site answers
#[derive(Debug)]
pub struct GetCompanionStatusUseCase;

#[derive(Debug, PartialEq)]
pub struct CompanionStatus {
    pub connected: bool,
    pub latest_message: Option<Message>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCompanionStatusUseCase {
    type Response = CompanionStatus;

    type Error = Infallible;

    const NAME: &'static str = "GetCompanionStatus";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        let timestamp = ctx.sys.now();
        let status = match ctx.repos.messages.find_latest().await {
            Ok(latest_message) => CompanionStatus {
                connected: true,
                latest_message,
                error: None,
                timestamp,
            },
            Err(e) => CompanionStatus {
                connected: false,
                latest_message: None,
                error: Some(e.readable_message()),
                timestamp,
            },
        };
        Ok(status)
    }
}
