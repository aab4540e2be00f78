use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_pending_notification::*;
use companion_reminders_domain::{Trigger, ID};
use companion_reminders_infra::CompanionContext;

pub async fn get_pending_notification_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = GetPendingNotificationUseCase {
        reminder_id: path_params.into_inner().reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|trigger| HttpResponse::Ok().json(APIResponse::new(trigger)))
        .map_err(CompanionError::from)
}

/// The trigger that has not fired yet for the reminder
#[derive(Debug)]
pub struct GetPendingNotificationUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "There is no pending notification for the reminder with id: {}.",
                id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPendingNotificationUseCase {
    type Response = Trigger;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPendingNotification";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        ctx.notifications
            .find(&self.reminder_id)
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}
