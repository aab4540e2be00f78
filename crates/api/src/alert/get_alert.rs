use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_alert::*;
use companion_reminders_domain::{ReminderAlert, ID};
use companion_reminders_infra::CompanionContext;

pub async fn get_alert_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = GetAlertUseCase {
        reminder_id: path_params.into_inner().reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|alert| HttpResponse::Ok().json(APIResponse::new(alert)))
        .map_err(CompanionError::from)
}

#[derive(Debug)]
pub struct GetAlertUseCase {
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
                "There is no alert for the reminder with id: {}.",
                id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAlertUseCase {
    type Response = ReminderAlert;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAlert";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .alerts
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}
