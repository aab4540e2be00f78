use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_reminder::*;
use companion_reminders_domain::{Reminder, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn get_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = GetReminderUseCase {
        reminder_id: path_params.into_inner().reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(CompanionError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Storage(StoreError),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::Storage(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => Ok(reminder),
            Ok(None) => Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(e) => Err(UseCaseError::Storage(e)),
        }
    }
}
