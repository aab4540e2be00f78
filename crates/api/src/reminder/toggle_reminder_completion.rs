use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::toggle_reminder_completion::*;
use companion_reminders_domain::{Reminder, ReminderPatch, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn toggle_reminder_completion_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = ToggleReminderCompletionUseCase {
        reminder_id: path_params.into_inner().reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(CompanionError::from)
}

/// Checkbox in the reminder list
#[derive(Debug)]
pub struct ToggleReminderCompletionUseCase {
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
impl UseCase for ToggleReminderCompletionUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "ToggleReminderCompletion";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(e) => return Err(UseCaseError::Storage(e)),
        };

        ctx.repos
            .reminders
            .update(
                &reminder.id,
                &ReminderPatch::completed(!reminder.is_completed),
            )
            .await
            .map_err(UseCaseError::Storage)
    }
}
