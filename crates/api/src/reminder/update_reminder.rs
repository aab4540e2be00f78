use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::update_reminder::*;
use companion_reminders_domain::{Reminder, ReminderPatch, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn update_reminder_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let body = body.0;
    let usecase = UpdateReminderUseCase {
        reminder_id: path_params.into_inner().reminder_id,
        patch: ReminderPatch {
            is_completed: body.is_completed,
            is_acknowledged: body.is_acknowledged,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(CompanionError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub patch: ReminderPatch,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyPatch,
    NotFound(ID),
    Storage(StoreError),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyPatch => Self::BadClientData(
                "Provide at least one of isCompleted and isAcknowledged".into(),
            ),
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::Storage(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        if self.patch.is_empty() {
            return Err(UseCaseError::EmptyPatch);
        }

        match ctx.repos.reminders.update(&self.reminder_id, &self.patch).await {
            Ok(reminder) => Ok(reminder),
            Err(StoreError::NotFound) => Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(e) => Err(UseCaseError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn rejects_empty_patch() {
        let ctx = CompanionContext::create_inmemory();
        let mut usecase = UpdateReminderUseCase {
            reminder_id: ID::new(),
            patch: Default::default(),
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap_err(), UseCaseError::EmptyPatch);

        usecase.patch = ReminderPatch::acknowledged();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(usecase.reminder_id.clone())
        );
    }
}
