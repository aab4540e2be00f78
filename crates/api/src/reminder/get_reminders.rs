use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_reminders::*;
use companion_reminders_domain::{Reminder, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn get_reminders_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = GetRemindersUseCase {
        patient_id: path_params.into_inner().user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|e| CompanionError::from(e.0))
}

/// The reminder list of a patient, next due first
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub patient_id: ID,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseError(pub StoreError);

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_patient(&self.patient_id)
            .await
            .map_err(UseCaseError)
    }
}
