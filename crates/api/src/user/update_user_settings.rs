use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::update_user_settings::*;
use companion_reminders_domain::{User, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn update_user_settings_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = UpdateUserSettingsUseCase {
        user_id: path_params.into_inner().user_id,
        can_companion_add_task: body.can_companion_add_task,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(CompanionError::from)
}

/// The settings toggle that lets paired companions add reminders
#[derive(Debug)]
pub struct UpdateUserSettingsUseCase {
    pub user_id: ID,
    pub can_companion_add_task: bool,
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
                Self::NotFound(format!("The user with id: {}, was not found.", id))
            }
            UseCaseError::Storage(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserSettingsUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUserSettings";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .users
            .set_companion_can_add_task(&self.user_id, self.can_companion_add_task)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => UseCaseError::NotFound(self.user_id.clone()),
                e => UseCaseError::Storage(e),
            })
    }
}
