use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_user::*;
use companion_reminders_domain::{User, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn get_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = GetUserUseCase {
        user_id: path_params.into_inner().user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(CompanionError::from)
}

#[derive(Debug)]
pub struct GetUserUseCase {
    pub user_id: ID,
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
impl UseCase for GetUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUser";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UseCaseError::NotFound(self.user_id.clone())),
            Err(e) => Err(UseCaseError::Storage(e)),
        }
    }
}
