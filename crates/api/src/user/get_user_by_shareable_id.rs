use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_user_by_shareable_id::*;
use companion_reminders_domain::User;
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn get_user_by_shareable_id_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let usecase = GetUserByShareableIdUseCase {
        shareable_id: path_params.into_inner().shareable_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(CompanionError::from)
}

/// Used by a companion to find the patient to pair with
#[derive(Debug)]
pub struct GetUserByShareableIdUseCase {
    pub shareable_id: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(String),
    Storage(StoreError),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(sid) => Self::NotFound(format!(
                "No user has the shareable id: {}.",
                sid
            )),
            UseCaseError::Storage(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserByShareableIdUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserByShareableId";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        // Shareable ids are uppercase, users tend to type them in lowercase
        let shareable_id = self.shareable_id.trim().to_ascii_uppercase();
        match ctx.repos.users.find_by_shareable_id(&shareable_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UseCaseError::NotFound(shareable_id)),
            Err(e) => Err(UseCaseError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use companion_reminders_domain::NewUser;

    #[actix_web::main]
    #[test]
    async fn finds_user_ignoring_case() {
        let ctx = CompanionContext::create_inmemory();
        let user = ctx
            .repos
            .users
            .insert(NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                username: "ada".into(),
                shareable_id: "AB12CD".into(),
            })
            .await
            .unwrap();

        let mut usecase = GetUserByShareableIdUseCase {
            shareable_id: " ab12cd".into(),
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap(), user);

        let mut usecase = GetUserByShareableIdUseCase {
            shareable_id: "ZZZZZZ".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound("ZZZZZZ".into())
        );
    }
}
