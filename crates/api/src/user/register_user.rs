use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::register_user::*;
use companion_reminders_domain::{NewUser, User};
use companion_reminders_infra::{CompanionContext, StoreError};
use companion_reminders_utils::create_shareable_id;

pub async fn register_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let body = body.0;
    let usecase = RegisterUserUseCase {
        name: body.name,
        email: body.email,
        username: body.username,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(CompanionError::from)
}

/// Number of attempts at generating a shareable id that nobody else has
const SHAREABLE_ID_ATTEMPTS: usize = 5;

#[derive(Debug)]
pub struct RegisterUserUseCase {
    pub name: String,
    pub email: String,
    pub username: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidName,
    InvalidEmail(String),
    ShareableIdExhausted,
    Storage(StoreError),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidName => Self::BadClientData("Please enter a name".into()),
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}", email))
            }
            UseCaseError::ShareableIdExhausted => {
                Self::Conflict("Unable to generate a unique shareable id, try again".into())
            }
            UseCaseError::Storage(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "RegisterUser";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseError::InvalidName);
        }
        let email = self.email.trim();
        if !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(email.to_string()));
        }
        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(name);

        let mut shareable_id = None;
        for _ in 0..SHAREABLE_ID_ATTEMPTS {
            let candidate = create_shareable_id();
            let taken = ctx
                .repos
                .users
                .find_by_shareable_id(&candidate)
                .await
                .map_err(UseCaseError::Storage)?;
            if taken.is_none() {
                shareable_id = Some(candidate);
                break;
            }
        }
        let shareable_id = shareable_id.ok_or(UseCaseError::ShareableIdExhausted)?;

        ctx.repos
            .users
            .insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                username: username.to_string(),
                shareable_id,
            })
            .await
            .map_err(UseCaseError::Storage)
    }
}
