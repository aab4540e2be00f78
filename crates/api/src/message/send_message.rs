use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::send_message::*;
use companion_reminders_domain::{Message, NewMessage, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn send_message_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let body = body.0;
    let usecase = SendMessageUseCase {
        sender_id: body.sender_id,
        receiver_id: body.receiver_id,
        message: body.message,
    };

    execute(usecase, &ctx)
        .await
        .map(|message| HttpResponse::Created().json(APIResponse::new(message)))
        .map_err(CompanionError::from)
}

#[derive(Debug)]
pub struct SendMessageUseCase {
    pub sender_id: ID,
    pub receiver_id: ID,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyMessage,
    UserNotFound(ID),
    Storage(StoreError),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMessage => Self::BadClientData("The message is empty".into()),
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", id))
            }
            UseCaseError::Storage(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendMessageUseCase {
    type Response = Message;

    type Error = UseCaseError;

    const NAME: &'static str = "SendMessage";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }

        for user_id in [&self.sender_id, &self.receiver_id] {
            match ctx.repos.users.find(user_id).await {
                Ok(Some(_)) => {}
                Ok(None) => return Err(UseCaseError::UserNotFound(user_id.clone())),
                Err(e) => return Err(UseCaseError::Storage(e)),
            }
        }

        ctx.repos
            .messages
            .create(NewMessage {
                sender_id: self.sender_id.clone(),
                receiver_id: self.receiver_id.clone(),
                message: message.to_string(),
            })
            .await
            .map_err(UseCaseError::Storage)
    }
}
