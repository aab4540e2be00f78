use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::get_messages::*;
use companion_reminders_domain::{Message, ID};
use companion_reminders_infra::{CompanionContext, StoreError};

pub async fn get_messages_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let query = query_params.into_inner();
    let usecase = GetMessagesUseCase {
        user_id1: query.user_id1,
        user_id2: query.user_id2,
    };

    execute(usecase, &ctx)
        .await
        .map(|messages| HttpResponse::Ok().json(APIResponse::new(messages)))
        .map_err(|e| CompanionError::from(e.0))
}

/// The conversation between two users, oldest message first
#[derive(Debug)]
pub struct GetMessagesUseCase {
    pub user_id1: ID,
    pub user_id2: ID,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseError(pub StoreError);

#[async_trait::async_trait(?Send)]
impl UseCase for GetMessagesUseCase {
    type Response = Vec<Message>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMessages";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .messages
            .find_conversation(&self.user_id1, &self.user_id2)
            .await
            .map_err(UseCaseError)
    }
}
