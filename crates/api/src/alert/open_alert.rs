use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::open_alert::*;
use companion_reminders_domain::{NotificationPayload, ReminderAlert};
use companion_reminders_infra::CompanionContext;

pub async fn open_alert_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let body = body.0;
    let usecase = OpenAlertUseCase {
        payload: NotificationPayload {
            reminder_id: body.reminder_id,
            reminder_text: body.reminder_text,
            reminder_time: body.reminder_time,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|alert| HttpResponse::Created().json(APIResponse::new(alert)))
        .map_err(CompanionError::from)
}

/// The patient tapped a reminder notification
#[derive(Debug)]
pub struct OpenAlertUseCase {
    pub payload: NotificationPayload,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyReminderText,
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyReminderText => {
                Self::BadClientData("The notification has no reminder text".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for OpenAlertUseCase {
    type Response = ReminderAlert;

    type Error = UseCaseError;

    const NAME: &'static str = "OpenAlert";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        if self.payload.reminder_text.trim().is_empty() {
            return Err(UseCaseError::EmptyReminderText);
        }

        let alert = ReminderAlert::open(self.payload.clone(), ctx.sys.get_timestamp_millis());
        ctx.repos.alerts.save(&alert).await;
        Ok(alert)
    }
}
