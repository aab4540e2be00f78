use crate::error::CompanionError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::create_reminder::*;
use companion_reminders_domain::{
    parse_reminder_time, NewReminder, NotificationContent, Reminder, TimeParseError, Trigger,
    TriggerKind, ID,
};
use companion_reminders_infra::{CompanionContext, NotificationError, StoreError};

pub async fn create_reminder_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let body = body.0;
    let patient_id = path_params.into_inner().user_id;
    let usecase = CreateReminderUseCase {
        added_by: body.added_by.unwrap_or_else(|| patient_id.clone()),
        patient_id,
        title: body.title,
        description: body.description,
        time: body.time,
    };

    execute(usecase, &ctx)
        .await
        .map(|(reminder, trigger)| HttpResponse::Created().json(APIResponse::new(reminder, trigger)))
        .map_err(CompanionError::from)
}

/// The add reminder form: persists the reminder and registers its
/// notification
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub patient_id: ID,
    pub added_by: ID,
    pub title: String,
    pub description: Option<String>,
    /// Wall clock time as entered by the user
    pub time: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    EmptyTime,
    InvalidTime(TimeParseError),
    PatientNotFound(ID),
    CompanionNotPermitted(ID),
    Storage(StoreError),
    /// The reminder was saved but the device will not be notified
    NotificationNotScheduled {
        reminder_id: ID,
        error: NotificationError,
    },
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("Please enter a reminder title".into()),
            UseCaseError::EmptyTime => Self::BadClientData("Please enter a reminder time".into()),
            UseCaseError::InvalidTime(e) => Self::BadClientData(format!(
                "{}. Use a time like 9:00 AM or 21:30",
                e
            )),
            UseCaseError::PatientNotFound(id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", id))
            }
            UseCaseError::CompanionNotPermitted(id) => Self::Forbidden(format!(
                "The user with id: {} does not allow companions to add reminders.",
                id
            )),
            UseCaseError::Storage(e) => e.into(),
            UseCaseError::NotificationNotScheduled { reminder_id, error } => {
                let message = format!(
                    "The reminder with id: {} was saved, but its notification could not be scheduled: {}",
                    reminder_id, error
                );
                match error {
                    NotificationError::PermissionDenied => Self::Forbidden(message),
                    NotificationError::TriggerInPast { .. } => Self::Conflict(message),
                }
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = (Reminder, Trigger);

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        let time = self.time.trim();
        if time.is_empty() {
            return Err(UseCaseError::EmptyTime);
        }

        let now = ctx.sys.now().with_timezone(&ctx.config.timezone);
        let due_date = parse_reminder_time(time, &now).map_err(UseCaseError::InvalidTime)?;

        let patient = match ctx.repos.users.find(&self.patient_id).await {
            Ok(Some(patient)) => patient,
            Ok(None) => return Err(UseCaseError::PatientNotFound(self.patient_id.clone())),
            Err(e) => return Err(UseCaseError::Storage(e)),
        };
        if !patient.accepts_reminders_from(&self.added_by) {
            return Err(UseCaseError::CompanionNotPermitted(patient.id));
        }

        let reminder = ctx
            .repos
            .reminders
            .create(NewReminder {
                title: title.to_string(),
                description: self
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(String::from),
                due_date: due_date.with_timezone(&chrono::Utc),
                patient_id: patient.id,
                added_by: self.added_by.clone(),
            })
            .await
            .map_err(UseCaseError::Storage)?;

        let content = NotificationContent::for_reminder(&reminder, time.to_string());
        let trigger = Trigger::new(content, reminder.due_date, TriggerKind::Initial);
        ctx.notifications
            .schedule(trigger.clone(), ctx.sys.get_timestamp_millis())
            .map_err(|error| UseCaseError::NotificationNotScheduled {
                reminder_id: reminder.id.clone(),
                error,
            })?;

        Ok((reminder, trigger))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use companion_reminders_domain::{NewUser, Tz, User};
    use companion_reminders_infra::{PermissionStatus, StaticTimeSys};
    use std::sync::Arc;

    struct TestContext {
        ctx: CompanionContext,
        patient: User,
    }

    async fn setup() -> TestContext {
        let mut ctx = CompanionContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
                .unwrap()
                .timestamp_millis(),
        ));
        ctx.notifications.set_permission(PermissionStatus::Granted);
        let patient = ctx
            .repos
            .users
            .insert(NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                username: "ada".into(),
                shareable_id: "ABC123".into(),
            })
            .await
            .unwrap();

        TestContext { ctx, patient }
    }

    fn usecase(patient: &User, title: &str, time: &str) -> CreateReminderUseCase {
        CreateReminderUseCase {
            patient_id: patient.id.clone(),
            added_by: patient.id.clone(),
            title: title.into(),
            description: None,
            time: time.into(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_with_exactly_one_trigger() {
        let TestContext { ctx, patient } = setup().await;

        let (reminder, trigger) = usecase(&patient, " Take pills ", "9:00 AM")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(reminder.title, "Take pills");
        assert_eq!(
            reminder.due_date,
            Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap()
        );
        assert_eq!(trigger.reminder_id, reminder.id);
        assert_eq!(trigger.content.data.reminder_time, "9:00 AM");
        assert_eq!(ctx.notifications.find(&reminder.id), Some(trigger));
        assert_eq!(ctx.notifications.take_due(i64::MAX).len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_input_before_touching_stores() {
        let TestContext { ctx, patient } = setup().await;

        let res = usecase(&patient, "   ", "9:00 AM").execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyTitle);
        let res = usecase(&patient, "Take pills", "").execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyTime);

        assert!(ctx
            .repos
            .reminders
            .find_by_patient(&patient.id)
            .await
            .unwrap()
            .is_empty());
        assert!(ctx.notifications.take_due(i64::MAX).is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_time() {
        let TestContext { ctx, patient } = setup().await;

        let res = usecase(&patient, "Take pills", "13:99").execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidTime(TimeParseError::InvalidFormat)
        );
    }

    #[actix_web::main]
    #[test]
    async fn companion_needs_permission_of_patient() {
        let TestContext { ctx, patient } = setup().await;
        let companion = ID::new();

        let mut uc = usecase(&patient, "Drink water", "14:00");
        uc.added_by = companion.clone();
        let res = uc.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::CompanionNotPermitted(patient.id.clone())
        );

        ctx.repos
            .users
            .set_companion_can_add_task(&patient.id, true)
            .await
            .unwrap();
        let (reminder, _) = uc.execute(&ctx).await.unwrap();
        assert_eq!(reminder.added_by, companion);
        assert!(reminder.added_by_companion());
    }

    #[actix_web::main]
    #[test]
    async fn reports_saved_reminder_when_notification_fails() {
        let TestContext { ctx, patient } = setup().await;
        ctx.notifications.set_permission(PermissionStatus::Denied);

        let res = usecase(&patient, "Take pills", "9:00 AM").execute(&ctx).await;
        let saved = ctx
            .repos
            .reminders
            .find_by_patient(&patient.id)
            .await
            .unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::NotificationNotScheduled {
                reminder_id: saved[0].id.clone(),
                error: NotificationError::PermissionDenied,
            }
        );
    }
}
