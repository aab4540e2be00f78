use super::subscribers::NotifyCompanionOnEscalation;
use crate::error::CompanionError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::Duration;
use companion_reminders_api_structs::dtos::{AlertDTO, ReminderDTO, TriggerDTO};
use companion_reminders_api_structs::respond_to_alert::*;
use companion_reminders_domain::{
    format_reminder_time, AlertAction, AlertEffect, AlertTransitionError, NotificationContent,
    NotificationPayload, Reminder, ReminderAlert, ReminderPatch, RescheduleReason, Trigger,
    TriggerKind, ID,
};
use companion_reminders_infra::{CompanionContext, NotificationError, StoreError};
use tracing::warn;

async fn respond(
    reminder_id: ID,
    action: AlertAction,
    ctx: &CompanionContext,
) -> Result<HttpResponse, CompanionError> {
    let usecase = RespondToAlertUseCase {
        reminder_id,
        action,
    };

    execute(usecase, ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                alert: AlertDTO::new(res.alert),
                reminder: res.reminder.map(ReminderDTO::new),
                trigger: res.trigger.map(TriggerDTO::new),
                escalated: res.escalated,
                reschedule_error: res.reschedule_error.map(|e| e.to_string()),
            })
        })
        .map_err(CompanionError::from)
}

pub async fn complete_alert_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    respond(path_params.into_inner().reminder_id, AlertAction::Complete, &ctx).await
}

pub async fn snooze_alert_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    respond(path_params.into_inner().reminder_id, AlertAction::Snooze, &ctx).await
}

pub async fn confirm_alert_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<ConfirmRequestBody>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let action = AlertAction::Confirm {
        completed: body.completed,
    };
    respond(path_params.into_inner().reminder_id, action, &ctx).await
}

pub async fn dismiss_alert_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    respond(path_params.into_inner().reminder_id, AlertAction::Dismiss, &ctx).await
}

/// Moves the alert of a reminder to its next state and carries out the
/// resulting effects on the store and the notification scheduler
#[derive(Debug)]
pub struct RespondToAlertUseCase {
    pub reminder_id: ID,
    pub action: AlertAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RespondToAlertOutcome {
    pub alert: ReminderAlert,
    /// Present when the transition touched the stored reminder
    pub reminder: Option<Reminder>,
    pub trigger: Option<Trigger>,
    pub escalated: bool,
    /// Why the escalation could not be notified again
    pub reschedule_error: Option<NotificationError>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Transition(AlertTransitionError),
    ReminderNotFound(ID),
    Storage(StoreError),
    NotificationNotScheduled(NotificationError),
}

impl From<UseCaseError> for CompanionError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "There is no alert for the reminder with id: {}.",
                id
            )),
            UseCaseError::Transition(e) => Self::Conflict(e.to_string()),
            UseCaseError::ReminderNotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::Storage(e) => e.into(),
            UseCaseError::NotificationNotScheduled(e) => {
                let message = format!("The reminder could not be rescheduled: {}", e);
                match e {
                    NotificationError::PermissionDenied => Self::Forbidden(message),
                    NotificationError::TriggerInPast { .. } => Self::Conflict(message),
                }
            }
        }
    }
}

/// Folds the store related effects into a single write
fn reminder_patch(effects: &[AlertEffect]) -> ReminderPatch {
    let mut patch = ReminderPatch::default();
    for effect in effects {
        match effect {
            AlertEffect::MarkCompleted => patch.is_completed = Some(true),
            AlertEffect::MarkNotCompleted => patch.is_completed = Some(false),
            AlertEffect::Acknowledge => patch.is_acknowledged = Some(true),
            AlertEffect::Reschedule(_) | AlertEffect::Escalate => {}
        }
    }
    patch
}

fn reschedule_reason(effects: &[AlertEffect]) -> Option<RescheduleReason> {
    effects.iter().find_map(|effect| match effect {
        AlertEffect::Reschedule(reason) => Some(*reason),
        _ => None,
    })
}

impl RespondToAlertUseCase {
    async fn apply_patch(
        alert: &ReminderAlert,
        effects: &[AlertEffect],
        ctx: &CompanionContext,
    ) -> Result<Option<Reminder>, UseCaseError> {
        let patch = reminder_patch(effects);
        if patch.is_empty() {
            return Ok(None);
        }
        ctx.repos
            .reminders
            .update(&alert.reminder_id, &patch)
            .await
            .map(Some)
            .map_err(|e| match e {
                StoreError::NotFound => UseCaseError::ReminderNotFound(alert.reminder_id.clone()),
                e => UseCaseError::Storage(e),
            })
    }

    fn rescheduled_trigger(
        alert: &ReminderAlert,
        reason: RescheduleReason,
        ctx: &CompanionContext,
    ) -> Trigger {
        let (minutes, kind) = match reason {
            RescheduleReason::Snooze => (ctx.config.snooze_minutes, TriggerKind::Snooze),
            RescheduleReason::Escalation => {
                (ctx.config.escalation_minutes, TriggerKind::Escalation)
            }
        };
        let fire_at = ctx.sys.now() + Duration::minutes(minutes);
        let content = NotificationContent {
            title: "Reminder".into(),
            body: alert.reminder_text.clone(),
            data: NotificationPayload {
                reminder_id: alert.reminder_id.clone(),
                reminder_text: alert.reminder_text.clone(),
                reminder_time: format_reminder_time(&fire_at.with_timezone(&ctx.config.timezone)),
            },
        };
        Trigger::new(content, fire_at, kind)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RespondToAlertUseCase {
    type Response = RespondToAlertOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "RespondToAlert";

    async fn execute(&mut self, ctx: &CompanionContext) -> Result<Self::Response, Self::Error> {
        let mut alert = ctx
            .repos
            .alerts
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        // Only the local copy moves, the stored alert keeps its state until
        // the effects went through
        let effects = alert
            .transition(self.action)
            .map_err(UseCaseError::Transition)?;
        let escalated = effects.contains(&AlertEffect::Escalate);
        let now = ctx.sys.get_timestamp_millis();
        let trigger = reschedule_reason(&effects)
            .map(|reason| Self::rescheduled_trigger(&alert, reason, ctx));

        // A snooze only closes the alert once its trigger is registered
        if let (Some(trigger), false) = (&trigger, escalated) {
            ctx.notifications
                .schedule(trigger.clone(), now)
                .map_err(UseCaseError::NotificationNotScheduled)?;
        }

        let reminder = match Self::apply_patch(&alert, &effects, ctx).await {
            Ok(reminder) => reminder,
            Err(e) => {
                if trigger.is_some() && !escalated {
                    ctx.notifications.cancel(&alert.reminder_id);
                }
                return Err(e);
            }
        };

        ctx.repos.alerts.save(&alert).await;

        // The escalation stands even when the device cannot notify again
        let mut reschedule_error = None;
        let trigger = match trigger {
            Some(trigger) if escalated => match ctx.notifications.schedule(trigger.clone(), now) {
                Ok(_) => Some(trigger),
                Err(e) => {
                    warn!(
                        "Unable to re-notify escalated reminder {}: {}",
                        alert.reminder_id, e
                    );
                    reschedule_error = Some(e);
                    None
                }
            },
            trigger => trigger,
        };

        Ok(RespondToAlertOutcome {
            alert,
            reminder,
            trigger,
            escalated,
            reschedule_error,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyCompanionOnEscalation)]
    }
}
