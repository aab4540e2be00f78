use super::respond_to_alert::{RespondToAlertOutcome, RespondToAlertUseCase};
use crate::message::send_message::SendMessageUseCase;
use crate::shared::usecase::{execute, Subscriber};
use companion_reminders_infra::CompanionContext;
use tracing::warn;

/// Tells the companion who added a reminder that the patient did not do it
pub struct NotifyCompanionOnEscalation;

#[async_trait::async_trait(?Send)]
impl Subscriber<RespondToAlertUseCase> for NotifyCompanionOnEscalation {
    async fn notify(&self, e: &RespondToAlertOutcome, ctx: &CompanionContext) {
        if !e.escalated {
            return;
        }
        let reminder = match &e.reminder {
            Some(reminder) if reminder.added_by_companion() => reminder,
            _ => return,
        };

        let message = match &e.trigger {
            Some(trigger) => format!(
                "Reminder \"{}\" was not completed. It will fire again at {}.",
                reminder.title, trigger.content.data.reminder_time
            ),
            None => format!("Reminder \"{}\" was not completed.", reminder.title),
        };
        let send_message = SendMessageUseCase {
            sender_id: reminder.patient_id.clone(),
            receiver_id: reminder.added_by.clone(),
            message,
        };

        // Sideeffect, ignore result
        if execute(send_message, ctx).await.is_err() {
            warn!(
                "Unable to notify the companion about reminder: {}",
                reminder.id
            );
        }
    }
}
