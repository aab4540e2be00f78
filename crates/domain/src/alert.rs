use crate::{notification::NotificationPayload, shared::entity::ID, Entity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertOutcome {
    /// The patient confirmed the task was done
    Confirmed,
    /// The patient said the task was not done after all
    NotCompleted,
    Snoozed,
    /// Closed without answering
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "outcome")]
pub enum AlertState {
    /// Showing the reminder with the complete and snooze actions
    Initial,
    /// Asking "did you complete this task?"
    AwaitingConfirmation,
    Closed(AlertOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertAction {
    Complete,
    Snooze,
    Confirm { completed: bool },
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RescheduleReason {
    Snooze,
    Escalation,
}

/// Side effects the caller has to carry out after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertEffect {
    /// Persist `is_completed = true`
    MarkCompleted,
    /// Persist `is_completed = false`
    MarkNotCompleted,
    /// Persist `is_acknowledged = true`
    Acknowledge,
    /// Replace the outstanding trigger with a new one later on
    Reschedule(RescheduleReason),
    /// Tell the people looking after the patient that the task was not done
    Escalate,
}

#[derive(Debug, Error, PartialEq)]
pub enum AlertTransitionError {
    #[error("The alert is already closed")]
    AlreadyClosed,
    #[error("Action {action:?} is not possible while the alert is {state:?}")]
    InvalidTransition {
        state: AlertState,
        action: AlertAction,
    },
}

/// The alert shown after the patient taps a reminder notification
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderAlert {
    pub reminder_id: ID,
    pub reminder_text: String,
    pub reminder_time: String,
    pub state: AlertState,
    /// Timestamp in millis
    pub opened_at: i64,
}

impl ReminderAlert {
    pub fn open(payload: NotificationPayload, opened_at: i64) -> Self {
        Self {
            reminder_id: payload.reminder_id,
            reminder_text: payload.reminder_text,
            reminder_time: payload.reminder_time,
            state: AlertState::Initial,
            opened_at,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, AlertState::Closed(_))
    }

    pub fn transition(
        &mut self,
        action: AlertAction,
    ) -> Result<Vec<AlertEffect>, AlertTransitionError> {
        use AlertEffect::*;

        let (next, effects) = match (self.state, action) {
            (AlertState::Closed(_), _) => return Err(AlertTransitionError::AlreadyClosed),
            (AlertState::Initial, AlertAction::Complete) => {
                (AlertState::AwaitingConfirmation, vec![MarkCompleted])
            }
            (AlertState::Initial, AlertAction::Snooze) => (
                AlertState::Closed(AlertOutcome::Snoozed),
                vec![Acknowledge, Reschedule(RescheduleReason::Snooze)],
            ),
            (AlertState::AwaitingConfirmation, AlertAction::Confirm { completed: true }) => (
                AlertState::Closed(AlertOutcome::Confirmed),
                vec![Acknowledge],
            ),
            (AlertState::AwaitingConfirmation, AlertAction::Confirm { completed: false }) => (
                AlertState::Closed(AlertOutcome::NotCompleted),
                vec![
                    MarkNotCompleted,
                    Reschedule(RescheduleReason::Escalation),
                    Escalate,
                ],
            ),
            (_, AlertAction::Dismiss) => (AlertState::Closed(AlertOutcome::Dismissed), vec![]),
            (state, action) => {
                return Err(AlertTransitionError::InvalidTransition { state, action })
            }
        };

        self.state = next;
        Ok(effects)
    }
}

impl Entity<ID> for ReminderAlert {
    fn id(&self) -> ID {
        self.reminder_id.clone()
    }
}
