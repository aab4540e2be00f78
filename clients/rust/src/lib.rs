mod alert;
mod base;
mod message;
mod notification;
mod reminder;
mod status;
mod user;

use alert::AlertClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse, LiveStream};
use message::MessageClient;
use notification::NotificationClient;
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;

pub use alert::OpenAlertInput;
pub use message::SendMessageInput;
pub use reminder::{CreateReminderInput, UpdateReminderInput};
pub use user::RegisterUserInput;

pub use companion_reminders_api_structs::dtos::*;
pub use companion_reminders_api_structs::JobStatusDTO;
pub use companion_reminders_domain::{AlertOutcome, AlertState, TriggerKind, ID};
pub use reqwest::StatusCode;

// Domain
pub use companion_reminders_api_structs::dtos::AlertDTO as Alert;
pub use companion_reminders_api_structs::dtos::MessageDTO as Message;
pub use companion_reminders_api_structs::dtos::ReminderDTO as Reminder;
pub use companion_reminders_api_structs::dtos::TriggerDTO as Trigger;
pub use companion_reminders_api_structs::dtos::UserDTO as User;

/// Companion Reminders Server SDK
///
/// The SDK contains methods for interacting with the Companion Reminders
/// server API.
#[derive(Clone)]
pub struct CompanionSDK {
    pub alert: AlertClient,
    pub message: MessageClient,
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl CompanionSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let alert = AlertClient::new(base.clone());
        let message = MessageClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            alert,
            message,
            notification,
            reminder,
            status,
            user,
        }
    }
}
