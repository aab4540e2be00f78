mod alert;
mod message;
mod notification;
mod reminder;
mod shared;
mod time_parse;
mod user;

pub use alert::{
    AlertAction, AlertEffect, AlertOutcome, AlertState, AlertTransitionError, ReminderAlert,
    RescheduleReason,
};
pub use message::{Message, NewMessage};
pub use notification::{
    DeliveredNotification, NotificationContent, NotificationPayload, Trigger, TriggerKind,
};
pub use reminder::{NewReminder, Reminder, ReminderPatch};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use time_parse::{format_reminder_time, parse_reminder_time, TimeParseError};
pub use user::{NewUser, User};

pub use chrono_tz::Tz;
