mod local;

pub use local::LocalNotificationScheduler;

use companion_reminders_domain::{DeliveredNotification, Trigger, ID};
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification permission has not been granted")]
    PermissionDenied,
    #[error("The trigger time {fire_at} is not in the future")]
    TriggerInPast { fire_at: i64 },
}

/// Device notification registry. At most one trigger is outstanding per
/// reminder.
pub trait INotificationScheduler: Send + Sync {
    /// Registers `trigger`, replacing and returning any trigger already
    /// outstanding for the same reminder
    fn schedule(&self, trigger: Trigger, now: i64) -> Result<Option<Trigger>, NotificationError>;
    fn cancel(&self, reminder_id: &ID) -> Option<Trigger>;
    fn find(&self, reminder_id: &ID) -> Option<Trigger>;
    /// Removes every trigger firing at or before `before`, earliest first
    fn take_due(&self, before: i64) -> Vec<Trigger>;
    /// Shows a notification to the user and notifies foreground listeners
    fn present(&self, notification: DeliveredNotification);
    fn subscribe_received(&self) -> broadcast::Receiver<DeliveredNotification>;
    fn permission(&self) -> PermissionStatus;
    fn set_permission(&self, status: PermissionStatus);
}
