use companion_reminders_domain::{
    DeliveredNotification, NotificationContent, Trigger, TriggerKind, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDTO {
    pub reminder_id: ID,
    pub fire_at: i64,
    pub kind: TriggerKind,
    pub content: NotificationContent,
}

impl TriggerDTO {
    pub fn new(trigger: Trigger) -> Self {
        Self {
            reminder_id: trigger.reminder_id,
            fire_at: trigger.fire_at,
            kind: trigger.kind,
            content: trigger.content,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredNotificationDTO {
    pub content: NotificationContent,
    pub kind: TriggerKind,
    pub fire_at: i64,
    pub delivered_at: i64,
}

impl DeliveredNotificationDTO {
    pub fn new(notification: DeliveredNotification) -> Self {
        Self {
            content: notification.content,
            kind: notification.kind,
            fire_at: notification.fire_at,
            delivered_at: notification.delivered_at,
        }
    }
}
