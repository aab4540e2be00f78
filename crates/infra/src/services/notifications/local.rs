use super::{INotificationScheduler, NotificationError, PermissionStatus};
use companion_reminders_domain::{DeliveredNotification, Trigger, ID};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::info;

const RECEIVED_CAPACITY: usize = 64;

/// Notification scheduler for the local device, triggers are kept in memory
pub struct LocalNotificationScheduler {
    triggers: Mutex<Vec<Trigger>>,
    permission: Mutex<PermissionStatus>,
    received: broadcast::Sender<DeliveredNotification>,
}

impl LocalNotificationScheduler {
    pub fn new(permission: PermissionStatus) -> Self {
        let (received, _) = broadcast::channel(RECEIVED_CAPACITY);
        Self {
            triggers: Mutex::new(Vec::new()),
            permission: Mutex::new(permission),
            received,
        }
    }

    fn triggers(&self) -> MutexGuard<'_, Vec<Trigger>> {
        self.triggers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl INotificationScheduler for LocalNotificationScheduler {
    fn schedule(&self, trigger: Trigger, now: i64) -> Result<Option<Trigger>, NotificationError> {
        if self.permission() != PermissionStatus::Granted {
            return Err(NotificationError::PermissionDenied);
        }
        if trigger.fire_at <= now {
            return Err(NotificationError::TriggerInPast {
                fire_at: trigger.fire_at,
            });
        }

        let mut triggers = self.triggers();
        let replaced = triggers
            .iter()
            .position(|t| t.reminder_id == trigger.reminder_id)
            .map(|i| triggers.remove(i));
        triggers.push(trigger);
        Ok(replaced)
    }

    fn cancel(&self, reminder_id: &ID) -> Option<Trigger> {
        let mut triggers = self.triggers();
        triggers
            .iter()
            .position(|t| t.reminder_id == *reminder_id)
            .map(|i| triggers.remove(i))
    }

    fn find(&self, reminder_id: &ID) -> Option<Trigger> {
        self.triggers()
            .iter()
            .find(|t| t.reminder_id == *reminder_id)
            .cloned()
    }

    fn take_due(&self, before: i64) -> Vec<Trigger> {
        let mut triggers = self.triggers();
        let (mut due, pending): (Vec<_>, Vec<_>) =
            triggers.drain(..).partition(|t| t.fire_at <= before);
        *triggers = pending;
        due.sort_by_key(|t| t.fire_at);
        due
    }

    fn present(&self, notification: DeliveredNotification) {
        info!(
            "Presenting notification for reminder: {}",
            notification.content.data.reminder_id
        );
        // No listeners is fine
        let _ = self.received.send(notification);
    }

    fn subscribe_received(&self) -> broadcast::Receiver<DeliveredNotification> {
        self.received.subscribe()
    }

    fn permission(&self) -> PermissionStatus {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_permission(&self, status: PermissionStatus) {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use companion_reminders_domain::{NotificationContent, NotificationPayload, TriggerKind};

    fn trigger(reminder_id: &ID, fire_at: i64, kind: TriggerKind) -> Trigger {
        let content = NotificationContent {
            title: "Reminder".into(),
            body: "Take pills".into(),
            data: NotificationPayload {
                reminder_id: reminder_id.clone(),
                reminder_text: "Take pills".into(),
                reminder_time: "9:00 AM".into(),
            },
        };
        let fire_at = Utc.timestamp_millis_opt(fire_at).unwrap();
        Trigger::new(content, fire_at, kind)
    }

    #[test]
    fn scheduling_replaces_outstanding_trigger() {
        let scheduler = LocalNotificationScheduler::new(PermissionStatus::Granted);
        let id = ID::new();

        assert_eq!(
            scheduler.schedule(trigger(&id, 1000, TriggerKind::Initial), 0),
            Ok(None)
        );
        let replaced = scheduler
            .schedule(trigger(&id, 2000, TriggerKind::Snooze), 500)
            .unwrap()
            .unwrap();
        assert_eq!(replaced.fire_at, 1000);

        let outstanding = scheduler.find(&id).unwrap();
        assert_eq!(outstanding.fire_at, 2000);
        assert_eq!(outstanding.kind, TriggerKind::Snooze);
        assert_eq!(scheduler.take_due(i64::MAX).len(), 1);
    }

    #[test]
    fn rejects_schedule_without_permission_or_in_past() {
        let scheduler = LocalNotificationScheduler::new(PermissionStatus::Denied);
        let id = ID::new();
        assert_eq!(
            scheduler.schedule(trigger(&id, 1000, TriggerKind::Initial), 0),
            Err(NotificationError::PermissionDenied)
        );

        scheduler.set_permission(PermissionStatus::Granted);
        assert_eq!(
            scheduler.schedule(trigger(&id, 1000, TriggerKind::Initial), 1000),
            Err(NotificationError::TriggerInPast { fire_at: 1000 })
        );
        assert!(scheduler.find(&id).is_none());
    }

    #[test]
    fn takes_due_triggers_in_fire_order() {
        let scheduler = LocalNotificationScheduler::new(PermissionStatus::Granted);
        let (a, b, c) = (ID::new(), ID::new(), ID::new());
        scheduler.schedule(trigger(&a, 3000, TriggerKind::Initial), 0).unwrap();
        scheduler.schedule(trigger(&b, 1000, TriggerKind::Initial), 0).unwrap();
        scheduler.schedule(trigger(&c, 9000, TriggerKind::Initial), 0).unwrap();

        let due = scheduler.take_due(3000);
        assert_eq!(
            due.iter().map(|t| t.reminder_id.clone()).collect::<Vec<_>>(),
            vec![b, a]
        );
        assert!(scheduler.find(&c).is_some());
        assert_eq!(scheduler.cancel(&c).map(|t| t.fire_at), Some(9000));
        assert!(scheduler.take_due(i64::MAX).is_empty());
    }

    #[tokio::test]
    async fn presented_notifications_reach_listeners() {
        let scheduler = LocalNotificationScheduler::new(PermissionStatus::Granted);
        let mut received = scheduler.subscribe_received();
        let id = ID::new();
        let t = trigger(&id, 1000, TriggerKind::Initial);

        scheduler.present(DeliveredNotification::new(t, 1000));
        let delivered = received.recv().await.unwrap();
        assert_eq!(delivered.content.data.reminder_id, id);
    }
}
