use crate::supervisor::{JobFactory, Supervisor};
use actix_web::rt::time::interval;
use awc::Client;
use companion_reminders_api_structs::dtos::DeliveredNotificationDTO;
use companion_reminders_domain::DeliveredNotification;
use companion_reminders_infra::CompanionContext;
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub const DELIVERY_JOB: &str = "notification-delivery";

pub fn start_job_schedulers(ctx: CompanionContext, supervisor: &Supervisor) {
    supervisor.supervise(DELIVERY_JOB, delivery_job(ctx));
}

/// Presents every trigger whose fire time has passed, checked once a second
pub fn delivery_job(ctx: CompanionContext) -> JobFactory {
    Arc::new(move || run_delivery(ctx.clone()).boxed_local())
}

async fn run_delivery(ctx: CompanionContext) -> anyhow::Result<()> {
    let client = Client::new();
    let mut ticker = interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let delivered = deliver_due_notifications(&ctx);
        if let Some(url) = &ctx.config.notification_webhook_url {
            for notification in delivered {
                post_to_webhook(&client, url, notification).await;
            }
        }
    }
}

pub fn deliver_due_notifications(ctx: &CompanionContext) -> Vec<DeliveredNotification> {
    let now = ctx.sys.get_timestamp_millis();
    ctx.notifications
        .take_due(now)
        .into_iter()
        .map(|trigger| {
            info!(
                "Delivering {:?} notification for reminder: {}",
                trigger.kind, trigger.reminder_id
            );
            let notification = DeliveredNotification::new(trigger, now);
            ctx.notifications.present(notification.clone());
            notification
        })
        .collect()
}

async fn post_to_webhook(client: &Client, url: &str, notification: DeliveredNotification) {
    if let Err(e) = client
        .post(url)
        .send_json(&DeliveredNotificationDTO::new(notification))
        .await
    {
        error!("Error informing webhook of delivered notification: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use companion_reminders_domain::{
        NotificationContent, NotificationPayload, Trigger, TriggerKind, ID,
    };
    use companion_reminders_infra::{PermissionStatus, StaticTimeSys};

    fn trigger(fire_at: chrono::DateTime<Utc>) -> Trigger {
        let content = NotificationContent {
            title: "Reminder".into(),
            body: "Take pills".into(),
            data: NotificationPayload {
                reminder_id: ID::new(),
                reminder_text: "Take pills".into(),
                reminder_time: "9:00 AM".into(),
            },
        };
        Trigger::new(content, fire_at, TriggerKind::Initial)
    }

    #[actix_web::main]
    #[test]
    async fn delivers_only_due_triggers() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let mut ctx = CompanionContext::create_inmemory();
        ctx.notifications.set_permission(PermissionStatus::Granted);
        ctx.sys = Arc::new(StaticTimeSys(start.timestamp_millis()));

        let due = trigger(start + ChronoDuration::minutes(5));
        let later = trigger(start + ChronoDuration::minutes(30));
        let now = start.timestamp_millis();
        ctx.notifications.schedule(due.clone(), now).unwrap();
        ctx.notifications.schedule(later.clone(), now).unwrap();
        let mut received = ctx.notifications.subscribe_received();

        let at = (start + ChronoDuration::minutes(10)).timestamp_millis();
        ctx.sys = Arc::new(StaticTimeSys(at));
        let delivered = deliver_due_notifications(&ctx);

        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].content.data.reminder_id, due.reminder_id);
        assert_eq!(delivered[0].delivered_at, at);
        assert_eq!(received.recv().await.unwrap(), delivered[0]);
        assert!(ctx.notifications.find(&due.reminder_id).is_none());
        assert_eq!(ctx.notifications.find(&later.reminder_id), Some(later));
    }
}
