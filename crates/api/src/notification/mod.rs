mod get_pending_notification;
mod get_received_notifications_live;

use actix_web::web;
use get_pending_notification::get_pending_notification_controller;
use get_received_notifications_live::get_received_notifications_live_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/received/live",
        web::get().to(get_received_notifications_live_controller),
    );
    cfg.route(
        "/notifications/{reminder_id}",
        web::get().to(get_pending_notification_controller),
    );
}
