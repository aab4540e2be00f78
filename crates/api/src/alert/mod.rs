mod get_alert;
mod open_alert;
mod respond_to_alert;
mod subscribers;

use actix_web::web;
use get_alert::get_alert_controller;
use open_alert::open_alert_controller;
use respond_to_alert::{
    complete_alert_controller, confirm_alert_controller, dismiss_alert_controller,
    snooze_alert_controller,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/alerts", web::post().to(open_alert_controller));
    cfg.route("/alerts/{reminder_id}", web::get().to(get_alert_controller));
    cfg.route(
        "/alerts/{reminder_id}/complete",
        web::post().to(complete_alert_controller),
    );
    cfg.route(
        "/alerts/{reminder_id}/snooze",
        web::post().to(snooze_alert_controller),
    );
    cfg.route(
        "/alerts/{reminder_id}/confirm",
        web::post().to(confirm_alert_controller),
    );
    cfg.route(
        "/alerts/{reminder_id}/dismiss",
        web::post().to(dismiss_alert_controller),
    );
}
