mod create_reminder;
mod get_reminder;
mod get_reminders;
mod sync_reminders;
mod toggle_reminder_completion;
mod update_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use sync_reminders::sync_reminders_controller;
use toggle_reminder_completion::toggle_reminder_completion_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/users/{user_id}/reminders",
        web::post().to(create_reminder_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders",
        web::get().to(get_reminders_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders/live",
        web::get().to(sync_reminders_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::patch().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/toggle-completion",
        web::post().to(toggle_reminder_completion_controller),
    );
}
