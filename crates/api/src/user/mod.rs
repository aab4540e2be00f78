mod get_user;
mod get_user_by_shareable_id;
mod register_user;
mod update_user_settings;

use actix_web::web;
use get_user::get_user_controller;
use get_user_by_shareable_id::get_user_by_shareable_id_controller;
use register_user::register_user_controller;
use update_user_settings::update_user_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(register_user_controller));
    cfg.route("/users/{user_id}", web::get().to(get_user_controller));
    cfg.route(
        "/users/shareable/{shareable_id}",
        web::get().to(get_user_by_shareable_id_controller),
    );
    cfg.route(
        "/users/{user_id}/settings",
        web::put().to(update_user_settings_controller),
    );
}
