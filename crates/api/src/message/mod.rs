mod get_messages;
mod get_messages_live;
pub mod send_message;

use actix_web::web;
use get_messages::get_messages_controller;
use get_messages_live::get_messages_live_controller;
use send_message::send_message_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/messages", web::post().to(send_message_controller));
    cfg.route("/messages", web::get().to(get_messages_controller));
    cfg.route("/messages/live", web::get().to(get_messages_live_controller));
}
