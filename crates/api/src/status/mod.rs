mod get_companion_status;
mod send_test_message;

use crate::supervisor::{JobStatus, Supervisor};
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::{get_service_health, reset_jobs, JobStatusDTO};
use get_companion_status::get_companion_status_controller;
use send_test_message::send_test_message_controller;

fn job_dtos(statuses: Vec<JobStatus>) -> Vec<JobStatusDTO> {
    statuses
        .into_iter()
        .map(|status| JobStatusDTO {
            name: status.name,
            running: status.running,
            fault: status.fault,
        })
        .collect()
}

async fn status(supervisor: web::Data<Supervisor>) -> HttpResponse {
    HttpResponse::Ok().json(get_service_health::APIResponse {
        message: "Yo! We are up!\r\n".into(),
        jobs: job_dtos(supervisor.statuses()),
    })
}

async fn reset_jobs_controller(supervisor: web::Data<Supervisor>) -> HttpResponse {
    HttpResponse::Ok().json(reset_jobs::APIResponse {
        jobs: job_dtos(supervisor.reset()),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
    cfg.route("/status/jobs/reset", web::post().to(reset_jobs_controller));
    cfg.route(
        "/companion/status",
        web::get().to(get_companion_status_controller),
    );
    cfg.route(
        "/companion/test-message",
        web::post().to(send_test_message_controller),
    );
}
