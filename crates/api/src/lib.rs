mod alert;
mod error;
mod job_schedulers;
mod message;
mod notification;
mod reminder;
mod shared;
mod status;
mod supervisor;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use companion_reminders_infra::CompanionContext;
use job_schedulers::start_job_schedulers;
use std::net::TcpListener;
pub use supervisor::{JobStatus, Supervisor};
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    alert::configure_routes(cfg);
    message::configure_routes(cfg);
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: CompanionContext) -> Result<Self, std::io::Error> {
        let supervisor = Supervisor::new();
        start_job_schedulers(context.clone(), &supervisor);
        let (server, port) = Application::configure_server(context, supervisor).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(
        context: CompanionContext,
        supervisor: Supervisor,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let ctx = web::Data::new(context);
        let supervisor = web::Data::new(supervisor);
        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(ctx.clone())
                .app_data(supervisor.clone())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
