mod telemetry;

use companion_reminders_api::Application;
use companion_reminders_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();
    // A missing .env file is fine, the environment is used as is
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("companion_reminders_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{:#}", e)))?;

    let app = Application::new(context).await?;
    app.start().await
}
