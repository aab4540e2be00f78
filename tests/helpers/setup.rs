use companion_reminders_api::Application;
use companion_reminders_infra::{CompanionContext, Config, PermissionStatus};
use companion_reminders_sdk::CompanionSDK;

pub struct TestApp {
    pub config: Config,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, CompanionSDK, String) {
    let mut ctx = CompanionContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.notifications.set_permission(PermissionStatus::Granted);

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config };
    let sdk = CompanionSDK::new(address.clone());
    (app, sdk, address)
}
