mod config;
mod error;
mod repos;
mod services;
mod subscription;
mod system;

pub use config::{AppwriteConfig, Config, FirestoreConfig, StoreBackend};
pub use error::StoreError;
pub use repos::{IAlertRepo, IMessageRepo, IReminderRepo, IUserRepo, Repos};
pub use services::notifications::{
    INotificationScheduler, LocalNotificationScheduler, NotificationError, PermissionStatus,
};
pub use subscription::{forward_broadcast, poll_changes, Change, Subscription};
pub use system::{ISys, RealSys, StaticTimeSys};

use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct CompanionContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifications: Arc<dyn INotificationScheduler>,
}

fn local_notifications(config: &Config) -> Arc<dyn INotificationScheduler> {
    let permission = if config.notifications_permitted {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };
    Arc::new(LocalNotificationScheduler::new(permission))
}

impl CompanionContext {
    fn create(config: Config) -> anyhow::Result<Self> {
        let poll_interval = Duration::from_secs(config.store_poll_interval_secs);
        let repos = match config.store_backend {
            StoreBackend::InMemory => Repos::create_inmemory(),
            StoreBackend::Appwrite => Repos::create_appwrite(&config.appwrite, poll_interval)?,
            StoreBackend::Firestore => Repos::create_firestore(&config.firestore, poll_interval)?,
        };
        Ok(Self {
            repos,
            notifications: local_notifications(&config),
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory() -> Self {
        let config = Config::new();
        Self {
            repos: Repos::create_inmemory(),
            notifications: local_notifications(&config),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> anyhow::Result<CompanionContext> {
    CompanionContext::create(Config::new())
}
