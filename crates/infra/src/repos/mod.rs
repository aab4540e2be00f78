mod alert;
mod message;
mod reminder;
pub(crate) mod shared;
mod user;

use crate::config::{AppwriteConfig, FirestoreConfig};
use crate::services::{appwrite::AppwriteRestApi, firestore::FirestoreRestApi};
use alert::InMemoryAlertRepo;
use message::{AppwriteMessageRepo, FirestoreMessageRepo, InMemoryMessageRepo};
use reminder::{AppwriteReminderRepo, FirestoreReminderRepo, InMemoryReminderRepo};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use user::{AppwriteUserRepo, FirestoreUserRepo, InMemoryUserRepo};

pub use alert::IAlertRepo;
pub use message::IMessageRepo;
pub use reminder::IReminderRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub messages: Arc<dyn IMessageRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub alerts: Arc<dyn IAlertRepo>,
}

fn required(value: &Option<String>, key: &str) -> anyhow::Result<String> {
    value
        .clone()
        .ok_or_else(|| anyhow::anyhow!("{} env var to be present.", key))
}

impl Repos {
    pub fn create_appwrite(config: &AppwriteConfig, poll_interval: Duration) -> anyhow::Result<Self> {
        let api = Arc::new(AppwriteRestApi::new(
            required(&config.endpoint, "APPWRITE_ENDPOINT")?,
            required(&config.project_id, "APPWRITE_PROJECT_ID")?,
            config.api_key.clone(),
            required(&config.database_id, "APPWRITE_DATABASE_ID")?,
        ));
        info!("Appwrite repositories created");

        Ok(Self {
            reminders: Arc::new(AppwriteReminderRepo::new(
                api.clone(),
                config.reminders_collection_id.clone(),
                poll_interval,
            )),
            messages: Arc::new(AppwriteMessageRepo::new(
                api.clone(),
                config.messages_collection_id.clone(),
                poll_interval,
            )),
            users: Arc::new(AppwriteUserRepo::new(api, config.users_collection_id.clone())),
            alerts: Arc::new(InMemoryAlertRepo::new()),
        })
    }

    pub fn create_firestore(config: &FirestoreConfig, poll_interval: Duration) -> anyhow::Result<Self> {
        let api = Arc::new(FirestoreRestApi::new(
            required(&config.project_id, "FIREBASE_PROJECT_ID")?,
            config.api_key.clone(),
            config.access_token.clone(),
        ));
        info!("Firestore repositories created");

        Ok(Self {
            reminders: Arc::new(FirestoreReminderRepo::new(
                api.clone(),
                config.reminders_collection.clone(),
                poll_interval,
            )),
            messages: Arc::new(FirestoreMessageRepo::new(
                api.clone(),
                config.messages_collection.clone(),
                poll_interval,
            )),
            users: Arc::new(FirestoreUserRepo::new(api, config.users_collection.clone())),
            alerts: Arc::new(InMemoryAlertRepo::new()),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            messages: Arc::new(InMemoryMessageRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            alerts: Arc::new(InMemoryAlertRepo::new()),
        }
    }
}
