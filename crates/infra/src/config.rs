use companion_reminders_domain::Tz;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

/// Which document store the reminders, messages and users live in.
/// Resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Appwrite,
    Firestore,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inmemory" | "memory" => Ok(Self::InMemory),
            "appwrite" => Ok(Self::Appwrite),
            "firestore" | "firebase" => Ok(Self::Firestore),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InMemory => "inmemory",
            Self::Appwrite => "appwrite",
            Self::Firestore => "firestore",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// E.g. https://cloud.appwrite.io/v1
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    /// Server API key sent as `X-Appwrite-Key`
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub users_collection_id: String,
    pub messages_collection_id: String,
    pub reminders_collection_id: String,
}

impl AppwriteConfig {
    fn from_env() -> Self {
        Self {
            endpoint: optional_env("APPWRITE_ENDPOINT"),
            project_id: optional_env("APPWRITE_PROJECT_ID"),
            api_key: optional_env("APPWRITE_API_KEY"),
            database_id: optional_env("APPWRITE_DATABASE_ID"),
            users_collection_id: env_or("APPWRITE_USERS_COLLECTION_ID", "users".to_string()),
            messages_collection_id: env_or(
                "APPWRITE_MESSAGES_COLLECTION_ID",
                "messages_table".to_string(),
            ),
            reminders_collection_id: env_or(
                "APPWRITE_REMINDERS_COLLECTION_ID",
                "reminders_table".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: Option<String>,
    /// Web API key appended as the `key` query parameter
    pub api_key: Option<String>,
    /// OAuth2 bearer token for server side access
    pub access_token: Option<String>,
    pub users_collection: String,
    pub messages_collection: String,
    pub reminders_collection: String,
}

impl FirestoreConfig {
    fn from_env() -> Self {
        Self {
            project_id: optional_env("FIREBASE_PROJECT_ID"),
            api_key: optional_env("FIREBASE_API_KEY"),
            access_token: optional_env("FIREBASE_ACCESS_TOKEN"),
            users_collection: env_or("FIREBASE_USERS_COLLECTION", "users".to_string()),
            messages_collection: env_or("FIREBASE_MESSAGES_COLLECTION", "messages".to_string()),
            reminders_collection: env_or(
                "FIREBASE_REMINDERS_COLLECTION",
                "reminders".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    pub store_backend: StoreBackend,
    pub appwrite: AppwriteConfig,
    pub firestore: FirestoreConfig,
    /// Time zone the wall clock times entered by users are interpreted in
    pub timezone: Tz,
    /// How far a snoozed reminder is pushed back
    pub snooze_minutes: i64,
    /// Delay before a reminder the patient did not complete fires again
    pub escalation_minutes: i64,
    /// How often remote stores are polled to emulate realtime subscriptions
    pub store_poll_interval_secs: u64,
    /// Initial notification permission of the device
    pub notifications_permitted: bool,
    /// Every delivered notification is also posted here when set
    pub notification_webhook_url: Option<String>,
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let store_backend = env_or("STORE_BACKEND", StoreBackend::InMemory);
        info!("Using the {} store backend", store_backend);

        let mut snooze_minutes = env_or("SNOOZE_MINUTES", 10);
        if snooze_minutes <= 0 {
            warn!("SNOOZE_MINUTES must be positive, falling back to 10.");
            snooze_minutes = 10;
        }
        let mut escalation_minutes = env_or("ESCALATION_MINUTES", 10);
        if escalation_minutes <= 0 {
            warn!("ESCALATION_MINUTES must be positive, falling back to 10.");
            escalation_minutes = 10;
        }

        Self {
            port: env_or("PORT", 5000),
            store_backend,
            appwrite: AppwriteConfig::from_env(),
            firestore: FirestoreConfig::from_env(),
            timezone: env_or("REMINDER_TIMEZONE", Tz::UTC),
            snooze_minutes,
            escalation_minutes,
            store_poll_interval_secs: env_or("STORE_POLL_INTERVAL_SECS", 5).max(1),
            notifications_permitted: env_or("NOTIFICATIONS_PERMITTED", true),
            notification_webhook_url: optional_env("NOTIFICATION_WEBHOOK_URL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backends() {
        assert_eq!("appwrite".parse(), Ok(StoreBackend::Appwrite));
        assert_eq!("Firebase".parse(), Ok(StoreBackend::Firestore));
        assert_eq!("inmemory".parse(), Ok(StoreBackend::InMemory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn falls_back_on_invalid_values() {
        std::env::set_var("COMPANION_TEST_INVALID_NUMBER", "abc");
        assert_eq!(env_or("COMPANION_TEST_INVALID_NUMBER", 42), 42);
        std::env::set_var("COMPANION_TEST_VALID_NUMBER", "7");
        assert_eq!(env_or("COMPANION_TEST_VALID_NUMBER", 42), 7);
        assert_eq!(env_or("COMPANION_TEST_MISSING_NUMBER", 42), 42);
    }

    #[test]
    fn parses_time_zones() {
        std::env::set_var("COMPANION_TEST_TZ", "Europe/Oslo");
        assert_eq!(env_or("COMPANION_TEST_TZ", Tz::UTC), Tz::Europe__Oslo);
    }
}
