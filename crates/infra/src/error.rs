use thiserror::Error;

/// Failure talking to a backend store
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store responded with status {code}: {message}")]
    Backend { code: u16, message: String },
    #[error("Could not reach the store: {0}")]
    Transport(String),
    #[error("Malformed record received from the store: {0}")]
    Decode(String),
    #[error("Record not found")]
    NotFound,
}

impl StoreError {
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Backend { code, .. } => Some(*code),
            Self::NotFound => Some(404),
            _ => None,
        }
    }

    /// Message that can be shown to the user as is
    pub fn readable_message(&self) -> String {
        match self.code() {
            Some(401) => "Please sign in to continue".into(),
            Some(403) => "You don't have permission to perform this action".into(),
            Some(404) => "The requested resource was not found".into(),
            Some(429) => "Too many requests. Please try again later".into(),
            Some(500) => "Server error. Please try again later".into(),
            _ => match self {
                Self::Backend { message, .. } if !message.is_empty() => message.clone(),
                _ => "An unexpected error occurred".into(),
            },
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
