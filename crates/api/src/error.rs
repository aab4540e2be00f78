use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use companion_reminders_infra::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Forbidden. Error message: `{0}`")]
    Forbidden(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Too many requests. Error message: `{0}`")]
    TooManyRequests(String),
    #[error("The reminder store failed. Error message: `{0}`")]
    StoreUnavailable(String),
}

impl actix_web::error::ResponseError for CompanionError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::StoreUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(self.to_string())
    }
}

impl From<StoreError> for CompanionError {
    fn from(e: StoreError) -> Self {
        let message = e.readable_message();
        match e {
            StoreError::Decode(_) => Self::InternalError,
            _ => match e.code() {
                Some(401) => Self::Unauthorized(message),
                Some(403) => Self::Forbidden(message),
                Some(404) => Self::NotFound(message),
                Some(429) => Self::TooManyRequests(message),
                _ => Self::StoreUnavailable(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn store_errors_keep_their_meaning() {
        let e = CompanionError::from(StoreError::Backend {
            code: 401,
            message: "user_unauthorized".into(),
        });
        assert_eq!(e.status_code(), StatusCode::UNAUTHORIZED);
        assert!(e.to_string().contains("Please sign in to continue"));

        let e = CompanionError::from(StoreError::Backend {
            code: 500,
            message: "".into(),
        });
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
        assert!(e.to_string().contains("Server error. Please try again later"));

        let e = CompanionError::from(StoreError::NotFound);
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);

        let e = CompanionError::from(StoreError::Decode("missing title".into()));
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
