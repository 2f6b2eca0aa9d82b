use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
///
/// Credential failures carry their specific reason (normal authentication
/// disclosure); delivery and storage faults render as a generic internal
/// error so infrastructure detail never reaches callers.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("email is required")]
    EmailRequired,
    #[error("email and OTP are required")]
    MissingCredentials,
    #[error("username and email are required")]
    MissingUserFields,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid OTP")]
    InvalidOtp,
    #[error("OTP expired")]
    OtpExpired,
    #[error("invalid session")]
    InvalidSession,
    #[error("email already in use")]
    EmailInUse,
    #[error("internal server error")]
    Delivery(#[source] anyhow::Error),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmailRequired => "EMAIL_REQUIRED",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::MissingUserFields => "MISSING_USER_FIELDS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidOtp => "INVALID_OTP",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::InvalidSession => "INVALID_SESSION",
            Self::EmailInUse => "EMAIL_IN_USE",
            Self::Delivery(_) | Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::EmailRequired | Self::MissingCredentials | Self::MissingUserFields => {
                StatusCode::BAD_REQUEST
            }
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidOtp | Self::OtpExpired | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::EmailInUse => StatusCode::CONFLICT,
            Self::Delivery(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        match &self {
            Self::Delivery(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "mail delivery failed");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
