use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User record fetched from the external users service. This is also the
/// identity shape embedded into session tokens after credential exchange.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
}

/// Fields for creating a user in the users service (registration).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// One-time passcode record. At most one exists per user at any time; a code
/// is meaningful only while `expires_at` is in the future.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub user_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// A code is expired at or past its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Structured mail body: plain text plus an optional templated HTML rendition.
#[derive(Debug, Clone)]
pub struct MailContent {
    pub text: String,
    pub html: Option<MailTemplate>,
}

/// Inputs to the HTML mail template.
#[derive(Debug, Clone)]
pub struct MailTemplate {
    pub title: String,
    pub body: String,
    pub otp: Option<String>,
    pub button: Option<MailButton>,
    pub footer: Option<String>,
}

/// Call-to-action link rendered as a button in HTML mail.
#[derive(Debug, Clone)]
pub struct MailButton {
    pub text: String,
    pub url: String,
}

/// OTP time-to-live in seconds (5 minutes).
pub const OTP_TTL_SECS: i64 = 300;
