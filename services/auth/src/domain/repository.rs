#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{MailContent, NewUser, OtpRecord, User};
use crate::error::AuthServiceError;

/// Port for the external users service.
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError>;

    /// Create a user. Fails with `EmailInUse` if the email is already taken.
    async fn create(&self, new_user: &NewUser) -> Result<User, AuthServiceError>;
}

/// Repository for one-time passcodes, keyed by user id.
pub trait OtpRepository: Send + Sync {
    /// Insert or replace the record for `record.user_id` (last write wins).
    /// A fresh issuance permanently invalidates any prior unconsumed code.
    async fn upsert(&self, record: &OtpRecord) -> Result<(), AuthServiceError>;

    /// Current record for the user, or `None`. Never cleans up expired rows.
    async fn find(&self, user_id: Uuid) -> Result<Option<OtpRecord>, AuthServiceError>;

    /// Remove the record. Deleting a missing record is a no-op success.
    async fn delete(&self, user_id: Uuid) -> Result<(), AuthServiceError>;

    /// Atomically delete the record if its code equals `code` and it has not
    /// expired at `now`. Returns whether a record was consumed. This is the
    /// only consumption path, so two concurrent verifications of the same
    /// code cannot both succeed.
    async fn consume(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AuthServiceError>;
}

/// Port for outbound mail delivery.
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        content: &MailContent,
    ) -> Result<(), AuthServiceError>;
}
