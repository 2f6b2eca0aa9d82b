use chrono::{Duration, Utc};
use rand::RngExt;

use crate::domain::repository::{Mailer, OtpRepository, UserStore};
use crate::domain::types::{MailContent, MailTemplate, OTP_TTL_SECS, OtpRecord, User};
use crate::error::AuthServiceError;

/// Subject line for every OTP mail.
const OTP_MAIL_SUBJECT: &str = "Your OTP Code";

/// Produce a 6-digit code drawn uniformly from [100000, 999999].
/// `rand::rng()` is a CSPRNG — the code is a security credential.
fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000u32..=999_999).to_string()
}

// ── RequestOtp (issuance) ────────────────────────────────────────────────────

pub struct RequestOtpInput {
    pub email: String,
}

pub struct RequestOtpUseCase<U, O, M>
where
    U: UserStore,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> RequestOtpUseCase<U, O, M>
where
    U: UserStore,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: RequestOtpInput) -> Result<(), AuthServiceError> {
        // 1. Reject an empty email before touching any collaborator.
        if input.email.is_empty() {
            return Err(AuthServiceError::EmailRequired);
        }

        // 2. Resolve the user — issuance never creates one.
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        // 3. Generate code + expiry.
        let code = generate_code();
        let now = Utc::now();
        let record = OtpRecord {
            user_id: user.id,
            code: code.clone(),
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            created_at: now,
        };

        // 4. Upsert before delivery is attempted: any prior unconsumed code is
        //    now permanently invalid, and the record survives a delivery fault
        //    (at-least-once issuance, not transactional with the mail).
        self.otps.upsert(&record).await?;

        // 5. Exactly one outbound notification per successful call.
        self.mailer
            .send(&input.email, OTP_MAIL_SUBJECT, &otp_mail(&code))
            .await?;

        Ok(())
    }
}

fn otp_mail(code: &str) -> MailContent {
    MailContent {
        text: format!("Your OTP is: {code}. Do not share this with anyone."),
        html: Some(MailTemplate {
            title: "Verify Your Account".to_owned(),
            body: "To complete your verification, please use the OTP below.".to_owned(),
            otp: Some(code.to_owned()),
            button: None,
            footer: Some("If you didn't request this, please ignore.".to_owned()),
        }),
    }
}

// ── VerifyOtp (verification + consumption) ───────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<U, O>
where
    U: UserStore,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
}

impl<U, O> VerifyOtpUseCase<U, O>
where
    U: UserStore,
    O: OtpRepository,
{
    /// Verify a submitted code and consume it on success (single use).
    ///
    /// Consumption is a single atomic conditional delete, so concurrent
    /// verifications of the same code succeed at most once. When it fails,
    /// the stored record classifies the error with strict precedence:
    /// existence, then exact code match, then expiry — a wrong code reports
    /// invalid, never expired. An expired record is left in place; the next
    /// issuance overwrites it.
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<User, AuthServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let now = Utc::now();
        if self.otps.consume(user.id, &input.code, now).await? {
            return Ok(user);
        }

        match self.otps.find(user.id).await? {
            None => Err(AuthServiceError::InvalidOtp),
            Some(record) if record.code != input.code => Err(AuthServiceError::InvalidOtp),
            Some(_) => Err(AuthServiceError::OtpExpired),
        }
    }
}
