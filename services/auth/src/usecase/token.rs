use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};

use sesame_auth_types::cookie::SESSION_TOKEN_EXP;
use sesame_auth_types::token::SessionClaims;

use crate::domain::repository::{OtpRepository, UserStore};
use crate::domain::types::User;
use crate::error::AuthServiceError;
use crate::usecase::otp::{VerifyOtpInput, VerifyOtpUseCase};

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token embedding the verified identity. Returns the token
/// and its expiry (seconds since epoch).
pub fn issue_session_token(
    user: &User,
    secret: &str,
) -> Result<(String, u64), AuthServiceError> {
    let exp = now_secs() + SESSION_TOKEN_EXP;
    let claims = SessionClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        avatar: user.avatar.clone(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

// ── CreateSession (credential exchange) ──────────────────────────────────────

pub struct CreateSessionInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct CreateSessionOutput {
    pub user: User,
    pub session_token: String,
    pub session_token_exp: u64,
}

/// Adapter between OTP verification and the session boundary: exchanges
/// `{ email, code }` for a signed session carrying the verified identity.
/// Verification (and single-use consumption) is delegated to
/// [`VerifyOtpUseCase`] rather than duplicated here.
pub struct CreateSessionUseCase<U, O>
where
    U: UserStore,
    O: OtpRepository,
{
    pub verify: VerifyOtpUseCase<U, O>,
    pub jwt_secret: String,
}

impl<U, O> CreateSessionUseCase<U, O>
where
    U: UserStore,
    O: OtpRepository,
{
    pub async fn execute(
        &self,
        input: CreateSessionInput,
    ) -> Result<CreateSessionOutput, AuthServiceError> {
        if input.email.is_empty() || input.code.is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        let user = self
            .verify
            .execute(VerifyOtpInput {
                email: input.email,
                code: input.code,
            })
            .await?;

        let (session_token, session_token_exp) = issue_session_token(&user, &self.jwt_secret)?;

        Ok(CreateSessionOutput {
            user,
            session_token,
            session_token_exp,
        })
    }
}
