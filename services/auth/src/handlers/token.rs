use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sesame_auth_types::{
    cookie::{SESAME_SESSION_TOKEN, clear_session_cookie, set_session_cookie},
    identity::IdentityHeaders,
    token::validate_session_token,
};

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::otp::VerifyOtpUseCase;
use crate::usecase::token::{CreateSessionInput, CreateSessionUseCase};

const X_SESAME_SESSION_EXPIRES: &str = "x-sesame-session-expires";

fn session_expires_header(exp: u64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(X_SESAME_SESSION_EXPIRES),
        HeaderValue::from_str(&exp.to_string()).unwrap(),
    )
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
}

// ── POST /auth/token ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub email: String,
    pub code: String,
}

pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = CreateSessionUseCase {
        verify: VerifyOtpUseCase {
            users: state.user_store(),
            otps: state.otp_repo(),
        },
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase
        .execute(CreateSessionInput {
            email: body.email,
            code: body.code,
        })
        .await?;

    let jar = set_session_cookie(jar, out.session_token, state.cookie_domain.clone());

    let mut headers = HeaderMap::new();
    let (name, value) = session_expires_header(out.session_token_exp);
    headers.insert(name, value);

    let body = UserResponse {
        id: out.user.id,
        name: out.user.name,
        email: out.user.email,
        avatar: out.user.avatar,
    };

    Ok((StatusCode::CREATED, jar, headers, Json(body)))
}

// ── GET /auth/token ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckSessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub session_exp: u64,
}

pub async fn check_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let token_value = jar
        .get(SESAME_SESSION_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::InvalidSession)?;

    let info = validate_session_token(&token_value, &state.jwt_secret)
        .map_err(|_| AuthServiceError::InvalidSession)?;

    let body = CheckSessionResponse {
        user_id: info.user_id,
        email: info.email,
        session_exp: info.session_exp,
    };

    let mut headers = HeaderMap::new();
    let (name, value) = session_expires_header(info.session_exp);
    headers.insert(name, value);

    Ok((StatusCode::OK, headers, Json(body)))
}

// ── DELETE /auth/token ────────────────────────────────────────────────────────

pub async fn revoke_session(
    State(state): State<AppState>,
    _identity: IdentityHeaders,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
