use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::otp::{RequestOtpInput, RequestOtpUseCase};

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub email: String,
}

pub async fn request_otp(
    State(state): State<AppState>,
    Json(body): Json<RequestOtpRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = RequestOtpUseCase {
        users: state.user_store(),
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(RequestOtpInput { email: body.email })
        .await?;
    Ok(StatusCode::CREATED)
}
