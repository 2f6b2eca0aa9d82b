use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::handlers::token::UserResponse;
use crate::state::AppState;
use crate::usecase::user::{RegisterUserInput, RegisterUserUseCase};

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = RegisterUserUseCase {
        users: state.user_store(),
    };

    let user = usecase
        .execute(RegisterUserInput {
            username: body.username,
            email: body.email,
            avatar: body.avatar,
        })
        .await?;

    let body = UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        avatar: user.avatar,
    };

    Ok((StatusCode::CREATED, Json(body)))
}
