use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    health::{healthz, readyz},
    otp::request_otp,
    token::{check_session, create_session, revoke_session},
    users::register_user,
};
use crate::middleware::request_id_layer;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP issuance
        .route("/auth/otp", post(request_otp))
        // Session (credential exchange)
        .route("/auth/token", get(check_session))
        .route("/auth/token", post(create_session))
        .route("/auth/token", delete(revoke_session))
        // Registration
        .route("/users", post(register_user))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
