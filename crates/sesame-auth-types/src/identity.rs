//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

/// User identity injected by the gateway via `x-sesame-user-id` and
/// `x-sesame-user-email` headers after it has validated the session cookie.
///
/// Returns 401 if `x-sesame-user-id` is absent or cannot be parsed as UUID,
/// or if `x-sesame-user-email` is absent.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub email: String,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-sesame-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let email = parts
            .headers
            .get("x-sesame-user-email")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let email = email.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, email })
        }
    }
}
