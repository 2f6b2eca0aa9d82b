use sea_orm::DatabaseConnection;

use crate::infra::db::DbOtpRepository;
use crate::infra::http::HttpUserStore;
use crate::infra::smtp::SmtpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub users: HttpUserStore,
    pub mailer: SmtpMailer,
    pub jwt_secret: String,
    pub cookie_domain: String,
}

impl AppState {
    pub fn user_store(&self) -> HttpUserStore {
        self.users.clone()
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
    }
}
