/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Users service base URL (e.g. "http://users:3000"). Env var: `USERS_BASE_URL`.
    pub users_base_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3210). Env var: `AUTH_PORT`.
    pub auth_port: u16,
    /// SMTP relay host.
    pub smtp_host: String,
    /// SMTP port (default 465). Env var: `SMTP_PORT`.
    pub smtp_port: u16,
    /// SMTP username.
    pub smtp_username: String,
    /// SMTP password.
    pub smtp_password: String,
    /// Sender address, e.g. "Sesame <no-reply@example.com>". Env var: `SMTP_FROM`.
    pub smtp_from: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            users_base_url: std::env::var("USERS_BASE_URL").expect("USERS_BASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3210),
            smtp_host: std::env::var("SMTP_HOST").expect("SMTP_HOST"),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(465),
            smtp_username: std::env::var("SMTP_USERNAME").expect("SMTP_USERNAME"),
            smtp_password: std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD"),
            smtp_from: std::env::var("SMTP_FROM").expect("SMTP_FROM"),
        }
    }
}
