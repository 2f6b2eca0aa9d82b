use sea_orm::Database;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sesame_auth::config::AuthConfig;
use sesame_auth::infra::http::HttpUserStore;
use sesame_auth::infra::smtp::SmtpMailer;
use sesame_auth::router::build_router;
use sesame_auth::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json())
        .init();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // One SMTP transport for the process lifetime, injected into handlers.
    let mailer = SmtpMailer::new(&config).expect("failed to build SMTP transport");

    let users = HttpUserStore::new(reqwest::Client::new(), config.users_base_url.clone());

    let state = AppState {
        db,
        users,
        mailer,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
