//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use platform::clock::{Clock, SystemClock};

use crate::application::config::AuthConfig;
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::AccountRepository;
use crate::infra::{MailNotifier, PgAccountRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the PostgreSQL repository and SMTP notifier
pub fn auth_router(repo: PgAccountRepository, notifier: MailNotifier, config: AuthConfig) -> Router {
    auth_router_generic(repo, notifier, config, Arc::new(SystemClock))
}

/// Create a generic Auth router for any repository / notifier implementation
///
/// `force-verify` and `debug-token` exist only when
/// `config.dev_endpoints_enabled` is set.
pub fn auth_router_generic<R, N>(
    repo: R,
    notifier: N,
    config: AuthConfig,
    clock: Arc<dyn Clock>,
) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let dev_endpoints = config.dev_endpoints_enabled;
    let state = AuthAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        config: Arc::new(config),
        clock,
    };

    let mut router = Router::new()
        .route("/register", post(handlers::register::<R, N>))
        .route("/login", post(handlers::login::<R, N>))
        .route("/verify-email", get(handlers::verify_email::<R, N>))
        .route(
            "/resend-verification",
            post(handlers::resend_verification::<R, N>),
        );

    if dev_endpoints {
        tracing::warn!("Development auth endpoints enabled (force-verify, debug-token)");
        router = router
            .route("/force-verify", post(handlers::force_verify::<R, N>))
            .route("/debug-token", post(handlers::debug_token::<R, N>));
    }

    router.with_state(state)
}
