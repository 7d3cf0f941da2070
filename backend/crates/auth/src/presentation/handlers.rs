//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::{
    DebugTokenUseCase, ForceVerifyInput, ForceVerifyUseCase, ResendVerificationUseCase,
    SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, VerificationUseCase, VerifyOutcome,
};
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    DebugTokenRequest, DebugTokenResponse, ForceVerifyRequest, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, RegisterResponse, ResendRequest, UserResponse,
    VerifyEmailQuery,
};

pub const RESEND_MESSAGE: &str =
    "If your email exists in our system, you will receive a verification email shortly.";
pub const FORCE_VERIFY_MESSAGE: &str =
    "If your account exists, it has been verified. You can now log in.";

/// Shared state for auth handlers
pub struct AuthAppState<R, N> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

// Manual impl: only the Arcs are cloned, R and N need not be Clone
impl<R, N> Clone for AuthAppState<R, N> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R, N> AuthAppState<R, N>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    fn verification(&self) -> VerificationUseCase<R, N> {
        VerificationUseCase::new(
            self.repo.clone(),
            self.notifier.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&output.account),
            verification_email_sent: output.verification_email_sent,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserResponse::from(&output.account),
    }))
}

// ============================================================================
// Verify / Resend
// ============================================================================

/// GET /api/auth/verify-email?token=...
pub async fn verify_email<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Query(query): Query<VerifyEmailQuery>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let message = match state.verification().verify(&query.token).await? {
        VerifyOutcome::Verified(_) => "Email verified successfully",
        VerifyOutcome::AlreadyVerified(_) => "Email already verified",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/auth/resend-verification
///
/// Same answer whether or not the email is registered or already verified.
pub async fn resend_verification<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<ResendRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let use_case = ResendVerificationUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
        state.clock.clone(),
    );
    let outcome = use_case.execute(req.email).await?;
    tracing::debug!(?outcome, "Resend verification handled");

    Ok(Json(MessageResponse::new(RESEND_MESSAGE)))
}

// ============================================================================
// Development endpoints
// ============================================================================

/// POST /api/auth/force-verify
pub async fn force_verify<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<ForceVerifyRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let use_case = ForceVerifyUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(ForceVerifyInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(MessageResponse::new(FORCE_VERIFY_MESSAGE)))
}

/// POST /api/auth/debug-token
pub async fn debug_token<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<DebugTokenRequest>,
) -> AuthResult<Json<DebugTokenResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    N: VerificationNotifier + Send + Sync + 'static,
{
    let use_case = DebugTokenUseCase::new(state.repo.clone(), state.clock.clone());
    let report = use_case.execute(&req.token).await?;
    Ok(Json(DebugTokenResponse::from(report)))
}
