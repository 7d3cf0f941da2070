//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod debug_token;
pub mod force_verify;
pub mod resend_verification;
pub mod sign_in;
pub mod sign_up;
pub mod verification;

// Re-exports
pub use config::AuthConfig;
pub use debug_token::{CandidateReport, DebugTokenReport, DebugTokenUseCase};
pub use force_verify::{ForceVerifyInput, ForceVerifyUseCase};
pub use resend_verification::{ResendOutcome, ResendVerificationUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verification::{ReissueOutcome, ResolvedToken, VerificationUseCase, VerifyOutcome};
