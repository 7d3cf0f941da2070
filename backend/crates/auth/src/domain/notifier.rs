//! Notifier Port
//!
//! Delivery is best effort: a failed send never changes account state.

use crate::domain::value_object::{email::Email, verification_token::VerificationToken};

#[trait_variant::make(VerificationNotifier: Send)]
pub trait LocalVerificationNotifier {
    /// Send the verification link; `true` when the message was handed off
    async fn send_verification(&self, email: &Email, token: &VerificationToken) -> bool;
}
