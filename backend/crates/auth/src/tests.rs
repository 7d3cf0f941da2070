//! Scenario tests for the auth crate
//!
//! Use cases run against the in-memory repository, a recording notifier and a
//! manual clock; HTTP tests drive the router with `oneshot`.

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use platform::clock::ManualClock;

    use crate::domain::entity::account::Account;
    use crate::domain::repository::AccountRepository;
    use crate::domain::service::TokenIssuer;
    use crate::domain::value_object::{
        account_role::AccountRole,
        display_name::DisplayName,
        email::Email,
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::InMemoryAccountRepository;

    pub const PASSWORD: &str = "password123";

    pub fn test_clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap())
    }

    /// Insert an unverified student holding a fresh token
    pub async fn register_account(
        repo: &InMemoryAccountRepository,
        email: &str,
        now: DateTime<Utc>,
    ) -> Account {
        let raw = RawPassword::new(PASSWORD.to_string()).unwrap();
        let account = Account::register(
            Email::new(email).unwrap(),
            DisplayName::new("Test User").unwrap(),
            AccountRole::Student,
            UserPassword::from_raw(&raw, None).unwrap(),
            TokenIssuer::new().issue(now),
            now,
        );
        repo.create(&account).await.unwrap();
        account
    }
}

#[cfg(test)]
mod verification_tests {
    use std::sync::Arc;

    use chrono::Duration;
    use platform::clock::{Clock, ManualClock};

    use super::fixtures::{PASSWORD, register_account, test_clock};
    use crate::application::{AuthConfig, ResolvedToken, VerificationUseCase, VerifyOutcome};
    use crate::domain::repository::{AccountRepository, VerificationFields};
    use crate::domain::value_object::{
        user_password::RawPassword,
        verification_token::{IssuedToken, VerificationToken},
    };
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryAccountRepository, RecordingNotifier};

    struct Harness {
        repo: InMemoryAccountRepository,
        notifier: RecordingNotifier,
        clock: ManualClock,
        verification: VerificationUseCase<InMemoryAccountRepository, RecordingNotifier>,
    }

    fn harness() -> Harness {
        let repo = InMemoryAccountRepository::new();
        let notifier = RecordingNotifier::new();
        let clock = test_clock();
        let verification = VerificationUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(notifier.clone()),
            Arc::new(AuthConfig::default()),
            Arc::new(clock.clone()),
        );
        Harness {
            repo,
            notifier,
            clock,
            verification,
        }
    }

    async fn set_token(h: &Harness, account_id: &crate::domain::value_object::account_id::AccountId, token: &str) {
        let fields = VerificationFields::Pending(IssuedToken {
            token: VerificationToken::from_db(token),
            expires_at: h.clock.now() + Duration::hours(24),
        });
        assert!(h.repo.set_verification_fields(account_id, &fields).await.unwrap());
    }

    #[tokio::test]
    async fn test_verified_account_holds_no_token() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let token = account.pending_token().unwrap().token.clone();

        h.verification.verify(token.as_str()).await.unwrap();

        let stored = h.repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert!(stored.is_verified());
        assert!(stored.pending_token().is_none());
        assert!(h.repo.find_pending_verifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verify_twice_is_idempotent() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let token = account.pending_token().unwrap().token.clone();

        let first = h.verification.verify(token.as_str()).await.unwrap();
        let second = h.verification.verify(token.as_str()).await.unwrap();

        assert_eq!(first, VerifyOutcome::Verified(account.account_id));
        assert_eq!(second, VerifyOutcome::AlreadyVerified(account.account_id));
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let issued = account.pending_token().unwrap().clone();

        // One second past expiry: rejected, token kept
        h.clock.set(issued.expires_at + Duration::seconds(1));
        let result = h.verification.verify(issued.token.as_str()).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
        let stored = h.repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert_eq!(stored.pending_token(), Some(&issued));

        // One second before expiry: accepted
        h.clock.set(issued.expires_at - Duration::seconds(1));
        let outcome = h.verification.verify(issued.token.as_str()).await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Verified(account.account_id));
    }

    #[tokio::test]
    async fn test_token_valid_at_exact_expiry() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let issued = account.pending_token().unwrap().clone();

        h.clock.set(issued.expires_at);
        assert!(h.verification.verify(issued.token.as_str()).await.is_ok());
    }

    #[tokio::test]
    async fn test_exact_tier_beats_containment() {
        let h = harness();
        let exact = register_account(&h.repo, "exact@example.com", h.clock.now()).await;
        let containing = register_account(&h.repo, "contains@example.com", h.clock.now()).await;
        set_token(&h, &exact.account_id, "abc+123").await;
        set_token(&h, &containing.account_id, "zzabc+123zz").await;

        match h.verification.find_account_by_token("abc+123").await.unwrap() {
            ResolvedToken::Pending(account) => assert_eq!(account.account_id, exact.account_id),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_form_decoded_plus_falls_to_fuzzy_tier() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        set_token(&h, &account.account_id, "abc+123").await;

        match h.verification.find_account_by_token("abc 123").await.unwrap() {
            ResolvedToken::Pending(found) => assert_eq!(found.account_id, account.account_id),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ambiguous_match_rejected() {
        let h = harness();
        let first = register_account(&h.repo, "one@example.com", h.clock.now()).await;
        let second = register_account(&h.repo, "two@example.com", h.clock.now()).await;
        set_token(&h, &first.account_id, "aaabc+123").await;
        set_token(&h, &second.account_id, "bbabc+123").await;

        let result = h.verification.verify("abc+123").await;
        assert!(matches!(result, Err(AuthError::AmbiguousToken)));
        assert!(!h.repo.find_by_id(&first.account_id).await.unwrap().unwrap().is_verified());
        assert!(!h.repo.find_by_id(&second.account_id).await.unwrap().unwrap().is_verified());
    }

    #[tokio::test]
    async fn test_unknown_and_empty_tokens() {
        let h = harness();
        register_account(&h.repo, "alice@example.com", h.clock.now()).await;

        let unknown = h.verification.verify(&"f".repeat(64)).await;
        assert!(matches!(unknown, Err(AuthError::InvalidToken)));

        let empty = h.verification.verify("   ").await;
        assert!(matches!(empty, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_single_character_does_not_verify() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let token = account.pending_token().unwrap().token.clone();
        let first = &token.as_str()[..1];

        let result = h.verification.verify(first).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
        let stored = h.repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert!(!stored.is_verified());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_verify_has_one_winner() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let token = account.pending_token().unwrap().token.as_str().to_string();
        let verification = Arc::new(h.verification);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let verification = verification.clone();
                let token = token.clone();
                tokio::spawn(async move { verification.verify(&token).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                VerifyOutcome::Verified(_) => winners += 1,
                VerifyOutcome::AlreadyVerified(id) => assert_eq!(id, account.account_id),
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_login_with_live_token_does_not_reissue() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let password = RawPassword::new(PASSWORD.to_string()).unwrap();

        let result = h.verification.reconcile_on_login(account.clone(), &password).await;
        assert!(matches!(result, Err(AuthError::NeedsVerification)));
        assert!(h.notifier.sent().is_empty());

        let stored = h.repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert_eq!(stored.pending_token(), account.pending_token());
    }

    #[tokio::test]
    async fn test_login_with_expired_token_reissues() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let old = account.pending_token().unwrap().clone();
        let password = RawPassword::new(PASSWORD.to_string()).unwrap();

        h.clock.advance(Duration::hours(25));
        let result = h.verification.reconcile_on_login(account.clone(), &password).await;
        assert!(matches!(result, Err(AuthError::NeedsVerification)));

        let sent = h.notifier.last_token_for("alice@example.com").unwrap();
        assert_ne!(sent, old.token);
        let stored = h.repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        let fresh = stored.pending_token().unwrap();
        assert_eq!(fresh.token, sent);
        assert_eq!(fresh.expires_at, h.clock.now() + Duration::hours(24));
    }

    #[tokio::test]
    async fn test_login_wrong_password_checked_first() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let wrong = RawPassword::new("not-the-password".to_string()).unwrap();

        h.clock.advance(Duration::hours(25));
        let result = h.verification.reconcile_on_login(account, &wrong).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_reissue_for_verified_account_is_noop() {
        let h = harness();
        let account = register_account(&h.repo, "alice@example.com", h.clock.now()).await;
        let token = account.pending_token().unwrap().token.clone();
        h.verification.verify(token.as_str()).await.unwrap();

        let outcome = h.verification.reissue_token(&account.account_id).await.unwrap();
        assert_eq!(outcome, crate::application::ReissueOutcome::AlreadyVerified);
        assert!(h.notifier.sent().is_empty());
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use platform::clock::Clock;

    use super::fixtures::{register_account, test_clock};
    use crate::application::{
        AuthConfig, DebugTokenUseCase, ForceVerifyInput, ForceVerifyUseCase, ResendOutcome,
        ResendVerificationUseCase, SignUpInput, SignUpUseCase,
    };
    use crate::domain::repository::AccountRepository;
    use crate::domain::value_object::email::Email;
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryAccountRepository, RecordingNotifier};

    fn sign_up_input(email: &str) -> SignUpInput {
        SignUpInput {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            role: Some("teacher".to_string()),
        }
    }

    #[tokio::test]
    async fn test_sign_up_keeps_account_when_email_fails() {
        let repo = InMemoryAccountRepository::new();
        let notifier = RecordingNotifier::new();
        notifier.set_failing(true);
        let use_case = SignUpUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(notifier),
            Arc::new(AuthConfig::default()),
            Arc::new(test_clock()),
        );

        let output = use_case.execute(sign_up_input("Alice@Example.com")).await.unwrap();
        assert!(!output.verification_email_sent);
        assert_eq!(output.account.email.as_str(), "alice@example.com");

        let email = Email::new("alice@example.com").unwrap();
        assert!(repo.exists_by_email(&email).await.unwrap());
    }

    #[tokio::test]
    async fn test_sign_up_validates_before_store() {
        let repo = InMemoryAccountRepository::new();
        let use_case = SignUpUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(RecordingNotifier::new()),
            Arc::new(AuthConfig::default()),
            Arc::new(test_clock()),
        );

        let mut input = sign_up_input("alice@example.com");
        input.password = "short".to_string();
        assert!(matches!(use_case.execute(input).await, Err(AuthError::Validation(_))));

        let mut input = sign_up_input("alice@example.com");
        input.role = Some("admin".to_string());
        assert!(matches!(use_case.execute(input).await, Err(AuthError::Validation(_))));

        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_resend_for_unknown_email_sends_nothing() {
        let repo = InMemoryAccountRepository::new();
        let notifier = RecordingNotifier::new();
        let use_case = ResendVerificationUseCase::new(
            Arc::new(repo),
            Arc::new(notifier.clone()),
            Arc::new(AuthConfig::default()),
            Arc::new(test_clock()),
        );

        let outcome = use_case.execute("ghost@example.com".to_string()).await.unwrap();
        assert_eq!(outcome, ResendOutcome::UnknownAccount);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_resend_replaces_token() {
        let repo = InMemoryAccountRepository::new();
        let notifier = RecordingNotifier::new();
        let clock = test_clock();
        let account = register_account(&repo, "alice@example.com", clock.now()).await;
        let use_case = ResendVerificationUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(notifier.clone()),
            Arc::new(AuthConfig::default()),
            Arc::new(clock),
        );

        let outcome = use_case.execute("alice@example.com".to_string()).await.unwrap();
        assert_eq!(outcome, ResendOutcome::Sent);

        let stored = repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        let current = stored.pending_token().unwrap();
        assert_ne!(Some(current), account.pending_token());
        assert_eq!(notifier.last_token_for("alice@example.com").as_ref(), Some(&current.token));
    }

    #[tokio::test]
    async fn test_resend_reports_delivery_failure() {
        let repo = InMemoryAccountRepository::new();
        let notifier = RecordingNotifier::new();
        let clock = test_clock();
        register_account(&repo, "alice@example.com", clock.now()).await;
        notifier.set_failing(true);
        let use_case = ResendVerificationUseCase::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(AuthConfig::default()),
            Arc::new(clock),
        );

        let outcome = use_case.execute("alice@example.com".to_string()).await.unwrap();
        assert_eq!(outcome, ResendOutcome::DeliveryFailed);
    }

    #[tokio::test]
    async fn test_force_verify_requires_password() {
        let repo = InMemoryAccountRepository::new();
        let clock = test_clock();
        let account = register_account(&repo, "alice@example.com", clock.now()).await;
        let use_case = ForceVerifyUseCase::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()));

        let wrong = use_case
            .execute(ForceVerifyInput {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap();
        assert!(!wrong);

        let right = use_case
            .execute(ForceVerifyInput {
                email: "alice@example.com".to_string(),
                password: super::fixtures::PASSWORD.to_string(),
            })
            .await
            .unwrap();
        assert!(right);

        let stored = repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert!(stored.is_verified());
        assert!(stored.pending_token().is_none());
    }

    #[tokio::test]
    async fn test_debug_token_reports_tiers() {
        let repo = InMemoryAccountRepository::new();
        let clock = test_clock();
        let account = register_account(&repo, "alice@example.com", clock.now()).await;
        register_account(&repo, "bob@example.com", clock.now()).await;
        let token = account.pending_token().unwrap().token.clone();

        let use_case = DebugTokenUseCase::new(Arc::new(repo), Arc::new(clock));
        let report = use_case.execute(token.as_str()).await.unwrap();

        assert_eq!(report.tokens_found, 2);
        assert_eq!(report.exact_matches, 1);
        assert_eq!(report.potential_matches.len(), 1);

        let candidate = &report.potential_matches[0];
        assert_eq!(candidate.account_id, account.account_id);
        assert_eq!(candidate.masked_email, "ali***@example.com");
        assert_eq!(candidate.token_snippet, token.snippet());
        assert!(candidate.is_exact_match && candidate.is_substring_match);
        assert!(!candidate.is_expired);
        assert!(!report.input_snippet.contains(token.as_str()));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fixtures::test_clock;
    use kernel::error::conversions::STORE_UNAVAILABLE_MESSAGE;

    use super::UnavailableRepository;
    use crate::application::AuthConfig;
    use crate::infra::memory::{InMemoryAccountRepository, RecordingNotifier};
    use crate::presentation::handlers::RESEND_MESSAGE;
    use crate::presentation::router::auth_router_generic;

    fn app(config: AuthConfig) -> (Router, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let router = auth_router_generic(
            InMemoryAccountRepository::new(),
            notifier.clone(),
            config,
            Arc::new(test_clock()),
        );
        (router, notifier)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn alice() -> Value {
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "password123",
            "role": "student"
        })
    }

    #[tokio::test]
    async fn test_register_login_verify_login() {
        let (app, notifier) = app(AuthConfig::default());

        let (status, body) = send(&app, "POST", "/register", Some(alice())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["verificationEmailSent"], true);
        assert_eq!(body["user"]["isVerified"], false);
        assert_eq!(body["user"]["role"], "student");
        assert!(body["user"].get("passwordHash").is_none());

        let login = json!({"email": "alice@example.com", "password": "password123"});
        let (status, body) = send(&app, "POST", "/login", Some(login.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["needsVerification"], true);

        let token = notifier.last_token_for("alice@example.com").unwrap();
        let uri = format!("/verify-email?token={}", token.as_str());
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Email verified successfully");

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Email already verified");

        let (status, body) = send(&app, "POST", "/login", Some(login)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["isVerified"], true);
        assert_eq!(body["user"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (app, _) = app(AuthConfig::default());
        send(&app, "POST", "/register", Some(alice())).await;

        let (status, body) = send(&app, "POST", "/register", Some(alice())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "User already exists");
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_requests() {
        let (app, _) = app(AuthConfig::default());

        let (status, body) = send(&app, "POST", "/register", Some(json!({"email": "a@b.co"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name, email, and password are required");

        let (status, _) = send(&app, "POST", "/login", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/verify-email", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Verification token is required");
    }

    #[tokio::test]
    async fn test_unknown_login_is_uniform() {
        let (app, _) = app(AuthConfig::default());
        send(&app, "POST", "/register", Some(alice())).await;

        let unknown = json!({"email": "ghost@example.com", "password": "password123"});
        let (status, unknown_body) = send(&app, "POST", "/login", Some(unknown)).await;
        let wrong = json!({"email": "alice@example.com", "password": "wrong-password"});
        let (wrong_status, wrong_body) = send(&app, "POST", "/login", Some(wrong)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_body["error"], wrong_body["error"]);
    }

    #[tokio::test]
    async fn test_invalid_token_suggests_new_email() {
        let (app, _) = app(AuthConfig::default());
        let (status, body) = send(&app, "GET", "/verify-email?token=nope-nope-nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["action"], "Request a new verification email");
    }

    #[tokio::test]
    async fn test_resend_answer_is_uniform() {
        let (app, notifier) = app(AuthConfig::default());
        send(&app, "POST", "/register", Some(alice())).await;
        let before = notifier.sent().len();

        let (status, body) = send(
            &app,
            "POST",
            "/resend-verification",
            Some(json!({"email": "ghost@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], RESEND_MESSAGE);
        assert_eq!(notifier.sent().len(), before);

        let (status, body) = send(
            &app,
            "POST",
            "/resend-verification",
            Some(json!({"email": "alice@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], RESEND_MESSAGE);
        assert_eq!(notifier.sent().len(), before + 1);
    }

    #[tokio::test]
    async fn test_dev_endpoints_hidden_by_default() {
        let (app, _) = app(AuthConfig::default());
        let (status, _) = send(&app, "POST", "/force-verify", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "POST", "/debug-token", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dev_endpoints_when_enabled() {
        let (app, notifier) = app(AuthConfig::development());
        send(&app, "POST", "/register", Some(alice())).await;
        let token = notifier.last_token_for("alice@example.com").unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/debug-token",
            Some(json!({"token": token.as_str()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exactMatchCount"], 1);
        assert_eq!(body["potentialMatches"][0]["maskedEmail"], "ali***@example.com");

        let (status, _) = send(
            &app,
            "POST",
            "/force-verify",
            Some(json!({"email": "alice@example.com", "password": "password123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let login = json!({"email": "alice@example.com", "password": "password123"});
        let (status, _) = send(&app, "POST", "/login", Some(login)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_store_outage_is_503_without_retry() {
        let repo = UnavailableRepository::default();
        let app = auth_router_generic(
            repo.clone(),
            RecordingNotifier::new(),
            AuthConfig::default(),
            Arc::new(test_clock()),
        );

        let login = json!({"email": "alice@example.com", "password": "password123"});
        let (status, body) = send(&app, "POST", "/login", Some(login)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], STORE_UNAVAILABLE_MESSAGE);
        assert!(body.get("user").is_none());
        assert_eq!(repo.calls(), 1);

        let (status, _) = send(&app, "POST", "/register", Some(alice())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(repo.calls(), 2);
    }
}

/// Repository whose every call fails as if the pool timed out
#[cfg(test)]
#[derive(Clone, Default)]
struct UnavailableRepository {
    calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl UnavailableRepository {
    fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn fail<T>(&self) -> crate::error::AuthResult<T> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(crate::error::AuthError::StoreUnavailable(sqlx::Error::PoolTimedOut))
    }
}

#[cfg(test)]
mod unavailable_repository {
    use super::UnavailableRepository;
    use crate::domain::entity::account::Account;
    use crate::domain::repository::{AccountRepository, VerificationFields};
    use crate::domain::value_object::{
        account_id::AccountId, email::Email, verification_token::TokenDigest,
    };
    use crate::error::AuthResult;

    impl AccountRepository for UnavailableRepository {
        async fn create(&self, _account: &Account) -> AuthResult<()> {
            self.fail()
        }

        async fn find_by_id(&self, _account_id: &AccountId) -> AuthResult<Option<Account>> {
            self.fail()
        }

        async fn find_by_email(&self, _email: &Email) -> AuthResult<Option<Account>> {
            self.fail()
        }

        async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
            self.fail()
        }

        async fn find_pending_verifications(&self) -> AuthResult<Vec<Account>> {
            self.fail()
        }

        async fn find_by_consumed_digest(&self, _digest: &TokenDigest) -> AuthResult<Option<Account>> {
            self.fail()
        }

        async fn set_verification_fields(
            &self,
            _account_id: &AccountId,
            _fields: &VerificationFields,
        ) -> AuthResult<bool> {
            self.fail()
        }
    }
}
