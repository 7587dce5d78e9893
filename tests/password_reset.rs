mod common;

use std::sync::Arc;

use shutterbox_auth::hash::HmacHasher;
use shutterbox_auth::pw_resets::{PwReset, PwResetStore, RESET_TOKEN_TTL};
use shutterbox_auth::users::User;
use shutterbox_auth::{AuthConfig, Error, UserService};
use time::{Duration, OffsetDateTime};

use common::{harness, FailingMailer, Harness, HMAC_KEY, PEPPER};

async fn with_user(email: &str, password: &str) -> (Harness, User) {
    let h = harness();
    let mut user = User::new("Res", email, password);
    h.service.users().create(&mut user).await.unwrap();
    (h, user)
}

#[tokio::test]
async fn initiate_delivers_token_and_complete_rotates_password() {
    let (h, user) = with_user("reset@example.com", "oldpassword").await;

    let token = h.service.initiate_reset("Reset@Example.com").await.unwrap();
    assert!(!token.is_empty());

    let sent = h.mailer.sent.lock().unwrap().clone();
    assert_eq!(sent, vec![("reset@example.com".to_string(), token.clone())]);

    let updated = h
        .service
        .complete_reset(&token, "brand-new-password")
        .await
        .unwrap();
    assert_eq!(updated.id, user.id);

    let ok = h
        .service
        .authenticate("reset@example.com", "brand-new-password")
        .await
        .unwrap();
    assert_eq!(ok.id, user.id);
    let err = h
        .service
        .authenticate("reset@example.com", "oldpassword")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PasswordIncorrect));
}

#[tokio::test]
async fn consumed_token_is_single_use() {
    let (h, _user) = with_user("once@example.com", "oldpassword").await;
    let token = h.service.initiate_reset("once@example.com").await.unwrap();

    h.service
        .complete_reset(&token, "brand-new-password")
        .await
        .unwrap();
    let err = h
        .service
        .complete_reset(&token, "another-password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TokenInvalid));
}

#[tokio::test]
async fn expired_token_is_invalid_and_row_survives() {
    let (h, user) = with_user("stale@example.com", "oldpassword").await;

    // Backdate a record past the window, bypassing the validator the
    // way an old row in storage would look.
    let hasher = HmacHasher::new(HMAC_KEY);
    let token = "stale-but-well-formed-token";
    let mut pw_reset = PwReset {
        user_id: user.id,
        token_hash: hasher.hash(token),
        created_at: OffsetDateTime::now_utc() - RESET_TOKEN_TTL - Duration::hours(1),
        ..PwReset::for_user(user.id)
    };
    h.pw_reset_store.create(&mut pw_reset).await.unwrap();

    let err = h
        .service
        .complete_reset(token, "brand-new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TokenInvalid));

    // Rejected, not consumed: the row is left for external purging.
    let still_there = h
        .pw_reset_store
        .by_token_hash(&hasher.hash(token))
        .await
        .unwrap();
    assert!(still_there.is_some());

    // And the password still works.
    h.service
        .authenticate("stale@example.com", "oldpassword")
        .await
        .unwrap();
}

#[tokio::test]
async fn token_just_inside_the_window_still_works() {
    let (h, user) = with_user("fresh@example.com", "oldpassword").await;

    let hasher = HmacHasher::new(HMAC_KEY);
    let token = "fresh-enough-token";
    let mut pw_reset = PwReset {
        user_id: user.id,
        token_hash: hasher.hash(token),
        created_at: OffsetDateTime::now_utc() - RESET_TOKEN_TTL + Duration::minutes(5),
        ..PwReset::for_user(user.id)
    };
    h.pw_reset_store.create(&mut pw_reset).await.unwrap();

    let updated = h
        .service
        .complete_reset(token, "brand-new-password")
        .await
        .unwrap();
    assert_eq!(updated.id, user.id);
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let (h, _user) = with_user("garbage@example.com", "oldpassword").await;
    let err = h
        .service
        .complete_reset("no-such-token", "brand-new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TokenInvalid));
}

#[tokio::test]
async fn reset_password_still_runs_the_pipeline() {
    let (h, _user) = with_user("pipeline@example.com", "oldpassword").await;
    let token = h
        .service
        .initiate_reset("pipeline@example.com")
        .await
        .unwrap();

    let err = h.service.complete_reset(&token, "short").await.unwrap_err();
    assert!(matches!(err, Error::PasswordTooShort));
}

#[tokio::test]
async fn initiate_for_unknown_email_is_not_found() {
    let h = harness();
    let err = h
        .service
        .initiate_reset("nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn delivery_failure_fails_the_initiation() {
    let config = AuthConfig {
        database_url: String::new(),
        pepper: PEPPER.to_string(),
        hmac_key: HMAC_KEY.to_string(),
    };
    let service = UserService::new(
        shutterbox_auth::users::InMemoryUserStore::default(),
        shutterbox_auth::pw_resets::InMemoryPwResetStore::default(),
        &config,
        Arc::new(FailingMailer),
    );
    let mut user = User::new("Res", "failmail@example.com", "oldpassword");
    service.users().create(&mut user).await.unwrap();

    let err = service
        .initiate_reset("failmail@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
}
