use thiserror::Error;

/// The closed set of failures this crate reports.
///
/// Validation chains short-circuit: callers always receive the first
/// violation encountered, never a batch. Infrastructure failures
/// (storage, entropy source, mail delivery) travel through `Internal`
/// unmodified; the one deliberate translation is that an unknown and an
/// expired reset token both surface as `TokenInvalid`, so a caller
/// cannot tell a guessed token from a stale one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("resource not found")]
    NotFound,
    #[error("ID provided was invalid")]
    IdInvalid,
    #[error("incorrect password provided")]
    PasswordIncorrect,
    #[error("email address is required")]
    EmailRequired,
    #[error("email address is not valid")]
    EmailInvalid,
    #[error("email address is already taken")]
    EmailTaken,
    #[error("password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("password is required")]
    PasswordRequired,
    #[error("remember token is required")]
    RememberRequired,
    #[error("remember token must be at least 32 bytes")]
    RememberTooShort,
    #[error("user ID is required")]
    UserIdRequired,
    #[error("password reset token is invalid or has expired")]
    TokenInvalid,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
