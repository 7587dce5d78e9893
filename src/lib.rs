//! Identity and credential core for the Shutterbox gallery app.
//!
//! Everything security-sensitive lives here: one-way password hashing
//! with a server-wide pepper, keyed (HMAC) hashing of remember and
//! reset tokens, and the ordered validation chains that run before any
//! user write or identity-bearing read reaches storage.
//!
//! The crate owns no transport. HTTP routing, HTML, cookies and SMTP
//! belong to the consuming application; storage and mail delivery are
//! reached through the [`users::UserStore`], [`pw_resets::PwResetStore`]
//! and [`email::EmailDelivery`] ports.
//!
//! Layering, innermost first: a raw store adapter (Postgres or
//! in-memory), wrapped by a validator ([`users::UserValidator`] /
//! [`pw_resets::PwResetValidator`]), wrapped by the
//! [`service::UserService`] facade. Each layer owns the next; the chain
//! is composed once at construction.

pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod hash;
pub mod password;
pub mod pw_resets;
pub mod service;
pub mod token;
pub mod users;

pub use config::AuthConfig;
pub use error::Error;
pub use service::UserService;
