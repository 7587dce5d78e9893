mod types;

pub mod mem;
pub mod pg;
pub mod store;
pub mod validator;

pub use mem::InMemoryUserStore;
pub use pg::PgUserStore;
pub use store::UserStore;
pub use types::User;
pub use validator::UserValidator;
