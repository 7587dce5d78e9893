mod types;

pub mod mem;
pub mod pg;
pub mod store;
pub mod validator;

pub use mem::InMemoryPwResetStore;
pub use pg::PgPwResetStore;
pub use store::PwResetStore;
pub use types::{PwReset, RESET_TOKEN_TTL};
pub use validator::PwResetValidator;
