//! Domain entities.

pub mod account;
pub mod session;

pub use account::{Account, AccountRole};
pub use session::{Session, SessionActivity, SessionClaims};
