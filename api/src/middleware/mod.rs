pub mod cors;
pub mod session;

pub use session::{SessionAuth, SessionContext};
