//! Session token service
//!
//! Signs, verifies and refreshes the stateless session tokens carried in
//! the session cookie, and drives the idle-timeout state machine.

mod service;

pub use service::SessionService;
