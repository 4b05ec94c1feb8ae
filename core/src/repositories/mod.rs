//! Repository interfaces abstracting the backing store.
//!
//! The in-memory mock lives here too so downstream crates can use it in
//! their integration tests.

pub mod account;

pub use account::{AccountRepository, MockAccountRepository};
