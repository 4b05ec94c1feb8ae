//! Value objects crossing the service boundary.

mod login_response;

pub use login_response::LoginResponse;
