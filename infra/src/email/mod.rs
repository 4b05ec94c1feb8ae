//! Email dispatch implementations

mod http_mailer;

pub use http_mailer::{HttpEmailService, MailerConfig};
