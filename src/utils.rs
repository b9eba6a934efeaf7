use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

pub mod error;
pub mod extract;

static EMAIL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Accepts anything shaped like `local@domain.tld`; deliverability is left to the SMTP server.
pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
  if !EMAIL_REGEX.is_match(email) {
    return Err(ValidationError::new("invalid_email_format"));
  }

  Ok(())
}
