use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SmtpConfig {
  pub host: String,
  pub port: u16,
  /// Implicit TLS (usually port 465). STARTTLS is used otherwise.
  pub secure: bool,
  pub username: Option<String>,
  pub password: Option<String>,
  pub timeout: Duration,
}

impl SmtpConfig {
  /// Returns the username and password only when both are set and non-empty.
  pub fn credentials(&self) -> Option<(&str, &str)> {
    let username = self.username.as_deref().filter(|u| !u.is_empty())?;
    let password = self.password.as_deref().filter(|p| !p.is_empty())?;
    Some((username, password))
  }

  pub fn is_configured(&self) -> bool {
    self.credentials().is_some()
  }
}

impl Default for SmtpConfig {
  fn default() -> Self {
    SmtpConfig {
      host: "smtp.gmail.com".to_string(),
      port: 587,
      secure: false,
      username: None,
      password: None,
      timeout: DEFAULT_SMTP_TIMEOUT,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
  pub name: Option<String>,
  pub email: String,
}

impl Mailbox {
  pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
    Mailbox {
      name,
      email: email.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
  pub from: Mailbox,
  pub reply_to: Option<String>,
  pub to: String,
  pub subject: String,
  pub html_body: String,
  pub text_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
  pub message_id: String,
}

/// Failure reported by a [`Mailer`](super::Mailer).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
  pub message: String,
  /// SMTP reply code, when the server answered.
  pub code: Option<String>,
  /// Reply text that came with the code.
  pub response: Option<String>,
}

impl TransportError {
  pub fn new(message: impl Into<String>) -> Self {
    TransportError {
      message: message.into(),
      code: None,
      response: None,
    }
  }

  pub fn with_code(mut self, code: impl Into<String>) -> Self {
    self.code = Some(code.into());
    self
  }

  pub fn with_response(mut self, response: impl Into<String>) -> Self {
    self.response = Some(response.into());
    self
  }
}

impl From<lettre::address::AddressError> for TransportError {
  fn from(err: lettre::address::AddressError) -> Self {
    TransportError::new(format!("Invalid address: {}", err))
  }
}

impl From<lettre::error::Error> for TransportError {
  fn from(err: lettre::error::Error) -> Self {
    TransportError::new(format!("Failed to build message: {}", err))
  }
}

impl From<lettre::transport::smtp::Error> for TransportError {
  fn from(err: lettre::transport::smtp::Error) -> Self {
    let mut error = TransportError::new(err.to_string());
    if let Some(code) = err.status() {
      error = error.with_code(code.to_string());
      // For reply errors lettre keeps the server's text as the source.
      if let Some(response) = std::error::Error::source(&err) {
        error = error.with_response(response.to_string());
      }
    }
    error
  }
}
