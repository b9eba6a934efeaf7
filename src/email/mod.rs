//! Email sending functionality module
//!
//! This module provides the [`Mailer`] transport abstraction and its SMTP
//! implementation built on lettre.

mod service;
mod types;

use async_trait::async_trait;

pub use service::EmailService;
pub use types::{Mailbox, OutboundMessage, SentMessage, SmtpConfig, TransportError, DEFAULT_SMTP_TIMEOUT};

#[async_trait]
pub trait Mailer: Send + Sync {
  /// Hands a composed message to the mail server and returns its `Message-ID`.
  async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, TransportError>;
}
