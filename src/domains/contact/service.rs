use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::{
  messages::{build_confirmation, build_notification},
  model::{ContactRequest, Submission},
};
use crate::{
  config::Config,
  email::{Mailer, OutboundMessage, SentMessage, TransportError},
  utils::validate_email_format,
};

#[derive(Debug, Error)]
pub enum ContactServiceError {
  #[error("All fields are required")]
  MissingField,
  #[error("Invalid email format")]
  InvalidEmailFormat,
  #[error("Email service not configured. Please contact the administrator.")]
  NotConfigured,
  #[error("Failed to send email. Please try again later.")]
  SendFailed(#[source] TransportError),
}

/// The slice of [`Config`] the relay needs for every request.
#[derive(Debug, Clone)]
pub struct RelaySettings {
  /// Authenticated SMTP address; every outbound message is sent from it.
  /// `None` unless both SMTP user and password are configured.
  pub sender: Option<String>,
  pub recipient: Option<String>,
  pub send_confirmation: bool,
  pub site_name: String,
  pub send_timeout: Duration,
}

impl From<&Config> for RelaySettings {
  fn from(config: &Config) -> Self {
    RelaySettings {
      sender: config.smtp.credentials().map(|(username, _)| username.to_string()),
      recipient: config.recipient_email.clone(),
      send_confirmation: config.send_confirmation,
      site_name: config.site_name.clone(),
      send_timeout: config.smtp.timeout,
    }
  }
}

/// Checks that all fields are present and the email looks like an address.
pub fn validate(req: ContactRequest) -> Result<Submission, ContactServiceError> {
  let present = |field: Option<String>| field.filter(|value| !value.is_empty());

  let (Some(name), Some(email), Some(message)) = (present(req.name), present(req.email), present(req.message)) else {
    return Err(ContactServiceError::MissingField);
  };

  validate_email_format(&email).map_err(|_| ContactServiceError::InvalidEmailFormat)?;

  Ok(Submission { name, email, message })
}

#[async_trait]
pub trait ContactService: Send + Sync {
  async fn send_contact_email(&self, req: ContactRequest) -> Result<SentMessage, ContactServiceError>;
}

pub struct ContactServiceImpl<M> {
  mailer: M,
  settings: RelaySettings,
}

impl<M> ContactServiceImpl<M>
where
  M: Mailer,
{
  pub fn new(mailer: M, settings: RelaySettings) -> Self {
    Self { mailer, settings }
  }

  pub fn check_transport_ready(&self) -> bool {
    self.settings.sender.is_some()
  }

  pub async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, TransportError> {
    match tokio::time::timeout(self.settings.send_timeout, self.mailer.send(message)).await {
      Ok(outcome) => outcome,
      Err(_) => Err(
        TransportError::new(format!(
          "SMTP send timed out after {}ms",
          self.settings.send_timeout.as_millis()
        ))
        .with_code("ETIMEDOUT"),
      ),
    }
  }
}

#[async_trait]
impl<M> ContactService for ContactServiceImpl<M>
where
  M: Mailer,
{
  async fn send_contact_email(&self, req: ContactRequest) -> Result<SentMessage, ContactServiceError> {
    let submission = validate(req)?;

    if !self.check_transport_ready() {
      tracing::error!("SMTP credentials not configured");
      return Err(ContactServiceError::NotConfigured);
    }
    let sender = self.settings.sender.as_deref().ok_or(ContactServiceError::NotConfigured)?;

    let notification = build_notification(&submission, &self.settings, sender);
    let sent = self.send(&notification).await.map_err(|e| {
      tracing::error!(
        error = %e.message,
        code = ?e.code,
        response = ?e.response,
        to = %notification.to,
        "Error sending email"
      );
      ContactServiceError::SendFailed(e)
    })?;

    tracing::info!(message_id = %sent.message_id, "Contact notification sent");

    if self.settings.send_confirmation {
      let confirmation = build_confirmation(&submission, &self.settings, sender);
      match self.send(&confirmation).await {
        Ok(confirmed) => tracing::info!(message_id = %confirmed.message_id, "Confirmation sent"),
        Err(e) => tracing::warn!(
          error = %e.message,
          code = ?e.code,
          response = ?e.response,
          "Failed to send confirmation email"
        ),
      }
    }

    Ok(sent)
  }
}
