use crate::email::{
  types::{Mailbox, OutboundMessage, SentMessage, SmtpConfig, TransportError},
  Mailer,
};
use anyhow::Result;
use async_trait::async_trait;
use lettre::{
  message::{Mailbox as LettreMailbox, MultiPart},
  transport::smtp::authentication::Credentials,
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

pub struct EmailService {
  smtp_config: SmtpConfig,
  transporter: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailService {
  pub fn new(smtp_config: SmtpConfig) -> Result<Self> {
    let builder = if smtp_config.host == "localhost" || smtp_config.host == "mailhog" {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp_config.host)
    } else if smtp_config.secure {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_config.host)?
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp_config.host)?
    };

    let builder = builder.port(smtp_config.port).timeout(Some(smtp_config.timeout));

    let transporter = match smtp_config.credentials() {
      Some((username, password)) => builder
        .credentials(Credentials::new(username.to_string(), password.to_string()))
        .build(),
      None => builder.build(),
    };

    Ok(EmailService {
      smtp_config,
      transporter,
    })
  }

  pub fn build_message(message: &OutboundMessage, message_id: &str) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
      .message_id(Some(message_id.to_string()))
      .from(to_lettre_mailbox(&message.from)?)
      .to(message.to.parse::<LettreMailbox>()?)
      .subject(message.subject.clone());

    // Reply-To is the submitter's address and only passed the loose form check.
    if let Some(reply_to) = &message.reply_to {
      match reply_to.parse::<LettreMailbox>() {
        Ok(mailbox) => builder = builder.reply_to(mailbox),
        Err(e) => tracing::warn!(reply_to = %reply_to, "Omitting unparseable Reply-To header: {}", e),
      }
    }

    let email = builder.multipart(MultiPart::alternative_plain_html(
      message.text_body.clone(),
      message.html_body.clone(),
    ))?;

    Ok(email)
  }
}

#[async_trait]
impl Mailer for EmailService {
  async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, TransportError> {
    let message_id = generate_message_id(&message.from.email);
    let email = Self::build_message(message, &message_id)?;

    tracing::debug!(host = %self.smtp_config.host, to = %message.to, "Sending email");
    self.transporter.send(email).await?;

    Ok(SentMessage { message_id })
  }
}

fn to_lettre_mailbox(mailbox: &Mailbox) -> Result<LettreMailbox, TransportError> {
  Ok(LettreMailbox::new(mailbox.name.clone(), mailbox.email.parse()?))
}

fn generate_message_id(sender: &str) -> String {
  let domain = sender
    .rsplit_once('@')
    .map(|(_, domain)| domain)
    .filter(|domain| !domain.is_empty())
    .unwrap_or("localhost");
  format!("<{}@{}>", Uuid::new_v4(), domain)
}
