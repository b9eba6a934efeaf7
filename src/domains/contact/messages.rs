//! Composition of the notification and confirmation emails.

use super::{model::Submission, service::RelaySettings};
use crate::email::{Mailbox, OutboundMessage};

/// Email to the site operator. The submitter's name is shown as the sender,
/// but the message goes out from the authenticated SMTP address with the
/// submitter set as `Reply-To`.
pub fn build_notification(submission: &Submission, settings: &RelaySettings, sender: &str) -> OutboundMessage {
  let Submission { name, email, message } = submission;
  let recipient = settings.recipient.as_deref().unwrap_or(sender);

  let html_body = format!(
    r#"
<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">New Contact Form Message</h2>
  <div style="background-color: #f5f5f5; padding: 20px; border-radius: 5px; margin: 20px 0;">
    <p><strong>From:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Message:</strong></p>
    <p style="white-space: pre-wrap; background-color: white; padding: 15px; border-radius: 3px;">{message}</p>
  </div>
  <p style="color: #666; font-size: 12px;">This message was sent from the {site} contact form.</p>
</div>
"#,
    site = settings.site_name,
  );

  let text_body = format!("New Contact Form Message\n\nFrom: {name}\nEmail: {email}\n\nMessage:\n{message}\n");

  OutboundMessage {
    from: Mailbox::new(Some(name.clone()), sender),
    reply_to: Some(email.clone()),
    to: recipient.to_string(),
    subject: format!("New Contact Form Message from {name}"),
    html_body,
    text_body,
  }
}

/// Acknowledgement sent back to the submitter under the site's name.
pub fn build_confirmation(submission: &Submission, settings: &RelaySettings, sender: &str) -> OutboundMessage {
  let name = &submission.name;
  let site = &settings.site_name;

  let html_body = format!(
    r#"
<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Thank you for your message!</h2>
  <p>Hi {name},</p>
  <p>We've received your message and will get back to you as soon as possible.</p>
  <p>Best regards,<br>{site}</p>
</div>
"#
  );

  let text_body = format!(
    "Thank you for your message!\n\nHi {name},\n\nWe've received your message and will get back to you as soon as possible.\n\nBest regards,\n{site}"
  );

  OutboundMessage {
    from: Mailbox::new(Some(site.clone()), sender),
    reply_to: None,
    to: submission.email.clone(),
    subject: format!("Thank you for contacting {site}"),
    html_body,
    text_body,
  }
}
