use serde::{Deserialize, Serialize};

/// Raw form input. Every field is optional so that absent fields surface as
/// a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactRequest {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

impl ContactRequest {
  pub fn new(name: &str, email: &str, message: &str) -> Self {
    ContactRequest {
      name: Some(name.to_string()),
      email: Some(email.to_string()),
      message: Some(message.to_string()),
    }
  }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub name: String,
  pub email: String,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
  pub success: bool,
  pub message: String,
  pub message_id: String,
}

impl SendEmailResponse {
  pub fn sent(message_id: String) -> Self {
    SendEmailResponse {
      success: true,
      message: "Email sent successfully!".to_string(),
      message_id,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
  pub status: String,
  pub message: String,
}

impl HealthResponse {
  pub fn ok() -> Self {
    HealthResponse {
      status: "ok".to_string(),
      message: "Server is running".to_string(),
    }
  }
}
