use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::email::SmtpConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SITE_NAME: &str = "Vicious Delicious";

/// Process configuration, read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
  pub port: u16,
  pub smtp: SmtpConfig,
  /// Operator address for notifications. Falls back to the SMTP user.
  pub recipient_email: Option<String>,
  pub send_confirmation: bool,
  pub environment: String,
  pub site_name: String,
  pub static_dir: Option<PathBuf>,
}

impl Config {
  pub fn from_env() -> Self {
    Self::from_vars(|key| env::var(key).ok())
  }

  /// Builds the configuration from an arbitrary variable lookup.
  pub fn from_vars<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = SmtpConfig::default();
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    let smtp = SmtpConfig {
      host: non_empty("SMTP_HOST").unwrap_or(defaults.host),
      port: parse_or("SMTP_PORT", non_empty("SMTP_PORT"), defaults.port),
      secure: is_true(non_empty("SMTP_SECURE")),
      username: non_empty("SMTP_USER"),
      password: non_empty("SMTP_PASS"),
      timeout: Duration::from_secs(parse_or(
        "SMTP_TIMEOUT_SECS",
        non_empty("SMTP_TIMEOUT_SECS"),
        defaults.timeout.as_secs(),
      )),
    };

    Config {
      port: parse_or("PORT", non_empty("PORT"), DEFAULT_PORT),
      smtp,
      recipient_email: non_empty("RECIPIENT_EMAIL"),
      send_confirmation: is_true(non_empty("SEND_CONFIRMATION")),
      environment: non_empty("APP_ENV")
        .or_else(|| non_empty("NODE_ENV"))
        .unwrap_or_else(|| "production".to_string()),
      site_name: non_empty("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
      static_dir: non_empty("STATIC_DIR").map(PathBuf::from),
    }
  }

  /// Error details are only returned to clients in development.
  pub fn expose_error_details(&self) -> bool {
    self.environment == "development"
  }

  pub fn recipient(&self) -> Option<&str> {
    self.recipient_email.as_deref().or(self.smtp.username.as_deref())
  }
}

fn is_true(value: Option<String>) -> bool {
  value.as_deref() == Some("true")
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
  T: FromStr + Copy + std::fmt::Display,
{
  match value {
    Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
      tracing::warn!("Invalid value {:?} for {}, using default {}", raw, key, default);
      default
    }),
    None => default,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::collections::HashMap;

  fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Config::from_vars(|key| vars.get(key).cloned())
  }

  #[test]
  fn test_defaults() {
    let config = config_from(&[]);

    assert_eq!(config.port, 3000);
    assert_eq!(config.smtp.host, "smtp.gmail.com");
    assert_eq!(config.smtp.port, 587);
    assert!(!config.smtp.secure);
    assert_eq!(config.smtp.timeout, Duration::from_secs(30));
    assert!(!config.smtp.is_configured());
    assert!(!config.send_confirmation);
    assert!(!config.expose_error_details());
    assert_eq!(config.site_name, "Vicious Delicious");
    assert_eq!(config.recipient(), None);
    assert_eq!(config.static_dir, None);
  }

  #[test]
  fn test_reads_all_values() {
    let config = config_from(&[
      ("PORT", "8080"),
      ("SMTP_HOST", "smtp.example.com"),
      ("SMTP_PORT", "465"),
      ("SMTP_SECURE", "true"),
      ("SMTP_USER", "relay@example.com"),
      ("SMTP_PASS", "secret"),
      ("RECIPIENT_EMAIL", "band@example.com"),
      ("SEND_CONFIRMATION", "true"),
      ("NODE_ENV", "development"),
      ("SMTP_TIMEOUT_SECS", "5"),
      ("SITE_NAME", "The Band"),
      ("STATIC_DIR", "public"),
    ]);

    assert_eq!(config.port, 8080);
    assert_eq!(config.smtp.host, "smtp.example.com");
    assert_eq!(config.smtp.port, 465);
    assert!(config.smtp.secure);
    assert_eq!(config.smtp.credentials(), Some(("relay@example.com", "secret")));
    assert_eq!(config.smtp.timeout, Duration::from_secs(5));
    assert_eq!(config.recipient(), Some("band@example.com"));
    assert!(config.send_confirmation);
    assert!(config.expose_error_details());
    assert_eq!(config.site_name, "The Band");
    assert_eq!(config.static_dir, Some(PathBuf::from("public")));
  }

  #[test]
  fn test_recipient_defaults_to_smtp_user() {
    let config = config_from(&[("SMTP_USER", "relay@example.com"), ("SMTP_PASS", "secret")]);
    assert_eq!(config.recipient(), Some("relay@example.com"));
  }

  #[test]
  fn test_booleans_require_literal_true() {
    let config = config_from(&[("SMTP_SECURE", "1"), ("SEND_CONFIRMATION", "TRUE")]);
    assert!(!config.smtp.secure);
    assert!(!config.send_confirmation);
  }

  #[test]
  fn test_empty_credentials_are_unset() {
    let config = config_from(&[("SMTP_USER", ""), ("SMTP_PASS", "secret")]);
    assert_eq!(config.smtp.username, None);
    assert!(!config.smtp.is_configured());
  }

  #[test]
  fn test_invalid_numbers_fall_back_to_defaults() {
    let config = config_from(&[("PORT", "abc"), ("SMTP_PORT", "70000"), ("SMTP_TIMEOUT_SECS", "-1")]);
    assert_eq!(config.port, 3000);
    assert_eq!(config.smtp.port, 587);
    assert_eq!(config.smtp.timeout, Duration::from_secs(30));
  }

  #[test]
  fn test_app_env_takes_precedence_over_node_env() {
    let config = config_from(&[("APP_ENV", "production"), ("NODE_ENV", "development")]);
    assert!(!config.expose_error_details());
  }

  #[test]
  #[serial]
  fn test_from_env_reads_process_environment() {
    env::set_var("SMTP_USER", "env-user@example.com");
    env::set_var("SMTP_PASS", "env-secret");
    env::set_var("SEND_CONFIRMATION", "true");

    let config = Config::from_env();
    assert_eq!(config.smtp.credentials(), Some(("env-user@example.com", "env-secret")));
    assert!(config.send_confirmation);

    env::remove_var("SMTP_USER");
    env::remove_var("SMTP_PASS");
    env::remove_var("SEND_CONFIRMATION");
  }
}
