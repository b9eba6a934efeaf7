use axum::{
  extract::{FromRequest, Request},
  http::header::CONTENT_TYPE,
  Form, Json,
};
use serde::de::DeserializeOwned;

use crate::utils::error::AppError;

/// Body extractor accepting either JSON or a url-encoded form.
///
/// Any other (or missing) content type yields `T::default()`, so an
/// unparseable submission is reported by validation rather than by the
/// extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
  S: Send + Sync,
  T: DeserializeOwned + Default + Send,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let content_type = req
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .unwrap_or_default()
      .to_ascii_lowercase();

    if is_json_content_type(&content_type) {
      let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
        tracing::warn!("Rejected JSON body: {}", e);
        AppError::bad_request("Invalid request body")
      })?;
      return Ok(Self(value));
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
      let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
        tracing::warn!("Rejected form body: {}", e);
        AppError::bad_request("Invalid request body")
      })?;
      return Ok(Self(value));
    }

    tracing::debug!(content_type = %content_type, "Unsupported body content type, treating as empty");
    Ok(Self(T::default()))
  }
}

/// `application/json` or any `application/*+json` type, ignoring parameters.
fn is_json_content_type(content_type: &str) -> bool {
  let essence = content_type.split(';').next().unwrap_or_default().trim();

  match essence.split_once('/') {
    Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domains::contact::model::ContactRequest;
  use axum::{body::Body, http::StatusCode, response::IntoResponse};

  async fn extract(content_type: &str, body: &str) -> Result<ContactRequest, StatusCode> {
    let req = axum::http::Request::builder()
      .method("POST")
      .uri("/api/send-email")
      .header(CONTENT_TYPE, content_type)
      .body(Body::from(body.to_string()))
      .expect("build request");

    JsonOrForm::<ContactRequest>::from_request(req, &())
      .await
      .map(|JsonOrForm(value)| value)
      .map_err(|e| e.into_response().status())
  }

  #[test]
  fn test_is_json_content_type() {
    assert!(is_json_content_type("application/json"));
    assert!(is_json_content_type("application/json; charset=utf-8"));
    assert!(is_json_content_type("application/vnd.api+json"));
    assert!(!is_json_content_type("text/foo+json"));
    assert!(!is_json_content_type("text/json"));
    assert!(!is_json_content_type("application/jsonx"));
    assert!(!is_json_content_type(""));
  }

  #[tokio::test]
  async fn test_extracts_json_with_suffix() {
    let value = extract(
      "application/vnd.api+json",
      r#"{"name":"Jo","email":"jo@x.com","message":"Hi"}"#,
    )
    .await
    .unwrap();
    assert_eq!(value, ContactRequest::new("Jo", "jo@x.com", "Hi"));
  }

  #[tokio::test]
  async fn test_non_application_json_suffix_is_treated_as_empty() {
    let value = extract("text/foo+json", r#"{"name":"Jo","email":"jo@x.com","message":"Hi"}"#)
      .await
      .unwrap();
    assert_eq!(value, ContactRequest::default());
  }

  #[tokio::test]
  async fn test_malformed_json_is_rejected() {
    let status = extract("application/json", "{\"name\":").await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn test_extracts_form() {
    let value = extract(
      "application/x-www-form-urlencoded",
      "name=Jo&email=jo%40x.com&message=Hi",
    )
    .await
    .unwrap();
    assert_eq!(value, ContactRequest::new("Jo", "jo@x.com", "Hi"));
  }
}
