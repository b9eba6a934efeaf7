use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use tower::ServiceExt;

use crate::{
  app::create_app,
  domains::contact::service::{ContactServiceImpl, RelaySettings},
  email::{Mailer, OutboundMessage, SentMessage, TransportError},
  state::SharedAppState,
};

mockall::mock! {
  pub Mailer {}

  #[async_trait]
  impl Mailer for Mailer {
    async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, TransportError>;
  }
}

pub fn relay_settings() -> RelaySettings {
  RelaySettings {
    sender: Some("relay@example.com".to_string()),
    recipient: Some("band@example.com".to_string()),
    send_confirmation: false,
    site_name: "Vicious Delicious".to_string(),
    send_timeout: Duration::from_secs(5),
  }
}

pub fn app_with_mailer(mailer: MockMailer, settings: RelaySettings, expose_error_details: bool) -> Router {
  let service = Arc::new(ContactServiceImpl::new(mailer, settings));
  create_app(SharedAppState::new(service, expose_error_details), None)
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request");

  send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Bytes) {
  let mut builder = Request::builder().method("POST").uri(uri);
  if let Some(content_type) = content_type {
    builder = builder.header("content-type", content_type);
  }
  let request = builder.body(Body::from(body.to_string())).expect("build request");

  send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("GET")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}
