use axum::{
  extract::State,
  response::Json as JsonResponse,
  routing::{get, post},
  Router,
};

use super::{
  model::{ContactRequest, HealthResponse, SendEmailResponse},
  service::ContactServiceError,
};
use crate::{
  state::{AppState, SharedAppState},
  utils::extract::JsonOrForm,
  AppError,
};

fn map_contact_service_error(e: ContactServiceError, expose_error_details: bool) -> AppError {
  match e {
    ContactServiceError::MissingField | ContactServiceError::InvalidEmailFormat => AppError::bad_request(e.to_string()),
    ContactServiceError::NotConfigured => AppError::internal_server_error(e.to_string()),
    ContactServiceError::SendFailed(ref source) => {
      let details = expose_error_details.then(|| source.message.clone());
      let error = AppError::internal_server_error(e.to_string());
      match details {
        Some(details) => error.with_details(details),
        None => error,
      }
    }
  }
}

pub fn contact_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/send-email", post(send_email_handler))
    .route("/health", get(health_handler))
}

pub async fn send_email_handler(
  State(state): State<SharedAppState>,
  JsonOrForm(payload): JsonOrForm<ContactRequest>,
) -> Result<JsonResponse<SendEmailResponse>, AppError> {
  state
    .send_contact_email(payload)
    .await
    .map(|sent| JsonResponse(SendEmailResponse::sent(sent.message_id)))
    .map_err(|e| map_contact_service_error(e, state.expose_error_details()))
}

pub async fn health_handler() -> JsonResponse<HealthResponse> {
  JsonResponse(HealthResponse::ok())
}
