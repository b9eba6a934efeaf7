use std::sync::Arc;

use crate::{
  config::Config,
  domains::contact::{
    model::ContactRequest,
    service::{ContactService, ContactServiceError, ContactServiceImpl, RelaySettings},
  },
  email::{Mailer, SentMessage},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn send_contact_email(
    &self,
    req: ContactRequest,
  ) -> impl std::future::Future<Output = Result<SentMessage, ContactServiceError>> + Send;
  fn expose_error_details(&self) -> bool;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub contact_service: Arc<dyn ContactService>,
  pub expose_error_details: bool,
}

impl SharedAppState {
  pub fn new(contact_service: Arc<dyn ContactService>, expose_error_details: bool) -> Self {
    Self {
      contact_service,
      expose_error_details,
    }
  }

  pub fn from_config<M>(mailer: M, config: &Config) -> Self
  where
    M: Mailer + 'static,
  {
    let contact_service = Arc::new(ContactServiceImpl::new(mailer, RelaySettings::from(config)));

    Self::new(contact_service, config.expose_error_details())
  }
}

impl AppState for SharedAppState {
  async fn send_contact_email(&self, req: ContactRequest) -> Result<SentMessage, ContactServiceError> {
    self.contact_service.send_contact_email(req).await
  }

  fn expose_error_details(&self) -> bool {
    self.expose_error_details
  }
}
