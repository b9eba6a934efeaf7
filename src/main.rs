use std::net::{Ipv4Addr, SocketAddr};

use tokio::signal;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use contact_relay::app::create_app;
use contact_relay::config::Config;
use contact_relay::email::EmailService;
use contact_relay::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::from_env();

  if !config.smtp.is_configured() {
    tracing::warn!("SMTP credentials not configured. Make sure to configure your .env file with SMTP credentials");
  }

  let email_service = EmailService::new(config.smtp.clone())?;
  let app_state = SharedAppState::from_config(email_service, &config);

  let app = create_app(app_state, config.static_dir.as_deref());

  let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
  let listener = tokio::net::TcpListener::bind(addr).await?;

  tracing::info!("Server is running on port {}", config.port);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
