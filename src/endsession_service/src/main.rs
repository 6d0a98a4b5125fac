use color_eyre::eyre::Result;
use endsession_adapters::ServiceSettings;
use endsession_service::{LogoutService, tracing::init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let settings = ServiceSettings::load()?;

    let logout_service = LogoutService::from_settings(&settings);

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting logout service...");

    logout_service.run_standalone(listener).await?;

    Ok(())
}
