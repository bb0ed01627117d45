use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    tuntikirja::startup::init_logging()?;

    info!("Starting tuntikirja");

    // Load configuration
    let config = tuntikirja::startup::load_config()?;

    // Start the tracker service and console loop
    tuntikirja::startup::run(config).await
}
