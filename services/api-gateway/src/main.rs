use api_gateway::SERVICE_NAME;
use newsroom_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service(SERVICE_NAME)?;
    init_tracing(&config)?;

    tracing::info!("  GET /       - Liveness");
    tracing::info!("  GET /health - Health check");

    Server::new(config).serve(api_gateway::app()).await?;

    Ok(())
}
