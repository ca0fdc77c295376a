use std::sync::Arc;

use censor::{Censor, CensorConfig, SERVICE_NAME};
use newsroom_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let figment = Config::figment(SERVICE_NAME);
    let config = Config::from_figment(&figment)?;
    init_tracing(&config)?;

    let censor_config = CensorConfig::from_figment(&figment)?;
    let filter = Arc::new(Censor::from(censor_config));

    tracing::info!(banned = filter.banned().len(), "Censor loaded");
    tracing::info!("  POST /censor - Check content");

    Server::new(config).serve(censor::app(filter)).await?;

    Ok(())
}
