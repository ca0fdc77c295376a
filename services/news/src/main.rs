use std::sync::Arc;

use news::{PgNewsStore, SERVICE_NAME};
use newsroom_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service(SERVICE_NAME)?;
    init_tracing(&config)?;

    let pool = create_pool(config.require_database()?).await?;
    let store = Arc::new(PgNewsStore::new(pool));

    tracing::info!("  GET /news/id  - Post by id");
    tracing::info!("  GET /news/reg - Posts by regular expression");

    Server::new(config).serve(news::app(store)).await?;

    Ok(())
}
