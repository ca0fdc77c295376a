use std::sync::Arc;

use comments::{PgCommentStore, SERVICE_NAME};
use newsroom_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service(SERVICE_NAME)?;
    init_tracing(&config)?;

    let pool = create_pool(config.require_database()?).await?;
    let store = Arc::new(PgCommentStore::new(pool));

    tracing::info!("  POST /comments      - Add comment");
    tracing::info!("  GET  /comments/news - Comments of a news item");

    Server::new(config).serve(comments::app(store)).await?;

    Ok(())
}
