//! PostgreSQL connection pool

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    config::DatabaseConfig,
    error::{Error, Result},
};

/// Connect a pool, retrying with exponential backoff
///
/// Attempts `1 + max_retries` connections; the delay starts at
/// `retry_delay_secs` and doubles after each failure.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                tracing::info!(
                    attempts = attempt + 1,
                    max_connections = config.max_connections,
                    min_connections = config.min_connections,
                    "Database connection pool created"
                );
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        attempt,
                        e
                    );
                    return Err(e);
                }

                let delay = backoff(base_delay, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

async fn try_create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connection_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| {
            Error::Connection(format!(
                "{} at '{}': {}",
                categorize_db_error(&e),
                redact_password(&config.url),
                e
            ))
        })
}

/// Delay before retry number `attempt` (1-based)
fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
}

/// Replace the password of a connection URL with `***`
fn redact_password(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    let Some(at) = url[scheme_end..].find('@').map(|i| i + scheme_end) else {
        return url.to_string();
    };

    match url[scheme_end..at].find(':') {
        Some(colon) => format!("{}:***{}", &url[..scheme_end + colon], &url[at..]),
        None => url.to_string(),
    }
}

fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error as E;
    match err {
        E::Configuration(_) => "Invalid connection settings",
        E::Database(_) => "Database rejected the connection",
        E::Io(_) => "Network I/O error",
        E::Tls(_) => "TLS error",
        E::PoolTimedOut => "Timed out waiting for a connection",
        _ => "Connection error",
    }
}
