use sqlx::PgPool;

use newsroom_service::pagination::{offset, pages_number, resolve_page, Page, ITEMS_ON_PAGE};
use newsroom_service::repository::{RepositoryError, RepositoryOperation, RepositoryResult};

use super::NewsStore;
use crate::models::Post;

const LOOKUP: &str = "SELECT id, title, content, pub_time, link FROM posts WHERE id = $1";

const COUNT_MATCHES: &str = "SELECT count(*) FROM posts WHERE title ~ $1 OR content ~ $1";

const PAGE_OF_MATCHES: &str = "SELECT id, title, content, pub_time, link FROM posts \
     WHERE title ~ $1 OR content ~ $1 \
     ORDER BY pub_time DESC, id DESC \
     LIMIT $2 OFFSET $3";

/// PostgreSQL-backed post store
///
/// Patterns are evaluated by the server with the case-sensitive `~` operator.
#[derive(Debug, Clone)]
pub struct PgNewsStore {
    pool: PgPool,
}

impl PgNewsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn failed(operation: RepositoryOperation) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |err| RepositoryError::from(err).with_operation(operation)
}

impl NewsStore for PgNewsStore {
    async fn lookup(&self, id: i64) -> RepositoryResult<Post> {
        sqlx::query_as::<_, Post>(LOOKUP)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::Lookup))?
            .ok_or_else(|| RepositoryError::not_found("post", id))
    }

    async fn search(&self, pattern: &str, page: u32) -> RepositoryResult<Page<Post>> {
        // Count and page must see the same snapshot
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(failed(RepositoryOperation::Search))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(failed(RepositoryOperation::Search))?;

        let total: i64 = sqlx::query_scalar(COUNT_MATCHES)
            .bind(pattern)
            .fetch_one(&mut *tx)
            .await
            .map_err(failed(RepositoryOperation::Count))?;

        let pages = pages_number(u64::try_from(total).unwrap_or(0), ITEMS_ON_PAGE);
        if pages == 0 {
            tx.commit()
                .await
                .map_err(failed(RepositoryOperation::Search))?;
            return Ok(Page::empty());
        }

        let current_page = resolve_page(page, pages);
        let skip = i64::try_from(offset(current_page, ITEMS_ON_PAGE)).unwrap_or(i64::MAX);

        let items = sqlx::query_as::<_, Post>(PAGE_OF_MATCHES)
            .bind(pattern)
            .bind(i64::from(ITEMS_ON_PAGE))
            .bind(skip)
            .fetch_all(&mut *tx)
            .await
            .map_err(failed(RepositoryOperation::Search))?;

        tx.commit()
            .await
            .map_err(failed(RepositoryOperation::Search))?;

        tracing::debug!(
            pattern,
            total,
            pages,
            current_page,
            returned = items.len(),
            "Search completed"
        );

        Ok(Page {
            items,
            pages_number: pages,
            current_page,
        })
    }
}
