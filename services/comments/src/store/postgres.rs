use sqlx::PgPool;

use newsroom_service::repository::{RepositoryError, RepositoryOperation, RepositoryResult};

use super::{check_parent, CommentStore};
use crate::models::{Comment, NewComment};

const PARENT_NEWS_ID: &str = "SELECT news_id FROM comments WHERE id = $1";

const INSERT: &str = "INSERT INTO comments (news_id, parent_id, content, pub_time) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, news_id, parent_id, content, pub_time";

const LIST_BY_NEWS: &str = "SELECT id, news_id, parent_id, content, pub_time FROM comments \
     WHERE news_id = $1 \
     ORDER BY pub_time ASC, id ASC";

/// PostgreSQL-backed comment store
#[derive(Debug, Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn failed(operation: RepositoryOperation) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |err| RepositoryError::from(err).with_operation(operation)
}

impl CommentStore for PgCommentStore {
    async fn add(&self, comment: NewComment) -> RepositoryResult<Comment> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(failed(RepositoryOperation::Insert))?;

        if let Some(parent_id) = comment.parent_id {
            let parent_news_id: Option<i64> = sqlx::query_scalar(PARENT_NEWS_ID)
                .bind(parent_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(failed(RepositoryOperation::Lookup))?;
            check_parent(parent_id, parent_news_id, comment.news_id)?;
        }

        let stored = sqlx::query_as::<_, Comment>(INSERT)
            .bind(comment.news_id)
            .bind(comment.parent_id)
            .bind(&comment.content)
            .bind(chrono::Utc::now().timestamp())
            .fetch_one(&mut *tx)
            .await
            .map_err(failed(RepositoryOperation::Insert))?;

        tx.commit()
            .await
            .map_err(failed(RepositoryOperation::Insert))?;

        Ok(stored)
    }

    async fn list_by_news(&self, news_id: i64) -> RepositoryResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(LIST_BY_NEWS)
            .bind(news_id)
            .fetch_all(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::List))
    }
}

/// Run with `NEWSROOM_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`
///
/// Each test works on a session-local temporary `comments` table over a
/// single-connection pool, so nothing persists in the target database.
#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_service::repository::RepositoryErrorKind;
    use sqlx::postgres::PgPoolOptions;

    const CREATE_COMMENTS: &str = "CREATE TEMP TABLE comments (
        id        BIGSERIAL PRIMARY KEY,
        news_id   BIGINT NOT NULL,
        parent_id BIGINT REFERENCES comments (id),
        content   TEXT   NOT NULL,
        pub_time  BIGINT NOT NULL
    )";

    async fn store() -> PgCommentStore {
        let url = std::env::var("NEWSROOM_TEST_DATABASE_URL")
            .expect("NEWSROOM_TEST_DATABASE_URL must be set for database tests");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();

        sqlx::query(CREATE_COMMENTS).execute(&pool).await.unwrap();
        PgCommentStore::new(pool)
    }

    fn new_comment(news_id: i64, parent_id: Option<i64>, content: &str) -> NewComment {
        NewComment {
            news_id,
            parent_id,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires NEWSROOM_TEST_DATABASE_URL"]
    async fn test_add_and_list_in_order() {
        let store = store().await;

        let first = store.add(new_comment(1, None, "first")).await.unwrap();
        let reply = store
            .add(new_comment(1, Some(first.id), "reply"))
            .await
            .unwrap();
        store.add(new_comment(2, None, "elsewhere")).await.unwrap();

        let listed = store.list_by_news(1).await.unwrap();
        assert_eq!(listed, vec![first, reply.clone()]);
        assert_eq!(reply.parent_id, listed.first().map(|c| c.id));
        assert!(store.list_by_news(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires NEWSROOM_TEST_DATABASE_URL"]
    async fn test_reply_to_missing_parent() {
        let store = store().await;

        let err = store.add(new_comment(1, Some(404), "orphan")).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::Insert);
    }

    #[tokio::test]
    #[ignore = "requires NEWSROOM_TEST_DATABASE_URL"]
    async fn test_reply_across_news_items() {
        let store = store().await;

        let parent = store.add(new_comment(1, None, "first")).await.unwrap();
        let err = store
            .add(new_comment(2, Some(parent.id), "wrong thread"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, RepositoryErrorKind::ConstraintViolation);
        assert!(store.list_by_news(2).await.unwrap().is_empty());
    }
}
