use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::get,
    Router,
};

use newsroom_service::envelope::{decode_body, Failure, Success};
use newsroom_service::ids::CorrelationId;
use newsroom_service::pagination::requested_page;
use newsroom_service::Error;

use crate::models::{GetPostByIdRequest, GetPostsByRegExpRequest, PostBody, PostsBody};
use crate::store::NewsStore;

/// Routes under `/news`, bound to `store`
pub fn router<S: NewsStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/news/id", get(get_post_by_id::<S>))
        .route("/news/reg", get(get_posts_by_reg_exp::<S>))
        .with_state(store)
}

/// Look up a single post by id
pub async fn get_post_by_id<S: NewsStore>(
    State(store): State<Arc<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Success<PostBody>, Failure> {
    let req: GetPostByIdRequest = decode_body(body)?;

    tracing::debug!(id = req.id, "Getting post");

    let post = store.lookup(req.id).await.map_err(Error::from)?;

    Ok(Success::new(PostBody { post }))
}

/// Search posts by regular expression, one page at a time
///
/// Every response, including failures, echoes the request id.
pub async fn get_posts_by_reg_exp<S: NewsStore>(
    State(store): State<Arc<S>>,
    correlation: CorrelationId,
    body: Result<Bytes, BytesRejection>,
) -> Result<Success<PostsBody>, Failure> {
    let request_id = correlation.into_inner();
    let fail = |err: Error| Failure::from(err).with_request_id(request_id.clone());

    let req: GetPostsByRegExpRequest = decode_body(body).map_err(fail)?;
    let page = requested_page(req.current_page);

    tracing::debug!(reg_exp = %req.reg_exp, page, "Searching posts");

    let result = store
        .search(&req.reg_exp, page)
        .await
        .map_err(|e| fail(Error::from(e)))?;

    let pagination = result.pagination();

    Ok(Success::new(PostsBody {
        posts: result.items,
    })
    .with_pagination(pagination)
    .with_request_id(request_id))
}
