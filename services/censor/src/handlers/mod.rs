use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::post,
    Router,
};

use newsroom_service::envelope::{decode_body, Failure, Success};

use crate::censor::Censor;
use crate::models::{CensorBody, CensorRequest};

/// `POST /censor` bound to `censor`
pub fn router(censor: Arc<Censor>) -> Router {
    Router::new()
        .route("/censor", post(check_content))
        .with_state(censor)
}

/// Report whether the submitted text contains a banned substring
pub async fn check_content(
    State(censor): State<Arc<Censor>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Success<CensorBody>, Failure> {
    let req: CensorRequest = decode_body(body)?;

    let censored = censor.is_censored(&req.content);
    if censored {
        tracing::info!("Content rejected by censor");
    }

    Ok(Success::new(CensorBody { censored }))
}
