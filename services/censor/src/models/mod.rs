use serde::{Deserialize, Serialize};

/// Body of `POST /censor`
#[derive(Debug, Deserialize)]
pub struct CensorRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CensorBody {
    pub censored: bool,
}
