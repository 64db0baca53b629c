use axum::body::Body;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::reply::Reply;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Reply, AppError> {
    let body = axum::body::to_bytes(body, state.config.max_body_size)
        .await
        .map_err(|e| AppError::Body(e.to_string()))?;

    let form = parser::parse_form(&headers, body).await?;

    pipeline::run(&state, form).await
}
