use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    Json,
};
use models::{Post, PostInput};

use super::AppState;
use crate::errors::ApiError;

/// Last path segment exactly as sent, without percent-decoding.
fn id_segment(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}

/// Path ids are signed decimal integers; anything else is a client error.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

fn parse_body(body: Result<Json<PostInput>, JsonRejection>) -> Result<PostInput, ApiError> {
    body.map(|Json(input)| input).map_err(|rejection| {
        tracing::debug!(error = %rejection, "body rejected");
        ApiError::InvalidBody
    })
}

pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.posts.list().await)
}

pub async fn get_post(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(id_segment(&uri))?;
    Ok(Json(state.posts.get(id).await?))
}

/// Answers 200 with the stored post, not 201.
pub async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let input = parse_body(body)?;
    Ok(Json(state.posts.create(input).await?))
}

pub async fn update_post(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    // body problems win over a bad id, so validate here before parsing it;
    // PostService::update validates again on its own
    let input = parse_body(body)?;
    input.check()?;
    let id = parse_id(id_segment(&uri))?;
    Ok(Json(state.posts.update(id, input).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(id_segment(&uri))?;
    state.posts.delete(id).await?;
    Ok(StatusCode::OK)
}
