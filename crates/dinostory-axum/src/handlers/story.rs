//! `POST /generate-story`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use dinostory_core::contracts::http::{StoryRequestBody, StoryResponseBody};
use dinostory_core::{StoryRequest, Style};

use super::parse_json_body;
use crate::error::HttpError;
use crate::state::AppState;

/// Compose a prompt from the three choices and return the generated story.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StoryResponseBody>, HttpError> {
    let body: StoryRequestBody = parse_json_body(&body)?;
    let request = StoryRequest::new(body.dinosaur, Style::from_key(&body.style), body.lesson)?;
    let prompt = request.prompt(state.locale);

    tracing::info!(
        target: "dinostory.http",
        dinosaur = request.subject(),
        style = request.style().key(),
        "Generating story"
    );

    let story = state.story.generate_story(&prompt).await.map_err(|err| {
        let err = HttpError::from(err);
        tracing::warn!(target: "dinostory.http", status = err.status().as_u16(), error = %err, "Story generation failed");
        err
    })?;

    Ok(Json(StoryResponseBody { story }))
}
