//! Chat endpoints: blocking and streaming answers

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    Json,
};
use futures_util::stream::Stream;
use futures_util::StreamExt;
use std::convert::Infallible;

use crate::error::{Error, Result};
use crate::retrieval::DEFAULT_TOP_K;
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, ChatStreamRequest};

/// POST /chat - Answer a question with a complete response.
///
/// The question is the latest user message; earlier history is accepted
/// but does not affect retrieval or prompting.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if request.notebook_id.trim().is_empty() {
        return Err(Error::validation("notebookId is required"));
    }
    let question = request
        .latest_user_message()
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| Error::validation("No user message to answer"))?;

    tracing::info!("Chat: \"{}\" (notebook {})", question, request.notebook_id);

    let answer = state
        .query()
        .answer(&question, &request.notebook_id, DEFAULT_TOP_K)
        .await?;

    Ok(Json(ChatResponse { answer }))
}

/// POST /chat-stream - Answer a question as a server-sent-event stream.
///
/// Each fragment is one `data: <fragment>` event; the stream closing marks
/// the end of the answer. A mid-stream model failure closes the stream
/// rather than emitting a malformed event, and a disconnected client drops
/// the stream, which releases the model call.
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatStreamRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    if request.notebook_id.trim().is_empty() {
        return Err(Error::validation("notebookId is required"));
    }
    if request.message.trim().is_empty() {
        return Err(Error::validation("message is required"));
    }

    tracing::info!(
        "Chat stream: \"{}\" (notebook {})",
        request.message,
        request.notebook_id
    );

    let fragments = state
        .query()
        .answer_stream(&request.message, &request.notebook_id, DEFAULT_TOP_K)
        .await?;

    let events = fragments.scan((), |_, fragment| {
        futures_util::future::ready(match fragment {
            Ok(text) => Some(Ok(Event::default().data(text))),
            Err(e) => {
                tracing::error!("Answer stream failed mid-stream: {}", e);
                None
            }
        })
    });

    Ok(Sse::new(events))
}
