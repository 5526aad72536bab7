//! POST /ask — retrieve relevant news and generate an answer.

use std::sync::Arc;

use axum::{Json, extract::State};
use news_retriever::AnswerMode;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Returned when retrieval yields no documents for the query.
const NO_RESULTS_MESSAGE: &str = "Sorry, I couldn't find relevant news for that query";

/// Handler: POST /ask
///
/// Always answers 200 with an [`AskResponse`]; bad modes, empty retrieval
/// and backend failures all come back as message-only bodies.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is happening with Apple?","mode":"concise"}'
/// ```
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> Json<AskResponse> {
    let mode = match body.mode.as_deref().unwrap_or("concise").parse::<AnswerMode>() {
        Ok(mode) => mode,
        Err(e) => return Json(AskResponse::message(e.to_string())),
    };
    let top_k = body.top_k.unwrap_or_else(|| state.retriever.top_k());

    let sources = match state.retriever.retrieve(&body.query, top_k, mode).await {
        Ok(sources) => sources,
        Err(e) => {
            error!(target: "api::ask", error = %e, "retrieval failed");
            return Json(AskResponse::message(format!("An error occurred: {e}")));
        }
    };

    if sources.is_empty() {
        return Json(AskResponse::message(NO_RESULTS_MESSAGE));
    }

    let answer = match state.composer.generate(&body.query, &sources, mode).await {
        Ok(answer) => answer,
        Err(e) => {
            error!(target: "api::ask", error = %e, "generation failed");
            return Json(AskResponse::message(format!("An error occurred: {e}")));
        }
    };

    info!(
        target: "api::ask",
        mode = %mode,
        sources = sources.len(),
        "answered query"
    );

    Json(AskResponse { answer, sources })
}
