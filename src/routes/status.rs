use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;

use crate::{state::AppState, status::StatusEvent};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(current))
        .route("/status/events", get(events))
}

async fn current(State(state): State<Arc<AppState>>) -> Json<StatusEvent> {
    Json(state.status.current())
}

/// Every status change as a `status` server-sent event.
async fn events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let receiver = state.status.subscribe();
    let stream = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let sse = Event::default().event("status").json_data(&event);
                    return Some((sse, receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "status subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
