//! Form submissions for the editable resources.
//!
//! Success redirects back to the tab, which reloads the list. Failure keeps
//! the form open with what was submitted and leaves the list as the REST
//! layer has it.

use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    client::ClientError,
    error::AppError,
    pending::{PendingGuard, WriteKey},
    resources::Editable,
    state::AppState,
    status::{StatusEvent, StatusKind},
    views::{FormView, tab_href},
};

use super::console::{RecordKey, TabQuery, render_tab};

const DUPLICATE_MESSAGE: &str = "An identical request is already in progress";

pub async fn create<R: Editable>(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TabQuery>,
    Form(form): Form<R::Form>,
) -> Result<Response, AppError> {
    let _guard = begin(&state, WriteKey::create(R::KIND))?;
    let payload = R::payload(&form);

    match state.client.create::<R, _>(&payload).await {
        Ok(()) => Ok(back_to_tab::<R>(&state, &query)),
        Err(err) => {
            tracing::error!(resource = R::KIND.slug(), error = %err, "error creating record");
            let view = query.view_mode(state.config.console.default_view);
            let form = FormView::create::<R>(&form, view);
            failed_write::<R>(&state, &query, Some(form), err).await
        }
    }
}

pub async fn update<R: Editable>(
    State(state): State<Arc<AppState>>,
    RecordKey(key): RecordKey,
    Query(query): Query<TabQuery>,
    Form(form): Form<R::Form>,
) -> Result<Response, AppError> {
    let _guard = begin(&state, WriteKey::update(R::KIND, key))?;
    let payload = R::payload(&form);

    match state.client.update::<R, _>(key, &payload).await {
        Ok(()) => Ok(back_to_tab::<R>(&state, &query)),
        Err(err) => {
            tracing::error!(resource = R::KIND.slug(), key, error = %err, "error updating record");
            let view = query.view_mode(state.config.console.default_view);
            let form = FormView::edit::<R>(key, &form, view);
            failed_write::<R>(&state, &query, Some(form), err).await
        }
    }
}

pub async fn delete<R: Editable>(
    State(state): State<Arc<AppState>>,
    RecordKey(key): RecordKey,
    Query(query): Query<TabQuery>,
) -> Result<Response, AppError> {
    let _guard = begin(&state, WriteKey::delete(R::KIND, key))?;

    match state.client.delete::<R>(key).await {
        Ok(()) => Ok(back_to_tab::<R>(&state, &query)),
        Err(err) => {
            tracing::error!(resource = R::KIND.slug(), key, error = %err, "error deleting record");
            failed_write::<R>(&state, &query, None, err).await
        }
    }
}

fn begin(state: &AppState, key: WriteKey) -> Result<PendingGuard, AppError> {
    state.pending.begin(key).ok_or_else(|| {
        tracing::warn!(?key, "rejected duplicate submission");
        state.status.error(format!("Error: {DUPLICATE_MESSAGE}"));
        AppError::conflict(DUPLICATE_MESSAGE)
    })
}

fn back_to_tab<R: Editable>(state: &AppState, query: &TabQuery) -> Response {
    let view = query.view_mode(state.config.console.default_view);
    Redirect::to(&tab_href(R::descriptor(), view)).into_response()
}

/// Re-renders the tab without announcing a reload, so the write's error
/// stays in the status slot.
async fn failed_write<R: Editable>(
    state: &AppState,
    query: &TabQuery,
    form: Option<FormView>,
    err: ClientError,
) -> Result<Response, AppError> {
    let notice = StatusEvent::new(StatusKind::Error, format!("Error: {err}"));
    let listing = TabQuery {
        view: query.view.clone(),
        q: None,
    };
    let page = render_tab::<R>(state, &state.client.quiet(), &listing, form, Some(notice)).await?;
    Ok((StatusCode::BAD_GATEWAY, page).into_response())
}
