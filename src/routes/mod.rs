use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::State,
    http::{Method, Uri},
    response::Redirect,
    routing::{MethodRouter, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    error::AppError,
    resources::{Coach, Editable, Parent, Player, PlayerParent, Resource, ResourceKind, Team},
    state::AppState,
    views::tab_href,
};

pub mod console;
pub mod status;
pub mod writes;

pub use console::TabQuery;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(editable::<Player>())
        .merge(editable::<Team>())
        .merge(read_only::<Coach>())
        .merge(read_only::<Parent>())
        .merge(read_only::<PlayerParent>())
        .merge(status::router())
        .nest_service("/assets", ServeDir::new(resolve_public_dir()))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// Tab page only. Record paths exist without handlers so writes get 405.
fn read_only<R: Resource>() -> Router<Arc<AppState>> {
    let path = R::descriptor().path;
    Router::new()
        .route(path, get(console::show::<R>))
        .route(&format!("{path}/{{key}}"), MethodRouter::new())
        .route(&format!("{path}/{{key}}/delete"), MethodRouter::new())
}

fn editable<R: Editable>() -> Router<Arc<AppState>> {
    let path = R::descriptor().path;
    Router::new()
        .route(path, get(console::show::<R>).post(writes::create::<R>))
        .route(&format!("{path}/new"), get(console::new_form::<R>))
        .route(&format!("{path}/{{key}}"), post(writes::update::<R>))
        .route(&format!("{path}/{{key}}/edit"), get(console::edit_form::<R>))
        .route(&format!("{path}/{{key}}/delete"), post(writes::delete::<R>))
}

async fn index(State(state): State<Arc<AppState>>) -> Redirect {
    let first = ResourceKind::ALL[0].descriptor();
    Redirect::to(&tab_href(first, state.config.console.default_view))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No console page at {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::method_not_allowed(format!("{method} is not supported on {}", uri.path()))
}

fn resolve_public_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("LEAGUE_CONSOLE_PUBLIC_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}
