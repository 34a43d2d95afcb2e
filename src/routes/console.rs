//! Tab pages: one resource, table or card layout, optional create/edit form.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    response::Html,
};
use chrono::Local;
use serde::Deserialize;

use crate::{
    client::RestClient,
    error::AppError,
    resources::{Editable, Resource},
    state::AppState,
    status::StatusEvent,
    views::{FormView, SectionView, TabView, ViewMode, project_name, tab_href},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TabQuery {
    pub view: Option<String>,
    pub q: Option<String>,
}

impl TabQuery {
    pub fn view_mode(&self, default: ViewMode) -> ViewMode {
        ViewMode::from_query(self.view.as_deref(), default)
    }

    /// The term as typed; `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().filter(|term| !term.trim().is_empty())
    }
}

/// Integer record key from the `{key}` path segment.
pub struct RecordKey(pub i64);

impl FromRequestParts<Arc<AppState>> for RecordKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Path(key) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(format!("Invalid record key: {}", rejection.body_text()))
            })?;
        Ok(Self(key))
    }
}

struct SearchView {
    action: &'static str,
    term: String,
    show_all_href: String,
}

#[derive(Template)]
#[template(path = "console.html")]
struct ConsoleTemplate {
    project_name: String,
    now: String,
    tabs: Vec<TabView>,
    slug: &'static str,
    base_path: &'static str,
    heading: &'static str,
    singular: &'static str,
    singular_lower: String,
    view: &'static str,
    show_table: bool,
    table_href: String,
    cards_href: String,
    reload_href: String,
    search: Option<SearchView>,
    new_href: Option<String>,
    form: Option<FormView>,
    section: SectionView,
    status_kind: &'static str,
    status_message: String,
    decay_ms: u64,
    disable_while_pending: bool,
}

pub async fn show<R: Resource>(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TabQuery>,
) -> Result<Html<String>, AppError> {
    render_tab::<R>(&state, &state.client, &query, None, None).await
}

pub async fn new_form<R: Editable>(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TabQuery>,
) -> Result<Html<String>, AppError> {
    let view = query.view_mode(state.config.console.default_view);
    let form = FormView::create::<R>(&R::Form::default(), view);
    render_tab::<R>(&state, &state.client, &query, Some(form), None).await
}

/// A key the REST layer does not know leaves the form closed; the status
/// slot already says what happened.
pub async fn edit_form<R: Editable>(
    State(state): State<Arc<AppState>>,
    RecordKey(key): RecordKey,
    Query(query): Query<TabQuery>,
) -> Result<Html<String>, AppError> {
    let view = query.view_mode(state.config.console.default_view);
    let form = state
        .client
        .find::<R>(key)
        .await
        .map(|record| FormView::edit::<R>(key, &record.to_form(), view));
    if form.is_none() {
        tracing::info!(resource = R::KIND.slug(), key, "no record to edit");
    }
    render_tab::<R>(&state, &state.client, &query, form, None).await
}

/// Loads the resource's rows through `client` and renders the whole page.
/// `notice` replaces the shared status snapshot in the rendered slot.
pub(crate) async fn render_tab<R: Resource>(
    state: &AppState,
    client: &RestClient,
    query: &TabQuery,
    form: Option<FormView>,
    notice: Option<StatusEvent>,
) -> Result<Html<String>, AppError> {
    let descriptor = R::descriptor();
    let console = &state.config.console;
    let view = query.view_mode(console.default_view);

    let records: Vec<R> = match query.term() {
        Some(term) => client.search(term).await,
        None => client.list(None).await,
    };
    let section = SectionView::build(&records);

    let search = descriptor.search_field.map(|_| SearchView {
        action: descriptor.path,
        term: query.term().unwrap_or_default().to_string(),
        show_all_href: tab_href(descriptor, view),
    });
    let new_href = descriptor
        .editable
        .then(|| format!("{}/new?view={view}", descriptor.path));
    let status = notice.unwrap_or_else(|| state.status.current());

    let page = ConsoleTemplate {
        project_name: project_name(),
        now: Local::now().to_rfc3339(),
        tabs: TabView::all(R::KIND, view),
        slug: descriptor.slug,
        base_path: descriptor.path,
        heading: descriptor.plural,
        singular: descriptor.singular,
        singular_lower: descriptor.singular.to_lowercase(),
        view: view.as_str(),
        show_table: view == ViewMode::Table,
        table_href: tab_href(descriptor, ViewMode::Table),
        cards_href: tab_href(descriptor, ViewMode::Cards),
        reload_href: tab_href(descriptor, view),
        search,
        new_href,
        form,
        section,
        status_kind: status.kind.as_str(),
        status_message: status.message,
        decay_ms: console.status_decay_ms,
        disable_while_pending: console.submit_policy.disables_while_pending(),
    };
    Ok(Html(page.render()?))
}
