//! In-process stand-in for the league REST layer, plus console builders for
//! tests.
//!
//! The fake speaks the subset of PostgREST the console uses: one table per
//! resource path, `col=eq.v` and `col=ilike.*term*` filters, and the
//! `Prefer: return=representation` write reply. Rows keep insertion order.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Map, Value, json};
use tokio::task::JoinHandle;

use crate::{
    config::{AppConfig, SubmitPolicy},
    resources::ResourceKind,
    routes::router,
    state::AppState,
};

struct Table {
    key_field: Option<&'static str>,
    rows: Vec<Map<String, Value>>,
    next_id: i64,
}

type Tables = Arc<Mutex<HashMap<String, Table>>>;

pub struct FakeRest {
    base_url: String,
    tables: Tables,
    server: JoinHandle<()>,
}

impl FakeRest {
    /// Binds an ephemeral port with an empty table for every resource.
    pub async fn start() -> Self {
        let tables: HashMap<String, Table> = ResourceKind::ALL
            .into_iter()
            .map(|kind| {
                let descriptor = kind.descriptor();
                let table = Table {
                    key_field: descriptor.key_field,
                    rows: Vec::new(),
                    next_id: 1,
                };
                (descriptor.slug.to_string(), table)
            })
            .collect();
        let tables: Tables = Arc::new(Mutex::new(tables));

        let app = Router::new()
            .route(
                "/{table}",
                get(select_rows)
                    .post(insert_rows)
                    .patch(update_rows)
                    .delete(delete_rows),
            )
            .with_state(Arc::clone(&tables));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake REST layer");
        let addr = listener.local_addr().expect("fake REST address");
        let server = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "fake REST layer stopped");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            tables,
            server,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends rows as-is. Later inserts get keys above the highest seeded one.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = lock(&self.tables);
        let table = tables.get_mut(table).expect("known table");
        for row in rows {
            let Value::Object(row) = row else {
                panic!("seed rows must be objects");
            };
            if let Some(id) = table
                .key_field
                .and_then(|field| row.get(field))
                .and_then(Value::as_i64)
            {
                table.next_id = table.next_id.max(id + 1);
            }
            table.rows.push(row);
        }
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        lock(&self.tables)
            .get(table)
            .map(|table| table.rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Console state pointed at this fake.
    pub fn console_state(&self, policy: SubmitPolicy) -> Arc<AppState> {
        AppState::new(test_config(&self.base_url, policy))
    }

    pub fn console(&self) -> Router {
        router(self.console_state(SubmitPolicy::AllowDuplicates))
    }
}

impl Drop for FakeRest {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn test_config(base_url: &str, policy: SubmitPolicy) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.api.base_url = base_url.to_string();
    cfg.console.submit_policy = policy;
    cfg
}

/// League rows used across the console tests.
pub fn seed_league(fake: &FakeRest) {
    fake.seed(
        "team",
        vec![
            json!({ "team_id": 5, "team_name": "Hornets", "team_colors": ["red", "blue"] }),
            json!({ "team_id": 6, "team_name": "Otters", "team_colors": null }),
        ],
    );
    fake.seed(
        "player",
        vec![
            json!({ "player_id": 3, "first_name": "Ana", "last_name": "Smith", "age": 10, "team_id": 5 }),
            json!({ "player_id": 7, "first_name": "Ben", "last_name": "Okafor", "age": 11, "team_id": 6 }),
            json!({ "player_id": 9, "first_name": "Sam", "last_name": "Smithers", "age": null, "team_id": 5 }),
        ],
    );
    fake.seed(
        "coach",
        vec![json!({
            "coach_id": 1,
            "first_name": "Lee",
            "last_name": "Park",
            "home_phone": "555-0101",
            "team_id": 5
        })],
    );
    fake.seed(
        "parent",
        vec![json!({
            "parent_id": 2,
            "first_name": "Dana",
            "last_name": "Smith",
            "home_phone": "555-0102",
            "street": "12 Elm St",
            "city": "Salem",
            "state": "OR",
            "zip_code": "97301"
        })],
    );
    fake.seed(
        "player_parent",
        vec![json!({ "player_id": 3, "parent_id": 2, "relationship_type": "Mother" })],
    );
}

fn lock(tables: &Tables) -> std::sync::MutexGuard<'_, HashMap<String, Table>> {
    tables.lock().unwrap_or_else(PoisonError::into_inner)
}

fn missing_table(name: &str) -> Response {
    let body = json!({
        "code": "42P01",
        "message": format!("relation \"public.{name}\" does not exist"),
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn wants_representation(headers: &HeaderMap) -> bool {
    headers
        .get("prefer")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("return=representation"))
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Every `col=op.value` pair must hold. Unknown operators never match.
fn matches(row: &Map<String, Value>, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(column, condition)| {
        let cell = row.get(column).and_then(cell_text);
        if let Some(expected) = condition.strip_prefix("eq.") {
            cell.as_deref() == Some(expected)
        } else if let Some(pattern) = condition.strip_prefix("ilike.") {
            let needle = pattern.trim_matches('*').to_lowercase();
            cell.is_some_and(|text| text.to_lowercase().contains(&needle))
        } else {
            false
        }
    })
}

fn no_match(table: &str) -> Response {
    let body = json!({ "message": format!("no rows in {table} matched the filter") });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

async fn select_rows(
    State(tables): State<Tables>,
    Path(name): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    let tables = lock(&tables);
    let Some(table) = tables.get(&name) else {
        return missing_table(&name);
    };
    let rows: Vec<Value> = table
        .rows
        .iter()
        .filter(|row| matches(row, &filters))
        .cloned()
        .map(Value::Object)
        .collect();
    Json(rows).into_response()
}

async fn insert_rows(
    State(tables): State<Tables>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut tables = lock(&tables);
    let Some(table) = tables.get_mut(&name) else {
        return missing_table(&name);
    };

    let incoming = match body {
        Value::Array(rows) => rows,
        row => vec![row],
    };
    let mut inserted = Vec::with_capacity(incoming.len());
    for row in incoming {
        let Value::Object(mut row) = row else {
            let body = json!({ "message": "rows must be JSON objects" });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        };
        if let Some(field) = table.key_field {
            let id = match row.get(field).and_then(Value::as_i64) {
                Some(id) => id,
                None => table.next_id,
            };
            table.next_id = table.next_id.max(id + 1);
            row.insert(field.to_string(), json!(id));
        }
        table.rows.push(row.clone());
        inserted.push(Value::Object(row));
    }

    if wants_representation(&headers) {
        (StatusCode::CREATED, Json(inserted)).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn update_rows(
    State(tables): State<Tables>,
    Path(name): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut tables = lock(&tables);
    let Some(table) = tables.get_mut(&name) else {
        return missing_table(&name);
    };
    let Value::Object(changes) = body else {
        let body = json!({ "message": "patch body must be a JSON object" });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    let mut updated = Vec::new();
    for row in table.rows.iter_mut().filter(|row| matches(row, &filters)) {
        for (column, value) in &changes {
            row.insert(column.clone(), value.clone());
        }
        updated.push(Value::Object(row.clone()));
    }

    if updated.is_empty() {
        return no_match(&name);
    }
    if wants_representation(&headers) {
        Json(updated).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn delete_rows(
    State(tables): State<Tables>,
    Path(name): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    let mut tables = lock(&tables);
    let Some(table) = tables.get_mut(&name) else {
        return missing_table(&name);
    };

    let before = table.rows.len();
    table.rows.retain(|row| !matches(row, &filters));
    if table.rows.len() == before {
        return no_match(&name);
    }
    StatusCode::NO_CONTENT.into_response()
}
