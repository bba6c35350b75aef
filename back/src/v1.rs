use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use todo_api::v1::{Message, NewTodo, TodoPatch};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    Store,
};

pub fn router() -> Router<Arc<Store>> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/toggle", post(toggle_todo))
        .route("/toggle/", post(toggle_todo))
        .route("/delete", delete(delete_todo))
        .route("/delete/", delete(delete_todo))
        .route("/update", put(update_todo))
        .route("/update/", put(update_todo))
        .route("/search", get(search_todos))
        .route("/stats", get(get_stats))
}

/// Raw query pairs. Repeated keys resolve to their first value, so a query
/// string never fails to extract.
#[derive(Deserialize)]
#[serde(transparent)]
struct Params(Vec<(String, String)>);

impl Params {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn id(&self) -> Result<u64> {
        self.first("id")
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| {
                debug!(id = ?self.first("id"), "rejected id parameter");
                Error::validation("Invalid id parameter")
            })
    }
}

fn json<T: Serialize>(value: &T) -> Result<Response> {
    let body = serde_json::to_vec(value)?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(%err, "rejected request body");
        Error::validation("Invalid request body")
    })
}

async fn list_todos(State(store): State<Arc<Store>>) -> Result<Response> {
    json(&store.list().await)
}

async fn create_todo(State(store): State<Arc<Store>>, body: Bytes) -> Result<Response> {
    let input: NewTodo = parse_body(&body)?;
    let todo = store.create(input).await.inspect_err(|err| {
        debug!(%err, "create failed");
    })?;

    info!(
        id = todo.id,
        title = %todo.title,
        priority = %todo.priority,
        "created todo"
    );

    json(&todo)
}

async fn toggle_todo(
    State(store): State<Arc<Store>>,
    Query(params): Query<Params>,
) -> Result<Response> {
    let id = params.id()?;
    let todo = store.toggle(id).await.inspect_err(|err| {
        debug!(id, %err, "toggle failed");
    })?;

    info!(
        id = todo.id,
        completed = todo.completed,
        "toggled todo"
    );

    json(&todo)
}

async fn delete_todo(
    State(store): State<Arc<Store>>,
    Query(params): Query<Params>,
) -> Result<Response> {
    let id = params.id()?;
    let todo = store.delete(id).await.inspect_err(|err| {
        debug!(id, %err, "delete failed");
    })?;

    info!(id = todo.id, title = %todo.title, "deleted todo");

    json(&Message {
        message: String::from("Todo deleted successfully"),
    })
}

async fn update_todo(
    State(store): State<Arc<Store>>,
    Query(params): Query<Params>,
    body: Bytes,
) -> Result<Response> {
    let id = params.id()?;
    let patch: TodoPatch = parse_body(&body)?;
    let todo = store.update(id, patch).await.inspect_err(|err| {
        debug!(id, %err, "update failed");
    })?;

    info!(
        id = todo.id,
        title = %todo.title,
        priority = %todo.priority,
        tags = ?todo.tags,
        "updated todo"
    );

    json(&todo)
}

async fn search_todos(
    State(store): State<Arc<Store>>,
    Query(params): Query<Params>,
) -> Result<Response> {
    let query = params.first("q").unwrap_or_default();
    let results = store.search(query).await;
    debug!(query, matches = results.len(), "searched todos");
    json(&results)
}

async fn get_stats(State(store): State<Arc<Store>>) -> Result<Response> {
    json(&store.stats().await)
}
