//! Statement endpoint.

use axum::extract::rejection::StringRejection;
use axum::extract::{Json, State};
use surreal_core::{Record, exec, sql};
use surreal_http::Error;

use crate::state::AppState;

/// Parse and run a query, returning one entry per statement.
pub async fn query(
    State(state): State<AppState>,
    body: Result<String, StringRejection>,
) -> Result<Json<Vec<Option<Record>>>, Error> {
    let text = body?;
    let parsed = sql::parse(&text)?;
    let results = exec::execute(state.datastore(), &parsed)?;
    Ok(Json(results))
}
