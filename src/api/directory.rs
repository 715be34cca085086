//! Employee directory: search and view another profile

use axum::Extension;
use axum::extract::{Path, Query, State};
use http::HeaderMap;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::auth::flash;
use crate::db::{accounts, profiles};
use crate::error::{AppError, ErrorCode};
use crate::pages;
use crate::state::AppState;

use super::{HandlerResult, render};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /search-employees/?q= — empty query returns no results
pub async fn search(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> HandlerResult {
    let q = query.q.unwrap_or_default();
    let q = q.trim();

    let results = if q.is_empty() {
        Vec::new()
    } else {
        accounts::search_directory(&state.pool, q, account.id).await?
    };

    let notice = flash::take(&headers);
    Ok(render(pages::search_page(q, &results, notice.as_ref())))
}

/// GET /employee/{id}/ — another account's profile (lazy-created)
pub async fn view_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult {
    let target = accounts::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::NotFound, "Employee not found"))?;
    let profile = profiles::get_or_create(&state.pool, target.id).await?;
    Ok(render(pages::employee_profile_page(&target, &profile)))
}
