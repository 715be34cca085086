//! Landing page and health check

use axum::Json;
use axum::extract::State;
use http::HeaderMap;

use crate::auth::{flash, session_account};
use crate::pages;
use crate::state::AppState;

use super::{HandlerResult, redirect, render};

/// GET / — route authenticated visitors to their dashboard
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    if let Some(account) = session_account(&state, &headers).await? {
        if account.is_admin() {
            return Ok(redirect("/admin-dashboard/"));
        }
        return Ok(redirect("/dashboard/"));
    }
    let notice = flash::take(&headers);
    Ok(render(pages::home_page(notice.as_ref())))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "staff-hub",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
