//! Role-gating middleware
//!
//! Employee pages require a non-staff session; admin pages require staff or
//! superuser. Failures redirect to the matching login page rather than
//! returning a bare status, since every client is a browser.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::HeaderMap;

use crate::db::accounts::{self, Account};
use crate::error::AppError;
use crate::state::AppState;

use super::session;

/// The authenticated account for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Account);

/// Resolve the session cookie to a live account row.
///
/// `None` for missing/invalid/expired tokens and for accounts deleted since
/// the token was issued; `Err` only on infrastructure failure.
pub async fn session_account(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Account>, AppError> {
    let Some(token) = session::cookie_value(headers, session::SESSION_COOKIE) else {
        return Ok(None);
    };
    let Some(claims) = session::verify_token(token, &state.jwt_secret) else {
        return Ok(None);
    };
    Ok(accounts::find_by_id(&state.pool, claims.sub).await?)
}

/// Middleware for employee pages
pub async fn require_employee(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let account = session_account(&state, request.headers())
        .await
        .map_err(IntoResponse::into_response)?;

    let Some(account) = account else {
        return Err(Redirect::to("/login/").into_response());
    };
    if account.is_admin() {
        // Logged in, wrong area
        return Err(Redirect::to("/admin-dashboard/").into_response());
    }

    request.extensions_mut().insert(CurrentUser(account));
    Ok(next.run(request).await)
}

/// Middleware for admin pages
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let account = session_account(&state, request.headers())
        .await
        .map_err(IntoResponse::into_response)?;

    let Some(account) = account else {
        return Err(Redirect::to("/admin-login/").into_response());
    };
    if !account.is_admin() {
        return Err(Redirect::to("/admin-login/").into_response());
    }

    request.extensions_mut().insert(CurrentUser(account));
    Ok(next.run(request).await)
}
