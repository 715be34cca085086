//! Login, signup, and logout — employee and admin paths
//!
//! The two login forms are role-scoped: correct credentials on the wrong
//! form fail exactly like a bad password, so a staff account cannot enter
//! through the employee form or vice versa.

use axum::Form;
use axum::extract::State;
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use http::HeaderMap;
use serde::Deserialize;

use crate::auth::flash::{self, Notice};
use crate::auth::{session, session_account};
use crate::db::{accounts, profiles};
use crate::error::{AppError, ErrorCode};
use crate::pages;
use crate::state::AppState;
use crate::util::{hash_password, now_millis, verify_password};

use super::{HandlerResult, redirect, redirect_with_notice, render};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Redirect that also establishes the session cookie
fn login_redirect(token: String, to: &str, notice: Notice) -> axum::response::Response {
    (
        AppendHeaders([
            (http::header::SET_COOKIE, session::session_cookie(&token)),
            (http::header::SET_COOKIE, notice.set_cookie()),
        ]),
        Redirect::to(to),
    )
        .into_response()
}

fn logout_redirect(to: &str) -> axum::response::Response {
    (
        AppendHeaders([(http::header::SET_COOKIE, session::clear_session_cookie())]),
        Redirect::to(to),
    )
        .into_response()
}

// ── Employee authentication ──

/// GET /login/
pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    if let Some(account) = session_account(&state, &headers).await?
        && !account.is_admin()
    {
        return Ok(redirect("/dashboard/"));
    }
    let notice = flash::take(&headers);
    Ok(render(pages::login_page(notice.as_ref())))
}

/// POST /login/
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> HandlerResult {
    let email = form.username.trim().to_lowercase();
    let account = accounts::find_by_email(&state.pool, &email).await?;

    let authenticated = account
        .filter(|a| verify_password(&form.password, &a.hashed_password))
        .filter(|a| !a.is_admin());

    let Some(account) = authenticated else {
        return Ok(redirect_with_notice(
            "/login/",
            Notice::error("Invalid email or password"),
        ));
    };

    let token = create_session(&state, account.id, false)?;
    tracing::info!(account_id = account.id, "employee login");
    Ok(login_redirect(
        token,
        "/dashboard/",
        Notice::success("Login successful"),
    ))
}

/// GET /signup/
pub async fn signup_form(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    if session_account(&state, &headers).await?.is_some() {
        return Ok(redirect("/dashboard/"));
    }
    let notice = flash::take(&headers);
    Ok(render(pages::signup_page(notice.as_ref())))
}

/// POST /signup/ — the only rejection is a duplicate email
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> HandlerResult {
    let email = form.email.trim().to_lowercase();

    if accounts::email_taken(&state.pool, &email, None).await? {
        return Ok(redirect_with_notice(
            "/signup/",
            Notice::error("User already exists"),
        ));
    }

    let hashed = hash_password(&form.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let account = accounts::create(
        &state.pool,
        &email,
        &hashed,
        form.first_name.trim(),
        form.last_name.trim(),
        now_millis(),
    )
    .await?;
    profiles::get_or_create(&state.pool, account.id).await?;

    let token = create_session(&state, account.id, false)?;
    tracing::info!(account_id = account.id, "account created");
    Ok(login_redirect(
        token,
        "/dashboard/",
        Notice::success("Welcome!"),
    ))
}

/// GET /logout/
pub async fn logout() -> HandlerResult {
    Ok(logout_redirect("/"))
}

// ── Admin authentication ──

/// GET /admin-login/
pub async fn admin_login_form(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    if let Some(account) = session_account(&state, &headers).await?
        && account.is_admin()
    {
        return Ok(redirect("/admin-dashboard/"));
    }
    let notice = flash::take(&headers);
    Ok(render(pages::admin_login_page(notice.as_ref())))
}

/// POST /admin-login/
pub async fn admin_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> HandlerResult {
    let email = form.username.trim().to_lowercase();
    let account = accounts::find_by_email(&state.pool, &email).await?;

    let authenticated = account
        .filter(|a| verify_password(&form.password, &a.hashed_password))
        .filter(|a| a.is_admin());

    let Some(account) = authenticated else {
        return Ok(redirect_with_notice(
            "/admin-login/",
            Notice::error("Invalid admin credentials"),
        ));
    };

    let token = create_session(&state, account.id, true)?;
    tracing::info!(account_id = account.id, "admin login");
    Ok(login_redirect(
        token,
        "/admin-dashboard/",
        Notice::success("Admin login successful"),
    ))
}

/// GET /admin-logout/
pub async fn admin_logout() -> HandlerResult {
    Ok(logout_redirect("/admin-login/"))
}

fn create_session(state: &AppState, account_id: i64, staff: bool) -> Result<String, AppError> {
    session::create_token(account_id, staff, &state.jwt_secret).map_err(|e| {
        tracing::error!("Session token creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}
