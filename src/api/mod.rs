//! HTTP routes for staff-hub

mod admin;
mod attendance;
mod auth;
mod dashboard;
mod directory;
mod home;
mod profile;

use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::flash::{self, Notice};
use crate::error::AppError;
use crate::state::AppState;

/// Handlers return fully-built responses: pages, redirects, or errors.
pub type HandlerResult = Result<Response, AppError>;

/// Render a page, clearing any pending flash notice it just displayed.
pub fn render(body: String) -> Response {
    (
        AppendHeaders([(http::header::SET_COOKIE, flash::clear_cookie())]),
        Html(body),
    )
        .into_response()
}

pub fn redirect(to: &str) -> Response {
    Redirect::to(to).into_response()
}

/// Redirect carrying a one-shot notice for the next page.
pub fn redirect_with_notice(to: &str, notice: Notice) -> Response {
    (
        AppendHeaders([(http::header::SET_COOKIE, notice.set_cookie())]),
        Redirect::to(to),
    )
        .into_response()
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Employee pages (non-staff session required)
    let employee = Router::new()
        .route(
            "/dashboard/",
            get(dashboard::show).post(dashboard::complete_task),
        )
        .route("/profile/", get(profile::show))
        .route(
            "/profile/edit/",
            get(profile::edit_form).post(profile::update),
        )
        .route("/attendance/mark/", post(attendance::mark))
        .route("/search-employees/", get(directory::search))
        .route("/employee/{id}/", get(directory::view_profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_employee,
        ));

    // Admin pages (staff or superuser session required)
    let admin = Router::new()
        .route(
            "/admin-dashboard/",
            get(admin::dashboard).post(admin::assign_tasks),
        )
        .route("/admin/delete-employee/{id}/", post(admin::delete_employee))
        .route("/delete-task/{id}/", post(admin::delete_task))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_admin,
        ));

    // Public pages (auth endpoints redirect away when already logged in)
    let public = Router::new()
        .route("/", get(home::home))
        .route("/health", get(home::health))
        .route("/login/", get(auth::login_form).post(auth::login))
        .route("/signup/", get(auth::signup_form).post(auth::signup))
        .route("/logout/", get(auth::logout))
        .route(
            "/admin-login/",
            get(auth::admin_login_form).post(auth::admin_login),
        )
        .route("/admin-logout/", get(auth::admin_logout))
        .route("/media/{*path}", get(profile::media));

    Router::new()
        .merge(public)
        .merge(employee)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
