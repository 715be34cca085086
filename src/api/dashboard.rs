//! Employee dashboard: profile completion, today's attendance, task list

use axum::{Extension, Form, extract::State};
use http::HeaderMap;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::auth::flash::{self, Notice};
use crate::db::attendance::{self, AttendanceStatus};
use crate::db::{profiles, tasks};
use crate::error::{AppError, ErrorCode};
use crate::pages;
use crate::state::AppState;
use crate::util::today;

use super::{HandlerResult, redirect_with_notice, render};

/// GET /dashboard/
pub async fn show(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> HandlerResult {
    let profile = profiles::get_or_create(&state.pool, account.id).await?;
    let today_status = attendance::find_for_day(&state.pool, account.id, today())
        .await?
        .and_then(|row| AttendanceStatus::from_db(&row.status));
    let task_list = tasks::list_for_account(&state.pool, account.id).await?;

    let notice = flash::take(&headers);
    Ok(render(pages::dashboard_page(
        &account,
        profile.completeness(),
        today_status,
        &task_list,
        notice.as_ref(),
    )))
}

#[derive(Deserialize)]
pub struct CompleteForm {
    pub task_id: i64,
}

/// POST /dashboard/ — mark one of the caller's tasks as completed
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Form(form): Form<CompleteForm>,
) -> HandlerResult {
    let found = tasks::complete(&state.pool, account.id, form.task_id).await?;
    if !found {
        return Err(AppError::with_message(ErrorCode::NotFound, "Task not found"));
    }
    Ok(redirect_with_notice(
        "/dashboard/",
        Notice::success("Task completed"),
    ))
}
