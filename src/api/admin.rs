//! Admin dashboard: aggregates, bulk task assignment, deletion
//!
//! The bulk-assign form posts a repeated `employee` key, which
//! `axum::Form` cannot collect, so the body is parsed with
//! `url::form_urlencoded` instead.

use axum::extract::{Path, Query, RawForm, State};
use http::HeaderMap;
use serde::Deserialize;

use crate::auth::flash::{self, Notice};
use crate::db::{accounts, attendance, tasks};
use crate::error::{AppError, ErrorCode};
use crate::pages::{self, AdminDashboard};
use crate::state::AppState;
use crate::util::{now_millis, today};

use super::{HandlerResult, redirect, redirect_with_notice, render};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
}

/// GET /admin-dashboard/?search=
///
/// The search filter narrows the employee list only; attendance totals and
/// the unmarked list are always computed over all employees.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> HandlerResult {
    let search = query.search.unwrap_or_default();
    let search = search.trim();

    let employees = accounts::list_employees(&state.pool, Some(search)).await?;
    let all_employees = if search.is_empty() {
        employees.clone()
    } else {
        accounts::list_employees(&state.pool, None).await?
    };

    let total_employees = accounts::count_employees(&state.pool).await?;
    let pending = tasks::list_by_status(&state.pool, tasks::TaskStatus::Pending).await?;
    let completed = tasks::list_by_status(&state.pool, tasks::TaskStatus::Completed).await?;

    let rows = attendance::list_for_day(&state.pool, today()).await?;
    let summary = attendance::summarize(rows, &all_employees);

    let notice = flash::take(&headers);
    Ok(render(pages::admin_dashboard_page(
        &AdminDashboard {
            search,
            total_employees,
            employees: &employees,
            pending: &pending,
            completed: &completed,
            summary: &summary,
        },
        notice.as_ref(),
    )))
}

/// POST /admin-dashboard/ — assign one pending task per selected employee
pub async fn assign_tasks(State(state): State<AppState>, RawForm(body): RawForm) -> HandlerResult {
    let Some((employee_ids, title)) = parse_assign_form(&body) else {
        return Err(AppError::with_message(
            ErrorCode::NotFound,
            "Employee not found",
        ));
    };

    // Both empty selection and empty title are silent no-ops
    if employee_ids.is_empty() || title.is_empty() {
        return Ok(redirect("/admin-dashboard/"));
    }

    // Validation and inserts share one transaction, so a concurrent
    // employee deletion rolls the batch back instead of half-applying it
    if !tasks::assign_to_many(&state.pool, &employee_ids, &title, now_millis()).await? {
        return Err(AppError::with_message(
            ErrorCode::NotFound,
            "Employee not found",
        ));
    }

    tracing::info!(count = employee_ids.len(), "tasks assigned");
    Ok(redirect_with_notice(
        "/admin-dashboard/",
        Notice::success("Task assigned successfully"),
    ))
}

/// POST /admin/delete-employee/{id}/
///
/// Staff and superuser accounts are never deletable; everything else
/// cascades (profile, tasks, attendance).
pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult {
    let target = accounts::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::NotFound, "Employee not found"))?;

    if target.is_admin() {
        return Ok(redirect_with_notice(
            "/admin-dashboard/",
            Notice::error("Cannot delete an admin account"),
        ));
    }

    accounts::delete(&state.pool, target.id).await?;
    tracing::info!(account_id = target.id, "employee deleted");
    Ok(redirect_with_notice(
        "/admin-dashboard/",
        Notice::success("Employee deleted successfully"),
    ))
}

/// POST /delete-task/{id}/
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult {
    let found = tasks::delete(&state.pool, id).await?;
    if !found {
        return Err(AppError::with_message(ErrorCode::NotFound, "Task not found"));
    }
    Ok(redirect_with_notice(
        "/admin-dashboard/",
        Notice::success("Task deleted"),
    ))
}

/// Extract the repeated `employee` ids and the trimmed `title` from a
/// urlencoded body. `None` when any `employee` value is not an integer,
/// which the handler reports as an unknown employee.
fn parse_assign_form(body: &[u8]) -> Option<(Vec<i64>, String)> {
    let mut ids = Vec::new();
    let mut title = String::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "employee" => ids.push(value.trim().parse::<i64>().ok()?),
            "title" => title = value.trim().to_string(),
            _ => {}
        }
    }
    Some((ids, title))
}
