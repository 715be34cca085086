//! Attendance marking

use axum::{Extension, Form, extract::State};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::auth::flash::Notice;
use crate::db::attendance::{self, AttendanceStatus};
use crate::state::AppState;
use crate::util::today;

use super::{HandlerResult, redirect_with_notice};

#[derive(Deserialize)]
pub struct MarkForm {
    pub status: String,
}

/// POST /attendance/mark/ — upsert today's status for the caller.
/// A second mark the same day overwrites the first.
pub async fn mark(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Form(form): Form<MarkForm>,
) -> HandlerResult {
    let Some(status) = AttendanceStatus::from_form(&form.status) else {
        return Ok(redirect_with_notice(
            "/dashboard/",
            Notice::error("Invalid attendance status"),
        ));
    };

    attendance::mark(&state.pool, account.id, today(), status).await?;

    Ok(redirect_with_notice(
        "/dashboard/",
        Notice::success("Attendance marked"),
    ))
}
