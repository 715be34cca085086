//! Attendance queries
//!
//! At most one row per (account, day), enforced by a UNIQUE constraint.
//! Marking is an upsert: a repeat mark on the same day overwrites the
//! status instead of accumulating rows.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;

use super::accounts::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    /// Parse a form submission ("Present" / "Absent", any case)
    pub fn from_form(s: &str) -> Option<Self> {
        Self::from_db(&s.to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[allow(dead_code)]
pub struct Attendance {
    pub id: i64,
    pub account_id: i64,
    pub day: NaiveDate,
    pub status: String,
}

/// One day's row joined with the account's identity, for the admin view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DayRecord {
    pub account_id: i64,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// The admin dashboard's attendance breakdown for one day.
#[derive(Debug)]
pub struct DaySummary {
    pub present: Vec<DayRecord>,
    pub absent: Vec<DayRecord>,
    pub unmarked: Vec<Account>,
}

/// Record the account's status for the day, overwriting a previous mark.
pub async fn mark(
    pool: &PgPool,
    account_id: i64,
    day: NaiveDate,
    status: AttendanceStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO attendance (account_id, day, status)
         VALUES ($1, $2, $3)
         ON CONFLICT (account_id, day)
         DO UPDATE SET status = EXCLUDED.status",
    )
    .bind(account_id)
    .bind(day)
    .bind(status.as_db())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_for_day(
    pool: &PgPool,
    account_id: i64,
    day: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM attendance WHERE account_id = $1 AND day = $2")
        .bind(account_id)
        .bind(day)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_day(pool: &PgPool, day: NaiveDate) -> Result<Vec<DayRecord>, sqlx::Error> {
    sqlx::query_as(
        "SELECT att.account_id, att.status, a.first_name, a.last_name, a.email
         FROM attendance att
         JOIN accounts a ON a.id = att.account_id
         WHERE att.day = $1
         ORDER BY att.account_id",
    )
    .bind(day)
    .fetch_all(pool)
    .await
}

/// Split a day's rows into present/absent and compute who has no row at
/// all. `employees` must be the unfiltered employee set: the unmarked list
/// ignores any dashboard search filter.
pub fn summarize(rows: Vec<DayRecord>, employees: &[Account]) -> DaySummary {
    let marked: HashSet<i64> = rows.iter().map(|r| r.account_id).collect();
    let (present, absent): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .partition(|r| r.status == AttendanceStatus::Present.as_db());
    let unmarked = employees
        .iter()
        .filter(|e| !marked.contains(&e.id))
        .cloned()
        .collect();
    DaySummary {
        present,
        absent,
        unmarked,
    }
}
