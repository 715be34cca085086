//! Task queries
//!
//! Tasks belong to exactly one assignee. Status only ever moves
//! pending -> completed, and only through `complete`, which is scoped to
//! the owning account. Admins delete tasks, they never edit status.

use sqlx::PgPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[allow(dead_code)]
pub struct Task {
    pub id: i64,
    pub account_id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: i64,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed.as_db()
    }
}

/// A task joined with its assignee's identity, for the admin dashboard.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskWithAssignee {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Assign one pending task per account, inside a single transaction.
/// Every id is checked against accounts before its insert; any missing
/// account rolls the whole batch back and returns false, so a deletion
/// racing the assignment can never leave a partial batch behind.
pub async fn assign_to_many(
    pool: &PgPool,
    account_ids: &[i64],
    title: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    for account_id in account_ids {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
                .bind(account_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Ok(false);
        }
        sqlx::query(
            "INSERT INTO tasks (account_id, title, status, created_at)
             VALUES ($1, $2, 'pending', $3)",
        )
        .bind(account_id)
        .bind(title)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(true)
}

/// Complete a task owned by `account_id`. Returns false when no such task
/// belongs to the account. Re-completing a completed task matches the row
/// and is a harmless no-op.
pub async fn complete(pool: &PgPool, account_id: i64, task_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE tasks SET status = 'completed' WHERE id = $1 AND account_id = $2")
        .bind(task_id)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Unconditional delete; ownership is not checked (admin operation).
pub async fn delete(pool: &PgPool, task_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_for_account(pool: &PgPool, account_id: i64) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tasks WHERE account_id = $1 ORDER BY created_at DESC")
        .bind(account_id)
        .fetch_all(pool)
        .await
}

/// System-wide listing for one status partition, newest first.
pub async fn list_by_status(
    pool: &PgPool,
    status: TaskStatus,
) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.id, t.title, t.status, t.created_at,
                a.first_name, a.last_name, a.email
         FROM tasks t
         JOIN accounts a ON a.id = t.account_id
         WHERE t.status = $1
         ORDER BY t.created_at DESC",
    )
    .bind(status.as_db())
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(TaskStatus::from_db("pending"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::from_db("completed"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_db("Pending"), None);
        assert_eq!(TaskStatus::Pending.label(), "Pending");
    }

    #[test]
    fn test_is_completed() {
        let task = Task {
            id: 1,
            account_id: 1,
            title: "T".into(),
            description: String::new(),
            status: "completed".into(),
            created_at: 0,
        };
        assert!(task.is_completed());
    }
}
