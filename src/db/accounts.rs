//! Account queries
//!
//! Accounts are the root entity: profiles, tasks, and attendance rows all
//! cascade on delete. The email doubles as the login username and is
//! unique. Staff/superuser are capability flags, not separate types.

use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
#[allow(dead_code)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: i64,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

pub async fn create(
    pool: &PgPool,
    email: &str,
    hashed_password: &str,
    first_name: &str,
    last_name: &str,
    now: i64,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO accounts (email, hashed_password, first_name, last_name, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(email)
    .bind(hashed_password)
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Is this email already used by an account other than `exclude_id`?
pub async fn email_taken(
    pool: &PgPool,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let (taken,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(
             SELECT 1 FROM accounts
             WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
         )",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(taken)
}

/// Update name and email alongside a profile edit
pub async fn update_identity(
    pool: &PgPool,
    id: i64,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET first_name = $1, last_name = $2, email = $3 WHERE id = $4")
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// All non-staff accounts, optionally filtered by a case-insensitive
/// substring over first name, last name, or email.
pub async fn list_employees(
    pool: &PgPool,
    search: Option<&str>,
) -> Result<Vec<Account>, sqlx::Error> {
    match search {
        Some(query) if !query.is_empty() => {
            let pattern = like_pattern(query);
            sqlx::query_as(
                "SELECT * FROM accounts
                 WHERE is_staff = FALSE
                   AND (first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1)
                 ORDER BY id",
            )
            .bind(pattern)
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as("SELECT * FROM accounts WHERE is_staff = FALSE ORDER BY id")
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn count_employees(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE is_staff = FALSE")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Directory search over all accounts except the requester.
/// Empty query matches nothing (callers short-circuit, this is the contract).
pub async fn search_directory(
    pool: &PgPool,
    query: &str,
    exclude_id: i64,
) -> Result<Vec<Account>, sqlx::Error> {
    let pattern = like_pattern(query);
    sqlx::query_as(
        "SELECT * FROM accounts
         WHERE id <> $2
           AND (first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1)
         ORDER BY id",
    )
    .bind(pattern)
    .bind(exclude_id)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Build a `%...%` ILIKE pattern, escaping the wildcard characters so the
/// user query is matched literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_plain() {
        assert_eq!(like_pattern("ali"), "%ali%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_is_admin_flags() {
        let mut account = Account {
            id: 1,
            email: "e@x.com".into(),
            hashed_password: String::new(),
            first_name: "E".into(),
            last_name: "X".into(),
            is_staff: false,
            is_superuser: false,
            created_at: 0,
        };
        assert!(!account.is_admin());
        account.is_staff = true;
        assert!(account.is_admin());
        account.is_staff = false;
        account.is_superuser = true;
        assert!(account.is_admin());
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let account = Account {
            id: 1,
            email: "e@x.com".into(),
            hashed_password: String::new(),
            first_name: "Ada".into(),
            last_name: String::new(),
            is_staff: false,
            is_superuser: false,
            created_at: 0,
        };
        assert_eq!(account.full_name(), "Ada");
    }
}
