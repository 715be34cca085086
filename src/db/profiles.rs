//! Profile queries
//!
//! Exactly zero or one profile per account, created lazily on first access.
//! The lazy create relies on the UNIQUE constraint on account_id: a racing
//! insert loses silently and both requests read the same row.

use sqlx::PgPool;

/// Profile gender choice. Stored lowercase; the empty string means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse a form submission ("Male" / "Female" / "Other", any case)
    pub fn from_form(s: &str) -> Option<Self> {
        Self::from_db(&s.to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[allow(dead_code)]
pub struct Profile {
    pub id: i64,
    pub account_id: i64,
    pub job_title: String,
    pub education: String,
    pub gender: String,
    pub experience_years: i32,
    pub photo_path: Option<String>,
}

impl Profile {
    pub fn gender(&self) -> Option<Gender> {
        Gender::from_db(&self.gender)
    }

    /// Percent of the five profile fields that are filled in.
    ///
    /// Zero years of experience counts as unfilled: the default is
    /// indistinguishable from "never entered".
    pub fn completeness(&self) -> u8 {
        let filled = [
            !self.job_title.is_empty(),
            !self.education.is_empty(),
            !self.gender.is_empty(),
            self.experience_years > 0,
            self.photo_path.is_some(),
        ]
        .iter()
        .filter(|&&f| f)
        .count();
        (filled * 100 / 5) as u8
    }
}

/// Fetch the account's profile, creating a blank one on first access.
pub async fn get_or_create(pool: &PgPool, account_id: i64) -> Result<Profile, sqlx::Error> {
    sqlx::query("INSERT INTO profiles (account_id) VALUES ($1) ON CONFLICT (account_id) DO NOTHING")
        .bind(account_id)
        .execute(pool)
        .await?;

    sqlx::query_as("SELECT * FROM profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
}

pub async fn update_details(
    pool: &PgPool,
    account_id: i64,
    job_title: &str,
    education: &str,
    gender: &str,
    experience_years: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE profiles
         SET job_title = $1, education = $2, gender = $3, experience_years = $4
         WHERE account_id = $5",
    )
    .bind(job_title)
    .bind(education)
    .bind(gender)
    .bind(experience_years)
    .bind(account_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_photo(pool: &PgPool, account_id: i64, photo_path: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET photo_path = $1 WHERE account_id = $2")
        .bind(photo_path)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(())
}
