//! Own-profile pages: view, edit (multipart for the photo), media serving

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::{Extension, body::Body};
use http::HeaderMap;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::auth::flash::{self, Notice};
use crate::db::profiles::Gender;
use crate::db::{accounts, profiles};
use crate::error::{AppError, ErrorCode};
use crate::pages;
use crate::state::AppState;

use super::{HandlerResult, redirect_with_notice, render};

/// Maximum photo size (5MB)
const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

/// Supported photo formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// GET /profile/
pub async fn show(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> HandlerResult {
    let profile = profiles::get_or_create(&state.pool, account.id).await?;
    let notice = flash::take(&headers);
    Ok(render(pages::profile_page(
        &account,
        &profile,
        notice.as_ref(),
    )))
}

/// GET /profile/edit/
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> HandlerResult {
    let profile = profiles::get_or_create(&state.pool, account.id).await?;
    let notice = flash::take(&headers);
    Ok(render(pages::edit_profile_page(
        &account,
        &profile,
        notice.as_ref(),
    )))
}

#[derive(Default)]
struct EditFields {
    first_name: String,
    last_name: String,
    email: String,
    job_title: String,
    education: String,
    gender: String,
    experience: String,
}

/// POST /profile/edit/ — update account identity + profile in one pass.
/// The photo is replaced only when a new file was posted.
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> HandlerResult {
    let profile = profiles::get_or_create(&state.pool, account.id).await?;

    let mut fields = EditFields::default();
    let mut photo: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "profile_photo" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            if !filename.is_empty() && !data.is_empty() {
                photo = Some((filename, data.to_vec()));
            }
            continue;
        }
        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "first_name" => fields.first_name = value,
            "last_name" => fields.last_name = value,
            "email" => fields.email = value,
            "job_title" => fields.job_title = value,
            "education" => fields.education = value,
            "gender" => fields.gender = value,
            "experience" => fields.experience = value,
            _ => {}
        }
    }

    // Validate before any write
    let email = fields.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Ok(back_with_error("Invalid email"));
    }
    let experience = match parse_experience(&fields.experience) {
        Some(years) => years,
        None => return Ok(back_with_error("Experience must be a non-negative number")),
    };
    let gender = fields.gender.trim();
    let gender_db = if gender.is_empty() {
        ""
    } else {
        match Gender::from_form(gender) {
            Some(g) => g.as_db(),
            None => return Ok(back_with_error("Invalid gender choice")),
        }
    };
    if accounts::email_taken(&state.pool, &email, Some(account.id)).await? {
        return Ok(back_with_error("Email already in use"));
    }

    if let Some((filename, data)) = photo {
        let path = save_photo(&state, &filename, &data).await?;
        profiles::set_photo(&state.pool, account.id, &path).await?;
        // The replaced upload has no remaining reference
        if let Some(old) = profile.photo_path.as_deref() {
            remove_media_file(&state, old).await;
        }
    }

    accounts::update_identity(
        &state.pool,
        account.id,
        fields.first_name.trim(),
        fields.last_name.trim(),
        &email,
    )
    .await?;
    profiles::update_details(
        &state.pool,
        account.id,
        fields.job_title.trim(),
        fields.education.trim(),
        gender_db,
        experience,
    )
    .await?;

    Ok(redirect_with_notice(
        "/profile/",
        Notice::success("Profile updated successfully"),
    ))
}

/// GET /media/{*path} — serve an uploaded file
pub async fn media(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // No parent traversal out of the media dir
    if path.split('/').any(|part| part == ".." || part.is_empty()) {
        return Err(AppError::new(ErrorCode::NotFound));
    }

    let full = state.media_dir.join(&path);
    let data = tokio::fs::read(&full)
        .await
        .map_err(|_| AppError::new(ErrorCode::NotFound))?;

    let mime = mime_guess::from_path(&full).first_or_octet_stream();
    Ok((
        [(http::header::CONTENT_TYPE, mime.to_string())],
        Body::from(data),
    ))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::with_message(ErrorCode::Validation, format!("Multipart error: {e}"))
}

fn back_with_error(message: &str) -> axum::response::Response {
    redirect_with_notice("/profile/edit/", Notice::error(message))
}

/// Empty input keeps the default of 0; anything else must parse as a
/// non-negative integer.
fn parse_experience(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<i32>().ok().filter(|years| *years >= 0)
}

async fn save_photo(state: &AppState, filename: &str, data: &[u8]) -> Result<String, AppError> {
    if data.len() > MAX_PHOTO_SIZE {
        return Err(AppError::with_message(
            ErrorCode::Validation,
            format!("Photo too large: {} bytes (max {MAX_PHOTO_SIZE})", data.len()),
        ));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::Validation,
            format!("Unsupported photo format: {ext:?}"),
        ));
    }

    let relative = format!("profile_photos/{}.{ext}", Uuid::new_v4());
    let full = state.media_dir.join(&relative);
    tokio::fs::write(&full, data).await.map_err(|e| {
        tracing::error!("Photo write failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(relative)
}

/// Best-effort removal of a replaced upload; a missing file is not an error.
async fn remove_media_file(state: &AppState, relative: &str) {
    let full = state.media_dir.join(relative);
    if let Err(e) = tokio::fs::remove_file(&full).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!("Stale photo removal failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_experience() {
        assert_eq!(parse_experience(""), Some(0));
        assert_eq!(parse_experience("  "), Some(0));
        assert_eq!(parse_experience("3"), Some(3));
        assert_eq!(parse_experience(" 12 "), Some(12));
        assert_eq!(parse_experience("-1"), None);
        assert_eq!(parse_experience("three"), None);
        assert_eq!(parse_experience("3.5"), None);
    }

    #[tokio::test]
    async fn test_save_photo_rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let err = save_photo(&state, "evil.exe", b"data").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_save_photo_writes_unique_file() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir_all(dir.path().join("profile_photos"))
            .await
            .unwrap();
        let state = test_state(dir.path());

        let a = save_photo(&state, "me.JPG", b"aaa").await.unwrap();
        let b = save_photo(&state, "me.jpg", b"bbb").await.unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("profile_photos/"));
        assert!(a.ends_with(".jpg"));
        assert_eq!(tokio::fs::read(dir.path().join(&a)).await.unwrap(), b"aaa");
    }

    #[tokio::test]
    async fn test_remove_media_file_deletes_replaced_photo() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir_all(dir.path().join("profile_photos"))
            .await
            .unwrap();
        let state = test_state(dir.path());

        let old = save_photo(&state, "me.png", b"old").await.unwrap();
        remove_media_file(&state, &old).await;
        assert!(!dir.path().join(&old).exists());

        // Missing file is silently ignored
        remove_media_file(&state, "profile_photos/gone.png").await;
    }

    fn test_state(media_dir: &std::path::Path) -> AppState {
        AppState {
            pool: sqlx::PgPool::connect_lazy("postgres://localhost/unused").unwrap(),
            jwt_secret: "test".into(),
            media_dir: media_dir.to_path_buf(),
        }
    }
}
