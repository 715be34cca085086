//! One-shot flash notices
//!
//! A notice set by one request is rendered by the next page and then gone.
//! Carried in a short-lived cookie, base64-encoded so messages survive
//! cookie value restrictions; rendered pages always clear it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::HeaderMap;

use super::session::cookie_value;

pub const FLASH_COOKIE: &str = "sh_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A pending user-visible notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Set-Cookie value carrying this notice to the next page
    pub fn set_cookie(&self) -> String {
        let tag = match self.level {
            Level::Success => 's',
            Level::Error => 'e',
        };
        let payload = URL_SAFE_NO_PAD.encode(format!("{tag}:{}", self.message));
        format!("{FLASH_COOKIE}={payload}; Path=/; Max-Age=60")
    }

    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (tag, message) = text.split_once(':')?;
        let level = match tag {
            "s" => Level::Success,
            "e" => Level::Error,
            _ => return None,
        };
        Some(Self {
            level,
            message: message.to_string(),
        })
    }
}

/// Set-Cookie value that clears any pending notice
pub fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; Max-Age=0")
}

/// Read the pending notice from request headers, if any
pub fn take(headers: &HeaderMap) -> Option<Notice> {
    cookie_value(headers, FLASH_COOKIE).and_then(Notice::decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_roundtrip() {
        let notice = Notice::success("Task assigned successfully");
        let cookie = notice.set_cookie();
        let value = cookie
            .strip_prefix("sh_flash=")
            .unwrap()
            .split(';')
            .next()
            .unwrap();
        assert_eq!(Notice::decode(value), Some(notice));
    }

    #[test]
    fn test_error_level_survives() {
        let notice = Notice::error("Invalid email or password");
        let cookie = notice.set_cookie();
        let value = cookie
            .strip_prefix("sh_flash=")
            .unwrap()
            .split(';')
            .next()
            .unwrap();
        let decoded = Notice::decode(value).unwrap();
        assert_eq!(decoded.level, Level::Error);
        assert_eq!(decoded.message, "Invalid email or password");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(Notice::decode("!!not-base64!!"), None);
        // valid base64 but no level tag
        let payload = URL_SAFE_NO_PAD.encode("no-separator");
        assert_eq!(Notice::decode(&payload), None);
    }

    #[test]
    fn test_take_from_headers() {
        let notice = Notice::success("Attendance marked");
        let value = notice.set_cookie();
        let value = value.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, value.parse().unwrap());
        assert_eq!(take(&headers), Some(notice));
    }
}
