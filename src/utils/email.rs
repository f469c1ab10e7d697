use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// 统一小写并去掉首尾空白
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 验证邮箱格式
pub fn validate_email(email: &str) -> AppResult<()> {
    if email.len() > 255 || !EMAIL_REGEX.is_match(email) {
        return Err(AppError::ValidationError(
            "Please provide a valid email".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
