use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// 验证密码长度
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(6..=128).contains(&len) {
        return Err(AppError::ValidationError(
            "Password must be between 6 and 128 characters".to_string(),
        ));
    }
    Ok(())
}

/// 对密码进行哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {e}")))
}
