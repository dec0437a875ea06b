use crate::errors::{AppError, AppResult};

/// bcrypt is deliberately slow, so both directions run on the blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

pub async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))?
        .map_err(AppError::from)
}
