//! bcrypt hashing, always run on the blocking pool so request I/O keeps moving.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash itself is unusable.
pub async fn compare_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_and_compares() {
        let hash = hash_password("secret", 4).await.unwrap();

        assert_ne!(hash, "secret");
        assert!(compare_password("secret", &hash).await.unwrap());
        assert!(!compare_password("wrongPassword", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn salts_each_hash() {
        let first = hash_password("secret", 4).await.unwrap();
        let second = hash_password("secret", 4).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(compare_password("secret", "not-a-bcrypt-hash").await.is_err());
    }
}
