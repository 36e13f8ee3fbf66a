//! Salted + peppered bcrypt hashing for passwords, security answers, and
//! one-time codes.
//!
//! bcrypt is adaptive and CPU-bound, so every call runs on
//! `spawn_blocking` to keep the hash off the request executor.

use anyhow::Context as _;

use crate::error::AuthServiceError;

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    /// bcrypt cost factor.
    pub cost: u32,
    /// Server-side pepper appended to the secret before hashing. Lives in
    /// config, never in the database, so a dumped table alone is not enough
    /// to mount an offline attack.
    pub pepper: String,
}

impl CredentialHasher {
    fn peppered(&self, secret: &str) -> String {
        format!("{secret}{}", self.pepper)
    }

    /// Hash with a random per-call salt.
    pub async fn hash(&self, secret: &str) -> Result<String, AuthServiceError> {
        let input = self.peppered(secret);
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(input, cost))
            .await
            .context("bcrypt task join")?
            .context("bcrypt hash")?;
        Ok(hash)
    }

    /// Hash with a caller-provided salt. Registration hashes the password
    /// and both security answers with one shared salt.
    pub async fn hash_with_salt(
        &self,
        secret: &str,
        salt: [u8; 16],
    ) -> Result<String, AuthServiceError> {
        let input = self.peppered(secret);
        let cost = self.cost;
        let parts = tokio::task::spawn_blocking(move || bcrypt::hash_with_salt(input, cost, salt))
            .await
            .context("bcrypt task join")?
            .context("bcrypt hash with salt")?;
        Ok(parts.format_for_version(bcrypt::Version::TwoB))
    }

    /// Compare a plaintext secret against a stored hash. A malformed stored
    /// hash is an internal error, never a silent `false`.
    pub async fn verify(&self, secret: &str, hash: &str) -> Result<bool, AuthServiceError> {
        let input = self.peppered(secret);
        let hash = hash.to_owned();
        let ok = tokio::task::spawn_blocking(move || bcrypt::verify(input, &hash))
            .await
            .context("bcrypt task join")?
            .context("bcrypt verify")?;
        Ok(ok)
    }
}
