//! Validation code generation.
//!
//! Codes are short bearer-token-like credentials, so draws come from the
//! operating system CSPRNG. The store's uniqueness constraint remains the
//! correctness backstop; the existence pre-check here only makes collisions
//! rare before the insert.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::Rng;
use thiserror::Error;

use crate::store::{CertificateStore, StoreError};

/// Symbols a validation code is drawn from: A-Z and 0-9.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default code length. 36^10 makes random collisions astronomically rare.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Upper bound on draw attempts. Reaching it means the existence predicate is
/// persistently reporting collisions, which indicates a storage fault rather
/// than bad luck.
const MAX_ATTEMPTS: usize = 32;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("could not find an unused validation code after {0} attempts")]
    AttemptsExhausted(usize),
    #[error("storage lookup failed while checking code uniqueness: {0}")]
    Store(#[from] StoreError),
}

/// Existence predicate consulted by [`generate_validation_code`].
///
/// Every [`CertificateStore`] implements this through its `find_by_code`
/// lookup, but tests can supply arbitrary predicates.
#[async_trait]
pub trait CodeExistence: Send + Sync {
    async fn code_exists(&self, code: &str) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: CertificateStore + ?Sized> CodeExistence for S {
    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_code(code).await?.is_some())
    }
}

/// Draws random codes of `length` symbols until one is unused.
///
/// Pure with respect to the predicate: nothing is written here. Retries on
/// collision, bounded by [`MAX_ATTEMPTS`].
pub async fn generate_validation_code<E>(
    length: usize,
    exists: &E,
) -> Result<String, CodeGenError>
where
    E: CodeExistence + ?Sized,
{
    for _ in 0..MAX_ATTEMPTS {
        let code = draw_code(length);
        if !exists.code_exists(&code).await? {
            return Ok(code);
        }
        log::debug!("validation code collision, drawing again");
    }
    Err(CodeGenError::AttemptsExhausted(MAX_ATTEMPTS))
}

fn draw_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
