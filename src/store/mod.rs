//! Certificate persistence.
//!
//! Stores are injected into the services as `Arc<dyn CertificateStore>`; no
//! ambient global handle. Two implementations ship here: [`MemoryStore`] for
//! tests and embedding, [`FileStore`] for a durable JSON snapshot on disk.
//!
//! The uniqueness of `validation_code` is enforced inside each store's
//! critical section. The generator's pre-check only makes collisions rare;
//! this constraint is what closes the check-then-insert race.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Certificate, NewCertificate};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The validation code is already taken by another certificate.
    #[error("validation code '{0}' already exists")]
    Conflict(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable storage for issued certificates.
///
/// Codes are upper-cased before storage and before comparison, so lookups are
/// case-insensitive. There is no update and no delete: certificates are
/// immutable once issued.
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Persists a new certificate, assigning `id` and `created_at`.
    /// Fails with [`StoreError::Conflict`] if the validation code is taken.
    async fn insert(&self, certificate: NewCertificate) -> Result<Certificate, StoreError>;

    /// Exact-match lookup by validation code, case-insensitive.
    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Certificate>, StoreError>;

    /// All certificates, newest first.
    async fn list_all(&self) -> Result<Vec<Certificate>, StoreError>;
}

/// Shared ordering rule: newest first, ties broken by descending id.
fn sort_newest_first(certificates: &mut [Certificate]) {
    certificates.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Builds the stored record from its insert shape, normalizing the code.
fn materialize(certificate: NewCertificate, id: i64) -> Certificate {
    Certificate {
        id,
        student_name: certificate.student_name,
        cpf: certificate.cpf,
        course_name: certificate.course_name,
        workload_hours: certificate.workload_hours,
        completion_date: certificate.completion_date,
        issuer_name: certificate.issuer_name,
        extra_info: certificate.extra_info,
        validation_code: certificate.validation_code.to_uppercase(),
        document_bytes: certificate.document_bytes,
        created_at: chrono::Utc::now(),
    }
}
