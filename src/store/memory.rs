//! In-memory certificate store.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{materialize, sort_newest_first, CertificateStore, StoreError};
use crate::models::{Certificate, NewCertificate};

/// Process-local store backed by a `parking_lot` lock.
///
/// Used by the test suites and by embedders that bring their own durability.
/// All invariants of [`CertificateStore`] hold, including the uniqueness
/// constraint on `validation_code`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    certificates: Vec<Certificate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CertificateStore for MemoryStore {
    async fn insert(&self, certificate: NewCertificate) -> Result<Certificate, StoreError> {
        let code = certificate.validation_code.to_uppercase();
        let mut inner = self.inner.write();
        // Uniqueness is checked under the write lock so that two racing
        // inserts of the same code cannot both pass.
        if inner
            .certificates
            .iter()
            .any(|existing| existing.validation_code == code)
        {
            return Err(StoreError::Conflict(code));
        }
        inner.next_id += 1;
        let id = inner.next_id;
        let stored = materialize(certificate, id);
        inner.certificates.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, StoreError> {
        let code = code.to_uppercase();
        Ok(self
            .inner
            .read()
            .certificates
            .iter()
            .find(|certificate| certificate.validation_code == code)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Certificate>, StoreError> {
        Ok(self
            .inner
            .read()
            .certificates
            .iter()
            .find(|certificate| certificate.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Certificate>, StoreError> {
        let mut certificates = self.inner.read().certificates.clone();
        sort_newest_first(&mut certificates);
        Ok(certificates)
    }
}
