//! Public certificate validation and the administrative read paths.

use std::sync::Arc;

use thiserror::Error;

use crate::models::Certificate;
use crate::store::{CertificateStore, StoreError};

#[derive(Debug, Error)]
pub enum LookupError {
    /// Blank code submitted; the user should be asked to enter one, not told
    /// the certificate does not exist.
    #[error("Informe o código de validação.")]
    EmptyCode,
    /// Same message for unknown and malformed codes so the response does not
    /// reveal which codes are syntactically plausible.
    #[error("Certificado não encontrado ou inválido.")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves submitted validation codes against an injected store.
pub struct ValidationService {
    store: Arc<dyn CertificateStore>,
}

impl ValidationService {
    pub fn new(store: Arc<dyn CertificateStore>) -> Self {
        Self { store }
    }

    /// Looks up a submitted code. Input is trimmed and upper-cased before the
    /// store is consulted; lookups never mutate stored state.
    pub async fn validate(&self, raw_code: &str) -> Result<Certificate, LookupError> {
        let code = raw_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(LookupError::EmptyCode);
        }
        self.store
            .find_by_code(&code)
            .await?
            .ok_or(LookupError::NotFound)
    }

    /// Administrative detail view by store-assigned id.
    pub async fn find_by_id(&self, id: i64) -> Result<Certificate, LookupError> {
        self.store.find_by_id(id).await?.ok_or(LookupError::NotFound)
    }

    /// All issued certificates, newest first.
    pub async fn list_all(&self) -> Result<Vec<Certificate>, LookupError> {
        Ok(self.store.list_all().await?)
    }

    /// Download boundary: the stored PDF bytes plus a suggested filename.
    pub async fn download(&self, raw_code: &str) -> Result<(String, Vec<u8>), LookupError> {
        let certificate = self.validate(raw_code).await?;
        Ok((certificate.download_filename(), certificate.document_bytes))
    }
}
