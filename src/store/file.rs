//! JSON-snapshot certificate store.
//!
//! The full record set lives in memory and is rewritten to disk after every
//! insert: a certificate count in the hundreds makes a whole-file snapshot
//! cheaper than an incremental format, and the rename keeps the file intact
//! if the process dies mid-write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{materialize, sort_newest_first, CertificateStore, StoreError};
use crate::models::{Certificate, NewCertificate};

/// Durable store persisting certificates as a JSON document.
///
/// `insert` only returns once the snapshot hit disk, so a returned
/// certificate survives a restart. Document bytes are stored inline with the
/// record, base64-encoded by the model's serde form.
pub struct FileStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    next_id: i64,
    certificates: Vec<Certificate>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing snapshot. The parent
    /// directory is created if missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let certificates = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<Certificate>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let next_id = certificates.iter().map(|c| c.id).max().unwrap_or(0);
        log::info!(
            "opened certificate store at {} ({} certificates)",
            path.display(),
            certificates.len()
        );

        Ok(Self {
            path,
            inner: Mutex::new(Inner {
                next_id,
                certificates,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, certificates: &[Certificate]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(certificates)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CertificateStore for FileStore {
    async fn insert(&self, certificate: NewCertificate) -> Result<Certificate, StoreError> {
        let code = certificate.validation_code.to_uppercase();
        let mut inner = self.inner.lock().await;
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

        // Roll the in-memory insert back if the snapshot cannot be written,
        // otherwise a certificate would exist that no restart can see.
        if let Err(e) = self.persist(&inner.certificates).await {
            inner.certificates.pop();
            inner.next_id -= 1;
            log::error!("failed to persist certificate snapshot: {e}");
            return Err(e);
        }
        Ok(stored)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, StoreError> {
        let code = code.to_uppercase();
        Ok(self
            .inner
            .lock()
            .await
            .certificates
            .iter()
            .find(|certificate| certificate.validation_code == code)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Certificate>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .certificates
            .iter()
            .find(|certificate| certificate.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Certificate>, StoreError> {
        let mut certificates = self.inner.lock().await.certificates.clone();
        sort_newest_first(&mut certificates);
        Ok(certificates)
    }
}
