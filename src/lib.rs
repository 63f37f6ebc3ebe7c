//! Issuance and validation of digital completion certificates.
//!
//! The crate covers the certificate core: collision-free validation code
//! generation ([`codegen`]), fixed-layout PDF rendering ([`pdf`]), durable
//! storage with a code uniqueness constraint ([`store`]) and the issuance and
//! lookup services on top ([`service`]). HTTP routing, templating and
//! download plumbing are left to the embedding application, which talks to
//! this crate through [`IssueCertificateRequest`], the service types and the
//! [`CertificateView`] presentation contract.

pub mod codegen;
pub mod config;
pub mod models;
pub mod pdf;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use models::{Certificate, CertificateView, IssueCertificateRequest, NewCertificate};
pub use service::{IssuanceService, IssueError, LookupError, ValidationErrors, ValidationService};
pub use store::{CertificateStore, FileStore, MemoryStore, StoreError};

/// Initializes `env_logger` for binaries and tests embedding this crate.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
