//! Shared helpers for the integration suites.

use std::sync::Arc;

use certificado::{
    AppConfig, IssuanceService, IssueCertificateRequest, MemoryStore, ValidationService,
};

/// A well-formed issuance request for "Ana Silva".
pub fn ana_silva_request() -> IssueCertificateRequest {
    IssueCertificateRequest {
        student_name: "Ana Silva".to_string(),
        cpf: "000.000.000-00".to_string(),
        course_name: "Intro to Testing".to_string(),
        workload_hours: "40".to_string(),
        completion_date: "2024-03-15".to_string(),
        issuer_name: None,
        extra_info: None,
    }
}

/// Issuance and validation services sharing one in-memory store.
pub fn services() -> (Arc<MemoryStore>, IssuanceService, ValidationService) {
    certificado::init_logging();
    let store = Arc::new(MemoryStore::new());
    let issuance = IssuanceService::new(store.clone(), AppConfig::default());
    let validation = ValidationService::new(store.clone());
    (store, issuance, validation)
}
