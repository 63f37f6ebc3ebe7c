mod common;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use certificado::models::NewCertificate;
use certificado::{
    AppConfig, Certificate, CertificateStore, IssuanceService, IssueError, MemoryStore,
    StoreError,
};

use common::{ana_silva_request, services};

#[tokio::test]
async fn test_issue_returns_populated_certificate() {
    let (_store, issuance, _validation) = services();
    let certificate = issuance.issue(&ana_silva_request()).await.unwrap();

    assert_eq!(certificate.id, 1);
    assert_eq!(certificate.student_name, "Ana Silva");
    assert_eq!(certificate.workload_hours, 40);
    assert_eq!(certificate.validation_code.len(), 10);
    assert!(certificate
        .validation_code
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    assert!(certificate.document_bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_issued_document_embeds_code_and_verification_link() {
    let (_store, issuance, _validation) = services();
    let certificate = issuance.issue(&ana_silva_request()).await.unwrap();

    let doc = lopdf::Document::load_mem(&certificate.document_bytes).unwrap();
    let text = doc.extract_text(&[1]).unwrap();
    assert!(text.contains(&certificate.validation_code));
    assert!(text.contains(&format!("?code={}", certificate.validation_code)));
}

#[tokio::test]
async fn test_issue_then_validate_round_trip() {
    let (_store, issuance, validation) = services();
    let issued = issuance.issue(&ana_silva_request()).await.unwrap();

    let found = validation.validate(&issued.validation_code).await.unwrap();
    assert_eq!(found.student_name, "Ana Silva");
    assert_eq!(found.course_name, "Intro to Testing");
    assert_eq!(found.workload_hours, 40);
    assert_eq!(found.completion_date.to_string(), "2024-03-15");
}

#[tokio::test]
async fn test_invalid_input_reports_every_field() {
    let (store, issuance, _validation) = services();
    let mut request = ana_silva_request();
    request.student_name = String::new();
    request.workload_hours = "zero".to_string();
    request.completion_date = "soon".to_string();

    let error = issuance.issue(&request).await.unwrap_err();
    match error {
        IssueError::Validation(errors) => {
            assert_eq!(errors.len(), 3);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    // nothing was persisted
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_concurrent_issuances_get_distinct_codes() {
    let (store, issuance, _validation) = services();
    let issuance = Arc::new(issuance);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let issuance = issuance.clone();
        handles.push(tokio::spawn(async move {
            issuance.issue(&ana_silva_request()).await
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let certificate = handle.await.unwrap().expect("issuance must not fail");
        codes.insert(certificate.validation_code);
    }
    assert_eq!(codes.len(), 16);
    assert_eq!(store.len(), 16);
}

/// Store wrapper that reports one artificial conflict before delegating,
/// simulating a code race between the uniqueness pre-check and the insert.
struct ConflictOnce {
    inner: MemoryStore,
    tripped: AtomicBool,
}

#[async_trait]
impl CertificateStore for ConflictOnce {
    async fn insert(&self, certificate: NewCertificate) -> Result<Certificate, StoreError> {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            return Err(StoreError::Conflict(certificate.validation_code));
        }
        self.inner.insert(certificate).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, StoreError> {
        self.inner.find_by_code(code).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Certificate>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn list_all(&self) -> Result<Vec<Certificate>, StoreError> {
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn test_insert_conflict_is_retried_with_fresh_code() {
    let store = Arc::new(ConflictOnce {
        inner: MemoryStore::new(),
        tripped: AtomicBool::new(false),
    });
    let issuance = IssuanceService::new(store.clone(), AppConfig::default());

    let certificate = issuance.issue(&ana_silva_request()).await.unwrap();
    assert_eq!(certificate.validation_code.len(), 10);
    assert_eq!(store.inner.len(), 1);
}

#[tokio::test]
async fn test_issuer_and_extra_info_are_preserved() {
    let (_store, issuance, validation) = services();
    let mut request = ana_silva_request();
    request.issuer_name = Some("Prof. Souza".to_string());
    request.extra_info = Some("Curso realizado integralmente online.".to_string());

    let issued = issuance.issue(&request).await.unwrap();
    let found = validation.validate(&issued.validation_code).await.unwrap();
    assert_eq!(found.issuer_name.as_deref(), Some("Prof. Souza"));
    assert_eq!(
        found.extra_info.as_deref(),
        Some("Curso realizado integralmente online.")
    );
}
