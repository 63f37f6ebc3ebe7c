//! Certificate issuance.
//!
//! Orchestrates code generation, document rendering and persistence for one
//! issuance request. Issuances are independent; the only shared state is the
//! store, whose uniqueness constraint closes the code-generation race.

use std::sync::Arc;

use thiserror::Error;

use super::validation::{validate_issue_request, ValidatedIssue, ValidationErrors};
use crate::codegen::{self, CodeGenError, DEFAULT_CODE_LENGTH};
use crate::config::AppConfig;
use crate::models::{Certificate, IssueCertificateRequest, NewCertificate};
use crate::pdf::{build_certificate_pdf, CertificateData, RenderError};
use crate::store::{CertificateStore, StoreError};

/// Insert conflicts are a benign race between concurrent issuances; a fresh
/// code resolves them. Repeated conflicts mean the store is misbehaving.
const MAX_CONFLICT_RETRIES: usize = 3;

#[derive(Debug, Error)]
pub enum IssueError {
    /// User input is malformed; every violated field is listed.
    #[error("certificate input is invalid: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    CodeGen(#[from] CodeGenError),
    #[error("certificate rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Every retry hit a conflict; practically unreachable with a working
    /// store, given the 36^10 code space.
    #[error("could not persist a unique validation code after {0} attempts")]
    CodeSpaceContention(usize),
}

/// Issues certificates against an injected [`CertificateStore`].
pub struct IssuanceService {
    store: Arc<dyn CertificateStore>,
    config: AppConfig,
}

impl IssuanceService {
    pub fn new(store: Arc<dyn CertificateStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// Issues a certificate from raw form input.
    ///
    /// Validates input (collecting all violations), obtains a unique code,
    /// renders the PDF embedding code and verification link, and persists the
    /// record. A storage conflict on the code is retried with a fresh code
    /// rather than surfaced.
    pub async fn issue(
        &self,
        request: &IssueCertificateRequest,
    ) -> Result<Certificate, IssueError> {
        let input = validate_issue_request(request)?;

        for attempt in 1..=MAX_CONFLICT_RETRIES {
            let code =
                codegen::generate_validation_code(DEFAULT_CODE_LENGTH, self.store.as_ref())
                    .await?;
            let link = self.config.validation_link(&code);
            let document_bytes = render_document(&input, &code, &link)?;

            match self
                .store
                .insert(NewCertificate {
                    student_name: input.student_name.clone(),
                    cpf: input.cpf.clone(),
                    course_name: input.course_name.clone(),
                    workload_hours: input.workload_hours,
                    completion_date: input.completion_date,
                    issuer_name: input.issuer_name.clone(),
                    extra_info: input.extra_info.clone(),
                    validation_code: code,
                    document_bytes,
                })
                .await
            {
                Ok(certificate) => {
                    log::info!(
                        "issued certificate {} with validation code {}",
                        certificate.id,
                        certificate.validation_code
                    );
                    return Ok(certificate);
                }
                Err(StoreError::Conflict(code)) => {
                    log::warn!(
                        "validation code {code} raced an existing certificate \
                         (attempt {attempt}), regenerating"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(IssueError::CodeSpaceContention(MAX_CONFLICT_RETRIES))
    }
}

fn render_document(
    input: &ValidatedIssue,
    code: &str,
    link: &str,
) -> Result<Vec<u8>, RenderError> {
    build_certificate_pdf(&CertificateData {
        student_name: &input.student_name,
        cpf: &input.cpf,
        course_name: &input.course_name,
        workload_hours: input.workload_hours,
        completion_date: input.completion_date,
        issuer_name: input.issuer_name.as_deref(),
        extra_info: input.extra_info.as_deref(),
        validation_code: code,
        validation_url: link,
    })
}
