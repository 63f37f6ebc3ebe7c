//! Data model for issued certificates.
//!
//! `Certificate` is the sole persisted entity. It is created exactly once by
//! the issuance service, never updated and never deleted; `document_bytes`
//! holds the rendered PDF verbatim.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An issued certificate, as persisted by a [`crate::store::CertificateStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    /// Store-assigned sequential identifier.
    pub id: i64,
    pub student_name: String,
    /// Brazilian taxpayer identifier, kept as an opaque string.
    pub cpf: String,
    pub course_name: String,
    pub workload_hours: u32,
    pub completion_date: NaiveDate,
    pub issuer_name: Option<String>,
    pub extra_info: Option<String>,
    /// Uppercase alphanumeric code, unique across all certificates ever issued.
    pub validation_code: String,
    /// Rendered PDF, generated once before persistence and never regenerated.
    #[serde(with = "document_bytes_base64")]
    pub document_bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a certificate: everything except the store-assigned
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub student_name: String,
    pub cpf: String,
    pub course_name: String,
    pub workload_hours: u32,
    pub completion_date: NaiveDate,
    pub issuer_name: Option<String>,
    pub extra_info: Option<String>,
    pub validation_code: String,
    pub document_bytes: Vec<u8>,
}

/// Raw issuance input as received from a form-handling layer.
///
/// All fields arrive as strings; `workload_hours` must parse as a positive
/// integer and `completion_date` as `YYYY-MM-DD`. Validation happens in
/// [`crate::service::validation`], not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueCertificateRequest {
    pub student_name: String,
    pub cpf: String,
    pub course_name: String,
    pub workload_hours: String,
    pub completion_date: String,
    #[serde(default)]
    pub issuer_name: Option<String>,
    #[serde(default)]
    pub extra_info: Option<String>,
}

/// Serialization contract toward the presentation boundary.
///
/// Named fields with explicit optionality; `schema_version` is bumped on any
/// incompatible change. Document bytes are intentionally absent, downloads go
/// through [`crate::service::ValidationService::download`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateView {
    pub schema_version: u32,
    pub id: i64,
    pub student_name: String,
    pub cpf: String,
    pub course_name: String,
    pub workload_hours: u32,
    pub completion_date: NaiveDate,
    pub issuer_name: Option<String>,
    pub extra_info: Option<String>,
    pub validation_code: String,
    pub created_at: DateTime<Utc>,
}

pub const VIEW_SCHEMA_VERSION: u32 = 1;

impl Certificate {
    /// Presentation view of this certificate.
    pub fn to_view(&self) -> CertificateView {
        CertificateView {
            schema_version: VIEW_SCHEMA_VERSION,
            id: self.id,
            student_name: self.student_name.clone(),
            cpf: self.cpf.clone(),
            course_name: self.course_name.clone(),
            workload_hours: self.workload_hours,
            completion_date: self.completion_date,
            issuer_name: self.issuer_name.clone(),
            extra_info: self.extra_info.clone(),
            validation_code: self.validation_code.clone(),
            created_at: self.created_at,
        }
    }

    /// Suggested filename for downloading the rendered PDF.
    ///
    /// Derived from the student's name; if sanitization leaves nothing usable
    /// the validation code is used instead.
    pub fn download_filename(&self) -> String {
        let base = sanitize_filename::sanitize(self.student_name.trim());
        let base = base.trim().trim_matches('.');
        if base.is_empty() {
            format!("certificado-{}.pdf", self.validation_code)
        } else {
            format!("certificado-{base}.pdf")
        }
    }
}

/// Base64 representation for `document_bytes` in the persisted JSON form.
mod document_bytes_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
