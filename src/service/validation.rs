//! Issuance input validation.
//!
//! Every violated field is collected before reporting, so the caller can
//! show the full list instead of the first failure.

use std::fmt;

use chrono::NaiveDate;

use crate::models::IssueCertificateRequest;

/// One field-level validation failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    /// Human-readable message in Portuguese, safe to show to the end user.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

/// Collection of validation failures across the whole request.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The user-facing messages, one per violated field.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Request fields after validation, with numbers and dates parsed.
#[derive(Debug, Clone)]
pub struct ValidatedIssue {
    pub student_name: String,
    pub cpf: String,
    pub course_name: String,
    pub workload_hours: u32,
    pub completion_date: NaiveDate,
    pub issuer_name: Option<String>,
    pub extra_info: Option<String>,
}

/// Validates a raw issuance request, collecting all violations.
pub fn validate_issue_request(
    request: &IssueCertificateRequest,
) -> Result<ValidatedIssue, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let student_name = request.student_name.trim();
    if student_name.is_empty() {
        errors.add(FieldError::new(
            "student_name",
            "Informe o nome completo do aluno.",
        ));
    }

    let cpf = request.cpf.trim();
    if cpf.is_empty() {
        errors.add(FieldError::new("cpf", "Informe o CPF do aluno."));
    }

    let course_name = request.course_name.trim();
    if course_name.is_empty() {
        errors.add(FieldError::new("course_name", "Informe o nome do curso."));
    }

    let workload_hours = parse_workload_hours(request.workload_hours.trim(), &mut errors);
    let completion_date = parse_completion_date(request.completion_date.trim(), &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedIssue {
        student_name: student_name.to_string(),
        cpf: cpf.to_string(),
        course_name: course_name.to_string(),
        // Both parses succeeded when no error was recorded.
        workload_hours: workload_hours.unwrap_or_default(),
        completion_date: completion_date.unwrap_or_default(),
        issuer_name: normalize_optional(request.issuer_name.as_deref()),
        extra_info: normalize_optional(request.extra_info.as_deref()),
    })
}

fn parse_workload_hours(raw: &str, errors: &mut ValidationErrors) -> Option<u32> {
    match raw.parse::<i64>() {
        Err(_) => {
            errors.add(FieldError::new(
                "workload_hours",
                "Informe a carga horária em horas (valor numérico).",
            ));
            None
        }
        Ok(hours) if hours <= 0 => {
            errors.add(FieldError::new(
                "workload_hours",
                "A carga horária deve ser maior que zero.",
            ));
            None
        }
        Ok(hours) => u32::try_from(hours).ok().or_else(|| {
            errors.add(FieldError::new(
                "workload_hours",
                "Informe a carga horária em horas (valor numérico).",
            ));
            None
        }),
    }
}

fn parse_completion_date(raw: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(FieldError::new(
                "completion_date",
                "Informe uma data de conclusão válida.",
            ));
            None
        }
    }
}

/// Empty or whitespace-only optional fields are treated as absent.
fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
