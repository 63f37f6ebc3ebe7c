//! Content checks on the rendered certificate.
//!
//! The PDF embeds a generation-independent layout, so these tests re-parse
//! the bytes and assert on extracted text content, never on byte equality.

use certificado::pdf::{build_certificate_pdf, CertificateData, RenderError};
use chrono::NaiveDate;
use lopdf::Document;

fn sample_data() -> CertificateData<'static> {
    CertificateData {
        student_name: "Ana Silva",
        cpf: "000.000.000-00",
        course_name: "Intro to Testing",
        workload_hours: 40,
        completion_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        issuer_name: None,
        extra_info: None,
        validation_code: "ABC123XYZ9",
        validation_url: "http://localhost:8080?code=ABC123XYZ9",
    }
}

fn extracted_text(data: &CertificateData<'_>) -> String {
    let bytes = build_certificate_pdf(data).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    doc.extract_text(&[1]).unwrap()
}

#[test]
fn test_document_is_a_single_page_pdf() {
    let bytes = build_certificate_pdf(&sample_data()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_body_interpolates_all_mandatory_fields() {
    let text = extracted_text(&sample_data());
    assert!(text.contains("Certificado de Conclus"));
    assert!(text.contains("Ana Silva"));
    assert!(text.contains("000.000.000-00"));
    assert!(text.contains("Intro to Testing"));
    assert!(text.contains("40 horas"));
    // long-form date: day, month name, year
    assert!(text.contains("15 de mar"));
    assert!(text.contains("2024"));
}

#[test]
fn test_footer_carries_code_and_verification_link() {
    let text = extracted_text(&sample_data());
    assert!(text.contains("ABC123XYZ9"));
    assert!(text.contains("?code=ABC123XYZ9"));
    assert!(text.contains("Valide este certificado em"));
}

#[test]
fn test_missing_issuer_renders_generic_label() {
    let text = extracted_text(&sample_data());
    assert!(text.contains("Institui"));
}

#[test]
fn test_issuer_renders_name_and_caption() {
    let mut data = sample_data();
    data.issuer_name = Some("Prof. Souza");
    let text = extracted_text(&data);
    assert!(text.contains("Prof. Souza"));
    assert!(text.contains("Respons"));
    assert!(!text.contains("Institui"));
}

#[test]
fn test_extra_info_paragraph_is_optional() {
    let without = extracted_text(&sample_data());
    assert!(!without.contains("online"));

    let mut data = sample_data();
    data.extra_info = Some("Curso realizado integralmente online.");
    let with = extracted_text(&data);
    assert!(with.contains("Curso realizado integralmente online."));
}

#[test]
fn test_long_names_still_render() {
    let mut data = sample_data();
    data.student_name =
        "Maria Aparecida dos Santos Oliveira Figueiredo de Albuquerque Nascimento";
    data.course_name = "Desenvolvimento de Sistemas Distribuidos de Alta Disponibilidade";
    let text = extracted_text(&data);
    assert!(text.contains("Maria Aparecida"));
    assert!(text.contains("Nascimento"));
}

#[test]
fn test_blank_mandatory_field_fails_instead_of_truncating() {
    let mut data = sample_data();
    data.cpf = "";
    assert!(matches!(
        build_certificate_pdf(&data),
        Err(RenderError::EmptyField("cpf"))
    ));

    let mut data = sample_data();
    data.validation_url = "  ";
    assert!(matches!(
        build_certificate_pdf(&data),
        Err(RenderError::EmptyField("validation_url"))
    ));
}
