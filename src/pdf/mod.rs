//! Certificate PDF rendering.
//!
//! Builds the fixed-layout completion certificate directly as PDF objects:
//! one A4 landscape page, a filled content panel and centered Helvetica text
//! blocks. The base-14 fonts keep the renderer free of font files, and the
//! WinAnsi encoding covers the Portuguese strings the document is written in.

pub mod common;

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use common::{encode_win_ansi, estimated_text_width, format_date_pt_br, wrap_text};

/// A4 landscape, in points.
const PAGE_WIDTH: f32 = 841.89;
const PAGE_HEIGHT: f32 = 595.28;
const MM: f32 = 2.8346;

/// Content panel: 10mm inset on every side.
const PANEL_X: f32 = 10.0 * MM;
const PANEL_Y: f32 = 10.0 * MM;
const PANEL_WIDTH: f32 = PAGE_WIDTH - 2.0 * PANEL_X;
const PANEL_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * PANEL_Y;

/// Wrap limit for paragraph text, 15mm padding inside the panel.
const TEXT_WIDTH: f32 = PANEL_WIDTH - 30.0 * MM;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

const TITLE: &str = "Certificado de Conclusão";
const ISSUER_CAPTION: &str = "Responsável pela emissão";
const GENERIC_ISSUER: &str = "Instituição de Ensino";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("required certificate field '{0}' is empty")]
    EmptyField(&'static str),
    #[error("workload hours must be greater than zero")]
    NonPositiveWorkload,
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Validated input for one certificate document.
#[derive(Debug, Clone, Copy)]
pub struct CertificateData<'a> {
    pub student_name: &'a str,
    pub cpf: &'a str,
    pub course_name: &'a str,
    pub workload_hours: u32,
    pub completion_date: NaiveDate,
    pub issuer_name: Option<&'a str>,
    pub extra_info: Option<&'a str>,
    pub validation_code: &'a str,
    pub validation_url: &'a str,
}

/// Renders the certificate to PDF bytes.
///
/// The caller has already validated business rules; the checks here only
/// guard against blank required fields reaching the layout, where they would
/// silently render an empty certificate.
pub fn build_certificate_pdf(data: &CertificateData<'_>) -> Result<Vec<u8>, RenderError> {
    guard_required(data)?;

    let mut ops: Vec<Operation> = Vec::new();
    draw_panel(&mut ops);

    // Cursor walks down the page in millimetres from the top edge.
    let mut y = 38.0 * MM;

    set_fill_color(&mut ops, 33, 37, 41);
    draw_centered(&mut ops, FONT_BOLD, 36.0, y, TITLE);

    let body = format!(
        "Certificamos que {} (CPF: {}) concluiu o curso \"{}\" com carga horária \
         total de {} horas, finalizado em {}.",
        data.student_name,
        data.cpf,
        data.course_name,
        data.workload_hours,
        format_date_pt_br(data.completion_date),
    );
    y += 22.0 * MM;
    for line in wrap_text(&body, 18.0, TEXT_WIDTH) {
        draw_centered(&mut ops, FONT_REGULAR, 18.0, y, &line);
        y += 10.0 * MM;
    }

    if let Some(extra) = data.extra_info {
        y += 4.0 * MM;
        for line in wrap_text(extra, 14.0, TEXT_WIDTH) {
            draw_centered(&mut ops, FONT_REGULAR, 14.0, y, &line);
            y += 8.0 * MM;
        }
    }

    y += 16.0 * MM;
    match data.issuer_name {
        Some(issuer) => {
            draw_centered(&mut ops, FONT_REGULAR, 16.0, y, issuer);
            y += 8.0 * MM;
            draw_centered(&mut ops, FONT_REGULAR, 16.0, y, ISSUER_CAPTION);
        }
        None => draw_centered(&mut ops, FONT_REGULAR, 16.0, y, GENERIC_ISSUER),
    }
    y += 18.0 * MM;

    set_fill_color(&mut ops, 73, 80, 87);
    draw_centered(
        &mut ops,
        FONT_REGULAR,
        12.0,
        y,
        &format!("Código de validação: {}", data.validation_code),
    );
    y += 8.0 * MM;
    let verification = format!("Valide este certificado em {}", data.validation_url);
    for line in wrap_text(&verification, 12.0, TEXT_WIDTH) {
        draw_centered(&mut ops, FONT_REGULAR, 12.0, y, &line);
        y += 8.0 * MM;
    }

    assemble_document(ops)
}

fn guard_required(data: &CertificateData<'_>) -> Result<(), RenderError> {
    let required: [(&'static str, &str); 5] = [
        ("student_name", data.student_name),
        ("cpf", data.cpf),
        ("course_name", data.course_name),
        ("validation_code", data.validation_code),
        ("validation_url", data.validation_url),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(RenderError::EmptyField(name));
        }
    }
    if data.workload_hours == 0 {
        return Err(RenderError::NonPositiveWorkload);
    }
    Ok(())
}

fn draw_panel(ops: &mut Vec<Operation>) {
    ops.push(Operation::new("q", vec![]));
    set_fill_color(ops, 248, 249, 250);
    ops.push(Operation::new(
        "re",
        vec![
            PANEL_X.into(),
            PANEL_Y.into(),
            PANEL_WIDTH.into(),
            PANEL_HEIGHT.into(),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

fn set_fill_color(ops: &mut Vec<Operation>, r: u8, g: u8, b: u8) {
    ops.push(Operation::new(
        "rg",
        vec![
            (f32::from(r) / 255.0).into(),
            (f32::from(g) / 255.0).into(),
            (f32::from(b) / 255.0).into(),
        ],
    ));
}

/// Emits one horizontally centered text line with its baseline `y_top`
/// points below the top edge.
fn draw_centered(ops: &mut Vec<Operation>, font: &str, size: f32, y_top: f32, text: &str) {
    let width = estimated_text_width(text, size).min(PANEL_WIDTH);
    let x = (PAGE_WIDTH - width) / 2.0;
    let y = PAGE_HEIGHT - y_top;

    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new(
        "Tm",
        vec![
            1.into(),
            0.into(),
            0.into(),
            1.into(),
            x.into(),
            y.into(),
        ],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn assemble_document(ops: Vec<Operation>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            PAGE_WIDTH.into(),
            PAGE_HEIGHT.into(),
        ],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
