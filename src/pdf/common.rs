//! Shared helpers for certificate rendering: Brazilian date formatting,
//! WinAnsi text encoding and Helvetica line measurement.

use chrono::{Datelike, NaiveDate};

/// Fixed Portuguese month table used in the rendered document. The document
/// locale is a fixed artifact of the layout, not configuration.
pub const MONTH_NAMES_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long-form Brazilian date, e.g. "15 de março de 2024".
pub fn format_date_pt_br(value: NaiveDate) -> String {
    let month = MONTH_NAMES_PT[(value.month0() as usize).min(MONTH_NAMES_PT.len() - 1)];
    format!("{} de {} de {}", value.day(), month, value.year())
}

/// Encodes text for a WinAnsi (Latin-1 superset) PDF string. Characters
/// outside the Latin-1 range degrade to '?', matching what the base-14
/// Helvetica fonts can display.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let point = c as u32;
            if point <= 0xFF {
                point as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Approximate advance width of one Helvetica character in em units.
///
/// A coarse class table is enough here: line breaking and centering only need
/// content-level fidelity, not typographically exact metrics.
fn char_advance(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | 'I' | '.' | ',' | '\'' | '!' | ':' | ';' | '|' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | '"' => 0.36,
        'm' | 'M' | 'W' | 'w' => 0.89,
        ' ' => 0.28,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_uppercase() => 0.72,
        _ => 0.52,
    }
}

/// Estimated width in points of `text` set in Helvetica at `size`.
pub fn estimated_text_width(text: &str, size: f32) -> f32 {
    text.chars().map(char_advance).sum::<f32>() * size
}

/// Greedy word wrap against an estimated line width.
///
/// A single word wider than `max_width` is emitted on its own line rather
/// than truncated.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if estimated_text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
