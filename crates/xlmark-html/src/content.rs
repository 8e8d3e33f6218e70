//! Cell text as it appears inside a `<td>`

use std::borrow::Cow;

use xlmark_core::{Cell, CellStyle, CellValue, FormulaResult};

use crate::numfmt;

/// Markup written for a position with no visible text
pub const NBSP: &str = "&nbsp;";

/// Escape the characters that would break the surrounding markup
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// The formatted value of a cell, before escaping
pub fn display_value(value: &CellValue, style: &CellStyle, date1904: bool) -> String {
    let format = style.number_format.as_str();
    match value {
        CellValue::Blank => String::new(),
        CellValue::Number(n) => numfmt::format_number(*n, format, date1904),
        CellValue::Text(s) => numfmt::format_text(s, format),
        CellValue::Boolean(b) => bool_text(*b).to_string(),
        CellValue::Error(e) => e.as_str().to_string(),
        // numeric results always use three decimals
        CellValue::Formula { cached, .. } => match cached {
            FormulaResult::Number(n) => format!("{n:.3}"),
            FormulaResult::Text(s) => numfmt::format_text(s, format),
            FormulaResult::Boolean(b) => bool_text(*b).to_string(),
            FormulaResult::Error(e) => e.as_str().to_string(),
            FormulaResult::None => String::new(),
        },
    }
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Final `<td>` text: escaped, trailing whitespace stripped, empty text
/// replaced by `&nbsp;` and a bare accounting zero (`- 0`) by `-`
pub fn finish(text: &str) -> String {
    let escaped = escape_html(text);
    let trimmed = escaped.trim_end();
    if trimmed.is_empty() {
        NBSP.to_string()
    } else if trimmed.trim() == "- 0" {
        "-".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Text of a present cell, ready to be written into its `<td>`
pub fn text_for(cell: &Cell, style: &CellStyle, date1904: bool) -> String {
    finish(&display_value(&cell.value, style, date1904))
}
