//! Common utilities for renderer E2E tests: workbook fixtures and render
//! helpers.

use xlmark_core::{Cell, CellValue, ColorModel, Workbook, Worksheet};
use xlmark_html::{HtmlConverter, RenderConfig};

/// A single-sheet workbook holding `cells` as (row, col, value)
pub fn workbook_with(model: ColorModel, cells: &[(u32, u16, CellValue)]) -> Workbook {
    let mut workbook = Workbook::new(model);
    let mut sheet = Worksheet::new("Sheet1");
    for (row, col, value) in cells {
        sheet.insert_cell(*row, Cell::new(*col, value.clone()));
    }
    workbook.push_sheet(sheet);
    workbook
}

/// Render with `config`, panicking on failure
pub fn render_with(workbook: &Workbook, config: RenderConfig) -> String {
    let bytes = HtmlConverter::with_config(workbook, config)
        .convert_to_vec()
        .expect("render should succeed");
    String::from_utf8(bytes).expect("output should be UTF-8")
}

/// Render with the default configuration
pub fn render(workbook: &Workbook) -> String {
    render_with(workbook, RenderConfig::default())
}

/// Lines of the rendered `<td>` elements
pub fn td_lines(html: &str) -> Vec<&str> {
    html.lines()
        .filter(|line| line.trim_start().starts_with("<td"))
        .collect()
}

/// The style rule blocks (`.excelDefaults .style_XX { ... }`) of a render
pub fn style_rules(html: &str) -> Vec<String> {
    let mut rules = Vec::new();
    let mut current: Option<String> = None;
    for line in html.lines() {
        if line.starts_with(".excelDefaults .style_") {
            current = Some(String::new());
        }
        if let Some(rule) = current.as_mut() {
            rule.push_str(line);
            rule.push('\n');
            if line == "}" {
                rules.extend(current.take());
            }
        }
    }
    rules
}
