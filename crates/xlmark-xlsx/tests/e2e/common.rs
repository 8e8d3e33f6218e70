//! Common utilities for XLSX E2E tests: an in-memory package builder.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Wrap worksheet children in a `<worksheet>` root
pub fn worksheet_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="{REL_BASE}">{body}</worksheet>"#
    )
}

/// Wrap stylesheet children in a `<styleSheet>` root
pub fn styles_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{body}</styleSheet>"#
    )
}

/// A theme part whose color scheme lists `colors` in document order
/// (dk1, lt1, dk2, lt2, accent1-6, hlink, folHlink)
pub fn theme_xml(colors: [&str; 12]) -> String {
    const SLOTS: [&str; 12] = [
        "dk1", "lt1", "dk2", "lt2", "accent1", "accent2", "accent3", "accent4", "accent5",
        "accent6", "hlink", "folHlink",
    ];
    let scheme: String = SLOTS
        .iter()
        .zip(colors)
        .map(|(slot, hex)| format!(r#"<a:{slot}><a:srgbClr val="{hex}"/></a:{slot}>"#))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Test"><a:themeElements><a:clrScheme name="Test">{scheme}</a:clrScheme></a:themeElements></a:theme>"#
    )
}

/// Builds a minimal XLSX package
#[derive(Default)]
pub struct XlsxBuilder {
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
    styles: Option<String>,
    theme: Option<String>,
    date1904: bool,
    content_types: bool,
}

impl XlsxBuilder {
    pub fn new() -> Self {
        Self {
            content_types: true,
            ..Default::default()
        }
    }

    /// Add a sheet whose part holds `body` inside `<worksheet>`
    pub fn sheet(&mut self, name: &str, body: &str) -> &mut Self {
        self.sheets.push((name.to_string(), worksheet_xml(body)));
        self
    }

    pub fn shared_strings(&mut self, strings: &[&str]) -> &mut Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn styles(&mut self, body: &str) -> &mut Self {
        self.styles = Some(styles_xml(body));
        self
    }

    pub fn theme(&mut self, xml: String) -> &mut Self {
        self.theme = Some(xml);
        self
    }

    pub fn date1904(&mut self) -> &mut Self {
        self.date1904 = true;
        self
    }

    pub fn without_content_types(&mut self) -> &mut Self {
        self.content_types = false;
        self
    }

    fn workbook_xml(&self) -> String {
        let sheets: String = self
            .sheets
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                format!(
                    r#"<sheet name="{name}" sheetId="{}" r:id="rId{}"/>"#,
                    i + 1,
                    i + 1
                )
            })
            .collect();
        let pr = if self.date1904 {
            r#"<workbookPr date1904="1"/>"#
        } else {
            "<workbookPr/>"
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="{REL_BASE}">{pr}<sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn workbook_rels(&self) -> String {
        let mut rels: Vec<String> = (1..=self.sheets.len())
            .map(|i| {
                format!(
                    r#"<Relationship Id="rId{i}" Type="{REL_BASE}/worksheet" Target="worksheets/sheet{i}.xml"/>"#
                )
            })
            .collect();
        let n = self.sheets.len();
        if !self.shared_strings.is_empty() {
            rels.push(format!(
                r#"<Relationship Id="rId{}" Type="{REL_BASE}/sharedStrings" Target="sharedStrings.xml"/>"#,
                n + 1
            ));
        }
        if self.styles.is_some() {
            rels.push(format!(
                r#"<Relationship Id="rId{}" Type="{REL_BASE}/styles" Target="styles.xml"/>"#,
                n + 2
            ));
        }
        if self.theme.is_some() {
            rels.push(format!(
                r#"<Relationship Id="rId{}" Type="{REL_BASE}/theme" Target="theme/theme1.xml"/>"#,
                n + 3
            ));
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels.concat()
        )
    }

    fn shared_strings_xml(&self) -> String {
        let items: String = self
            .shared_strings
            .iter()
            .map(|s| format!(r#"<si><t xml:space="preserve">{s}</t></si>"#))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{items}</sst>"#,
            self.shared_strings.len()
        )
    }

    /// Zip the package into bytes
    pub fn build(&self) -> Vec<u8> {
        let mut parts: Vec<(String, String)> = Vec::new();
        if self.content_types {
            parts.push(("[Content_Types].xml".into(), CONTENT_TYPES.into()));
        }
        parts.push(("xl/workbook.xml".into(), self.workbook_xml()));
        parts.push(("xl/_rels/workbook.xml.rels".into(), self.workbook_rels()));
        for (i, (_, xml)) in self.sheets.iter().enumerate() {
            parts.push((format!("xl/worksheets/sheet{}.xml", i + 1), xml.clone()));
        }
        if !self.shared_strings.is_empty() {
            parts.push(("xl/sharedStrings.xml".into(), self.shared_strings_xml()));
        }
        if let Some(styles) = &self.styles {
            parts.push(("xl/styles.xml".into(), styles.clone()));
        }
        if let Some(theme) = &self.theme {
            parts.push(("xl/theme/theme1.xml".into(), theme.clone()));
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}
