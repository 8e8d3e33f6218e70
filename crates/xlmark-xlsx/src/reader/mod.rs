//! XLSX reader

mod theme;
mod worksheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use xlmark_core::{ColorModel, Workbook};
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_styles_xml;
use crate::xml::{attr, attr_bool, decode_excel_escapes};

use worksheet::{read_worksheet, SheetContext};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const DEFAULT_SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const DEFAULT_STYLES_PART: &str = "xl/styles.xml";
const DEFAULT_THEME_PART: &str = "xl/theme/theme1.xml";

/// A relationship of `workbook.xml`, with its target resolved to a package path
#[derive(Debug, Clone, PartialEq)]
struct Relationship {
    kind: String,
    path: String,
}

impl Relationship {
    fn is(&self, kind: &str) -> bool {
        self.kind.rsplit('/').next() == Some(kind)
    }
}

/// Sheet list and settings of `workbook.xml`
#[derive(Debug, Default)]
struct WorkbookInfo {
    /// (name, relationship id) in tab order
    sheets: Vec<(String, String)>,
    date1904: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let rels = Self::read_workbook_rels(&mut archive)?;
        let info = Self::read_workbook_xml(&mut archive)?;

        let part_for = |kind: &str, default: &str| {
            rels.values()
                .find(|r| r.is(kind))
                .map(|r| r.path.clone())
                .unwrap_or_else(|| default.to_string())
        };

        let mut workbook = Workbook::new(ColorModel::Direct);
        workbook.set_date1904(info.date1904);

        if let Some(file) = archive.by_name(&part_for("styles", DEFAULT_STYLES_PART)).ok() {
            read_styles_xml(BufReader::new(file))?.install(&mut workbook);
        }

        if let Some(file) = archive.by_name(&part_for("theme", DEFAULT_THEME_PART)).ok() {
            if let Some(theme) = theme::read_theme_xml(BufReader::new(file))? {
                workbook.set_theme(theme);
            }
        }

        let shared_strings = match archive
            .by_name(&part_for("sharedStrings", DEFAULT_SHARED_STRINGS_PART))
            .ok()
        {
            Some(file) => read_shared_strings(BufReader::new(file))?,
            None => Vec::new(),
        };

        let ctx = SheetContext {
            shared_strings: &shared_strings,
            style_count: workbook.styles().len(),
        };

        for (name, r_id) in &info.sheets {
            let Some(rel) = rels.get(r_id).filter(|r| r.is("worksheet")) else {
                tracing::warn!(sheet = %name, r_id = %r_id, "sheet has no worksheet part, skipping");
                continue;
            };
            let file = archive
                .by_name(&rel.path)
                .map_err(|_| XlsxError::MissingPart(rel.path.clone()))?;
            let sheet = read_worksheet(BufReader::new(file), name, &ctx)?;
            tracing::debug!(
                sheet = %name,
                rows = sheet.row_count(),
                cells = sheet.cell_count(),
                merged = sheet.merged_regions().len(),
                "read worksheet"
            );
            workbook.push_sheet(sheet);
        }

        tracing::info!(
            sheets = workbook.sheet_count(),
            styles = workbook.styles().len(),
            shared_strings = shared_strings.len(),
            "read XLSX workbook"
        );
        Ok(workbook)
    }

    /// Read workbook.xml to get sheet names, rIds and the date system
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<WorkbookInfo> {
        let file = archive
            .by_name(WORKBOOK_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_PART.into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut info = WorkbookInfo::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"workbookPr" => {
                        info.date1904 = attr_bool(&e, b"date1904").unwrap_or(false);
                    }
                    b"sheet" => {
                        if let (Some(name), Some(r_id)) = (attr(&e, b"name"), attr(&e, b"r:id")) {
                            info.sheets.push((name, r_id));
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(info)
    }

    /// Read workbook.xml.rels, keyed by relationship id
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, Relationship>> {
        let file = archive
            .by_name(WORKBOOK_RELS_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_RELS_PART.into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    if let (Some(id), Some(target), Some(kind)) =
                        (attr(&e, b"Id"), attr(&e, b"Target"), attr(&e, b"Type"))
                    {
                        let path = resolve_target(&target);
                        rels.insert(id, Relationship { kind, path });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}

/// Targets in workbook.xml.rels are relative to `xl/` unless absolute
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

/// Read the shared strings table
///
/// Rich text runs are concatenated; phonetic runs (`rPh`) are dropped.
fn read_shared_strings<R: BufRead>(reader: R) -> XlsxResult<Vec<String>> {
    let mut xml_reader = Reader::from_reader(reader);
    // whitespace inside <t> is content
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(decode_excel_escapes(&current));
                    current.clear();
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                current.push_str(&e.unescape()?);
            }
            Ok(Event::CData(e)) if in_t => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
