//! Theme color scheme (`xl/theme/theme1.xml`).

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use xlmark_core::{Color, ThemeColors};

use crate::error::{XlsxError, XlsxResult};
use crate::xml::attr;

/// `clrScheme` children in document order
const SCHEME_SLOTS: [&[u8]; 12] = [
    b"dk1", b"lt1", b"dk2", b"lt2", b"accent1", b"accent2", b"accent3", b"accent4", b"accent5",
    b"accent6", b"hlink", b"folHlink",
];

/// Read the color scheme of a theme part.
///
/// Returns `None` when the part has no complete scheme, in which case the
/// workbook keeps the default Office theme.
pub(crate) fn read_theme_xml<R: BufRead>(reader: R) -> XlsxResult<Option<ThemeColors>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut scheme = [[0u8; 3]; 12];
    let mut found = [false; 12];
    let mut in_scheme = false;
    let mut slot: Option<usize> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"clrScheme" => in_scheme = true,
                    n if in_scheme && slot.is_none() => {
                        slot = SCHEME_SLOTS.iter().position(|s| *s == n);
                    }
                    b"srgbClr" | b"sysClr" => {
                        // sysClr carries the resolved value in lastClr
                        let hex = attr(&e, b"lastClr").or_else(|| attr(&e, b"val"));
                        if let (Some(i), Some(Color::Argb { r, g, b, .. })) =
                            (slot, hex.and_then(|h| Color::from_hex(&h)))
                        {
                            scheme[i] = [r, g, b];
                            found[i] = true;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"clrScheme" => break,
                    n if slot.map(|i| SCHEME_SLOTS[i] == n).unwrap_or(false) => slot = None,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if found.iter().all(|f| *f) {
        Ok(Some(ThemeColors::from_scheme(scheme)))
    } else {
        tracing::warn!("theme color scheme is incomplete, using the default theme");
        Ok(None)
    }
}
