//! Container sniffing

/// Leading bytes of a Compound File Binary container (xls)
pub const CFB_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// Leading bytes of a zip local file header (xlsx)
pub const ZIP_MAGIC: [u8; 4] = [b'P', b'K', 0x03, 0x04];

/// Spreadsheet container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetFormat {
    /// Legacy BIFF8 workbook in a CFB container
    Xls,
    /// Office Open XML package
    Xlsx,
}

impl SpreadsheetFormat {
    /// Identify the container from its first bytes
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(&CFB_MAGIC) {
            Some(SpreadsheetFormat::Xls)
        } else if header.starts_with(&ZIP_MAGIC) {
            Some(SpreadsheetFormat::Xlsx)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpreadsheetFormat::Xls => "XLS",
            SpreadsheetFormat::Xlsx => "XLSX",
        }
    }
}
