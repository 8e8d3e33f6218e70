//! BIFF8 record type constants.
//!
//! Reference: [MS-XLS] §2.3, record enumeration

// ── Stream structure ────────────────────────────────────────────────────
pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const CONTINUE: u16 = 0x003C;

// ── Workbook globals ────────────────────────────────────────────────────
pub const BOUNDSHEET: u16 = 0x0085; // Sheet name, type, stream offset
pub const SST: u16 = 0x00FC; // Shared String Table
pub const DATEMODE: u16 = 0x0022; // 1900 vs 1904 date system
pub const PALETTE: u16 = 0x0092; // Overrides of palette entries 8-63
pub const FONT: u16 = 0x0031;
pub const FORMAT: u16 = 0x041E; // Number format string
pub const XF: u16 = 0x00E0; // Extended Format (cell format record)

// ── Cell records ────────────────────────────────────────────────────────
pub const LABELSST: u16 = 0x00FD; // Cell containing SST string index
pub const LABEL: u16 = 0x0204; // Cell with inline string
pub const NUMBER: u16 = 0x0203;
pub const RK: u16 = 0x027E; // Cell with compressed number
pub const MULRK: u16 = 0x00BD;
pub const BLANK: u16 = 0x0201; // Empty cell with formatting
pub const MULBLANK: u16 = 0x00BE;
pub const BOOLERR: u16 = 0x0205;
pub const FORMULA: u16 = 0x0006; // Formula cell with cached result
pub const STRING: u16 = 0x0207; // Cached string result of the preceding FORMULA

// ── Sheet structure ─────────────────────────────────────────────────────
pub const ROW: u16 = 0x0208;
pub const MERGECELLS: u16 = 0x00E5;
pub const WINDOW2: u16 = 0x023E; // Sheet view flags (frozen panes)
pub const PANE: u16 = 0x0041; // Pane split position and active pane

// ── BOF subtypes (the `dt` field) ───────────────────────────────────────
pub const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
pub const BOF_WORKSHEET: u16 = 0x0010;

/// BIFF version we support.
pub const BIFF8_VERSION: u16 = 0x0600;

/// Sheet type byte of a BOUNDSHEET describing a worksheet
pub const SHEET_TYPE_WORKSHEET: u8 = 0x00;
