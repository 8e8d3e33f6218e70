//! Color tables: the legacy indexed palette and OOXML theme colors

use once_cell::sync::Lazy;

/// First palette index that can be overridden by a PALETTE record
pub const FIRST_CUSTOM_INDEX: u16 = 8;

/// Default Excel palette for indices 8-63
const DEFAULT_COLORS: [[u8; 3]; 56] = [
    [0, 0, 0],       //  8: Black
    [255, 255, 255], //  9: White
    [255, 0, 0],     // 10: Red
    [0, 255, 0],     // 11: Bright Green
    [0, 0, 255],     // 12: Blue
    [255, 255, 0],   // 13: Yellow
    [255, 0, 255],   // 14: Pink
    [0, 255, 255],   // 15: Turquoise
    [128, 0, 0],     // 16: Dark Red
    [0, 128, 0],     // 17: Green
    [0, 0, 128],     // 18: Dark Blue
    [128, 128, 0],   // 19: Dark Yellow
    [128, 0, 128],   // 20: Violet
    [0, 128, 128],   // 21: Teal
    [192, 192, 192], // 22: 25% Gray
    [128, 128, 128], // 23: 50% Gray
    [153, 153, 255], // 24: Periwinkle
    [153, 51, 102],  // 25: Plum
    [255, 255, 204], // 26: Ivory
    [204, 255, 255], // 27: Light Turquoise
    [102, 0, 102],   // 28: Dark Purple
    [255, 128, 128], // 29: Coral
    [0, 102, 204],   // 30: Ocean Blue
    [204, 204, 255], // 31: Ice Blue
    [0, 0, 128],     // 32: Dark Blue
    [255, 0, 255],   // 33: Pink
    [255, 255, 0],   // 34: Yellow
    [0, 255, 255],   // 35: Turquoise
    [128, 0, 128],   // 36: Violet
    [128, 0, 0],     // 37: Dark Red
    [0, 128, 128],   // 38: Teal
    [0, 0, 255],     // 39: Blue
    [0, 204, 255],   // 40: Sky Blue
    [204, 255, 255], // 41: Light Turquoise
    [204, 255, 204], // 42: Light Green
    [255, 255, 153], // 43: Light Yellow
    [153, 204, 255], // 44: Pale Blue
    [255, 153, 204], // 45: Rose
    [204, 153, 255], // 46: Lavender
    [255, 204, 153], // 47: Tan
    [51, 102, 255],  // 48: Light Blue
    [51, 204, 204],  // 49: Aqua
    [153, 204, 0],   // 50: Lime
    [255, 204, 0],   // 51: Gold
    [255, 153, 0],   // 52: Light Orange
    [255, 102, 0],   // 53: Orange
    [102, 102, 153], // 54: Blue-Gray
    [150, 150, 150], // 55: 40% Gray
    [0, 51, 102],    // 56: Dark Teal
    [51, 153, 102],  // 57: Sea Green
    [0, 51, 0],      // 58: Dark Green
    [51, 51, 0],     // 59: Olive Green
    [153, 51, 0],    // 60: Brown
    [153, 51, 51],   // 61: Dark Rose
    [51, 51, 153],   // 62: Indigo
    [51, 51, 51],    // 63: 80% Gray
];

/// Palette shared by every workbook that does not override it
static DEFAULT_PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    colors: DEFAULT_COLORS.to_vec(),
});

/// Indexed color palette covering indices 8 and up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE.clone()
    }
}

impl Palette {
    /// The built-in Excel palette
    pub fn standard() -> &'static Palette {
        &DEFAULT_PALETTE
    }

    /// Replace the color stored for `index`; indices outside 8-63 are ignored
    pub fn set(&mut self, index: u16, rgb: [u8; 3]) {
        if let Some(slot) = index
            .checked_sub(FIRST_CUSTOM_INDEX)
            .and_then(|i| self.colors.get_mut(i as usize))
        {
            *slot = rgb;
        }
    }

    /// Look up the RGB triplet for `index`; `None` outside the palette range
    pub fn get(&self, index: u16) -> Option<[u8; 3]> {
        let slot = index.checked_sub(FIRST_CUSTOM_INDEX)?;
        self.colors.get(slot as usize).copied()
    }
}

/// The twelve color slots of an OOXML theme, in style index order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    colors: [[u8; 3]; 12],
}

impl Default for ThemeColors {
    /// The Office 2007-2010 default theme
    fn default() -> Self {
        Self {
            colors: [
                [255, 255, 255], // Background 1
                [0, 0, 0],       // Text 1
                [238, 236, 225], // Background 2
                [31, 73, 125],   // Text 2
                [79, 129, 189],  // Accent 1
                [192, 80, 77],   // Accent 2
                [155, 187, 89],  // Accent 3
                [128, 100, 162], // Accent 4
                [75, 172, 198],  // Accent 5
                [247, 150, 70],  // Accent 6
                [0, 0, 255],     // Hyperlink
                [128, 0, 128],   // Followed hyperlink
            ],
        }
    }
}

impl ThemeColors {
    /// Build from a `clrScheme` listed in document order
    /// (dk1, lt1, dk2, lt2, accent1-6, hlink, folHlink)
    ///
    /// Style indices put the light slots first, so the first two pairs swap.
    pub fn from_scheme(scheme: [[u8; 3]; 12]) -> Self {
        let mut colors = scheme;
        colors.swap(0, 1);
        colors.swap(2, 3);
        Self { colors }
    }

    /// RGB of theme slot `index`
    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(index as usize).copied()
    }
}
