// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Visual weight class of a font, on an integer scale from 0 to 1000.
///
/// Values outside that scale are clamped on construction, so every `FontWeight` is valid.
///
/// In CSS, this corresponds to the `font-weight` property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(u16);

impl FontWeight {
    /// Weight value of 0.
    pub const MINIMUM: Self = Self(0);

    /// Weight value of 100.
    pub const THIN: Self = Self(100);

    /// Weight value of 200.
    pub const ULTRA_LIGHT: Self = Self(200);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300);

    /// Weight value of 350.
    pub const BOOK: Self = Self(350);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500);

    /// Weight value of 600.
    pub const SEMI_BOLD: Self = Self(600);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700);

    /// Weight value of 800.
    pub const ULTRA_BOLD: Self = Self(800);

    /// Weight value of 900.
    pub const HEAVY: Self = Self(900);

    /// Weight value of 950.
    pub const ULTRA_HEAVY: Self = Self(950);

    /// Weight value of 1000.
    pub const MAXIMUM: Self = Self(1000);

    /// Creates a new weight value, clamped to `0..=1000`.
    pub const fn new(weight: u16) -> Self {
        if weight > Self::MAXIMUM.0 {
            Self::MAXIMUM
        } else {
            Self(weight)
        }
    }

    /// Returns the underlying weight value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Parses a CSS `font-weight` value.
    ///
    /// Supported syntax (after trimming ASCII whitespace):
    /// - `normal` → `FontWeight::NORMAL`
    /// - `bold` → `FontWeight::BOLD`
    /// - an integer → `FontWeight::new(value)`, clamped
    ///
    /// ```
    /// use text_primitives::FontWeight;
    ///
    /// assert_eq!(FontWeight::parse("normal"), Some(FontWeight::NORMAL));
    /// assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
    /// assert_eq!(FontWeight::parse("850"), Some(FontWeight::new(850)));
    /// assert_eq!(FontWeight::parse("4000"), Some(FontWeight::MAXIMUM));
    /// assert_eq!(FontWeight::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Some(match s {
            "normal" => Self::NORMAL,
            "bold" => Self::BOLD,
            _ => Self::new(s.parse::<u16>().ok()?),
        })
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.0 {
            100 => "thin",
            200 => "ultra-light",
            300 => "light",
            350 => "book",
            400 => "normal",
            500 => "medium",
            600 => "semi-bold",
            700 => "bold",
            800 => "ultra-bold",
            900 => "heavy",
            950 => "ultra-heavy",
            other => return write!(f, "{other}"),
        };
        f.write_str(keyword)
    }
}

/// Visual style or “slope” of a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// `normal`.
    #[default]
    Normal,
    /// `oblique`: the upright design, slanted.
    Oblique,
    /// `italic`: a dedicated cursive design.
    Italic,
}

impl FontStyle {
    /// Parses a CSS `font-style` keyword.
    ///
    /// This parser is case-sensitive and ignores oblique angles.
    ///
    /// ```
    /// use text_primitives::FontStyle;
    ///
    /// assert_eq!(FontStyle::parse("normal"), Some(FontStyle::Normal));
    /// assert_eq!(FontStyle::parse("italic"), Some(FontStyle::Italic));
    /// assert_eq!(FontStyle::parse("oblique 30deg"), Some(FontStyle::Oblique));
    /// assert_eq!(FontStyle::parse("banana"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Some(match s {
            "normal" => Self::Normal,
            "italic" => Self::Italic,
            "oblique" => Self::Oblique,
            _ if s.starts_with("oblique ") => Self::Oblique,
            _ => return None,
        })
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Oblique => "oblique",
            Self::Italic => "italic",
        })
    }
}

/// Visual width of a font relative to its normal aspect ratio.
///
/// In CSS, this corresponds to the keyword forms of `font-stretch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontStretch {
    /// 50% of normal.
    UltraCondensed,
    /// 62.5% of normal.
    ExtraCondensed,
    /// 75% of normal.
    Condensed,
    /// 87.5% of normal.
    SemiCondensed,
    /// 100% of normal. This is the default value.
    #[default]
    Normal,
    /// 112.5% of normal.
    SemiExpanded,
    /// 125% of normal.
    Expanded,
    /// 150% of normal.
    ExtraExpanded,
    /// 200% of normal.
    UltraExpanded,
}

impl FontStretch {
    /// Returns the width as a ratio, with `1.0` being normal width.
    pub fn ratio(self) -> f32 {
        match self {
            Self::UltraCondensed => 0.5,
            Self::ExtraCondensed => 0.625,
            Self::Condensed => 0.75,
            Self::SemiCondensed => 0.875,
            Self::Normal => 1.0,
            Self::SemiExpanded => 1.125,
            Self::Expanded => 1.25,
            Self::ExtraExpanded => 1.5,
            Self::UltraExpanded => 2.0,
        }
    }

    /// Parses a CSS `font-stretch` keyword.
    ///
    /// ```
    /// use text_primitives::FontStretch;
    ///
    /// assert_eq!(FontStretch::parse("semi-condensed"), Some(FontStretch::SemiCondensed));
    /// assert_eq!(FontStretch::parse("80%"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "ultra-condensed" => Self::UltraCondensed,
            "extra-condensed" => Self::ExtraCondensed,
            "condensed" => Self::Condensed,
            "semi-condensed" => Self::SemiCondensed,
            "normal" => Self::Normal,
            "semi-expanded" => Self::SemiExpanded,
            "expanded" => Self::Expanded,
            "extra-expanded" => Self::ExtraExpanded,
            "ultra-expanded" => Self::UltraExpanded,
            _ => return None,
        })
    }
}

impl fmt::Display for FontStretch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UltraCondensed => "ultra-condensed",
            Self::ExtraCondensed => "extra-condensed",
            Self::Condensed => "condensed",
            Self::SemiCondensed => "semi-condensed",
            Self::Normal => "normal",
            Self::SemiExpanded => "semi-expanded",
            Self::Expanded => "expanded",
            Self::ExtraExpanded => "extra-expanded",
            Self::UltraExpanded => "ultra-expanded",
        })
    }
}
