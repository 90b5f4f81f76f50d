// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute values and their shared, retained form.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;
use core::ops::Deref;

use text_primitives::{FontStretch, FontStyle, FontWeight};

use crate::OpenTypeFeatures;

/// An RGBA color with components nominally in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
    /// Alpha component.
    pub a: f64,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates a color from all four components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

/// The style of line drawn under text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    /// No underline.
    #[default]
    None,
    /// A single line.
    Single,
    /// Two parallel lines.
    Double,
    /// The platform's "suggestion" squiggle, as used for spelling or grammar hints.
    Suggestion,
}

/// The color of an underline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnderlineColor {
    /// An explicit color.
    Custom(Color),
    /// The platform color for spelling errors.
    Spelling,
    /// The platform color for grammar errors.
    Grammar,
    /// The platform color for auxiliary marks, such as input method candidates.
    Auxiliary,
}

/// The type of an [`Attribute`], without its payload.
///
/// Runs of different kinds never split or merge with each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    /// [`Attribute::Family`].
    Family,
    /// [`Attribute::Size`].
    Size,
    /// [`Attribute::Weight`].
    Weight,
    /// [`Attribute::Italic`].
    Italic,
    /// [`Attribute::Stretch`].
    Stretch,
    /// [`Attribute::Color`].
    Color,
    /// [`Attribute::Background`].
    Background,
    /// [`Attribute::Underline`].
    Underline,
    /// [`Attribute::UnderlineColor`].
    UnderlineColor,
    /// [`Attribute::Features`].
    Features,
}

impl AttributeKind {
    pub(crate) const COUNT: usize = 10;

    /// Every kind, in enumeration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Family,
        Self::Size,
        Self::Weight,
        Self::Italic,
        Self::Stretch,
        Self::Color,
        Self::Background,
        Self::Underline,
        Self::UnderlineColor,
        Self::Features,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A formatting attribute applied to a range of an [`AttributedString`].
///
/// Equality is structural: family names compare ASCII case-insensitively, every other payload
/// compares by value.
///
/// [`AttributedString`]: crate::AttributedString
#[derive(Clone, Debug)]
pub enum Attribute {
    /// Font family name.
    Family(String),
    /// Font size in points.
    Size(f64),
    /// Font weight.
    Weight(FontWeight),
    /// Font slope.
    Italic(FontStyle),
    /// Font width.
    Stretch(FontStretch),
    /// Text color.
    Color(Color),
    /// Background color behind the text.
    Background(Color),
    /// Underline style.
    Underline(Underline),
    /// Underline color.
    UnderlineColor(UnderlineColor),
    /// OpenType feature settings.
    Features(OpenTypeFeatures),
}

impl Attribute {
    /// Creates a [`Attribute::Family`] value.
    pub fn family(name: impl Into<String>) -> Self {
        Self::Family(name.into())
    }

    /// Returns the kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Family(_) => AttributeKind::Family,
            Self::Size(_) => AttributeKind::Size,
            Self::Weight(_) => AttributeKind::Weight,
            Self::Italic(_) => AttributeKind::Italic,
            Self::Stretch(_) => AttributeKind::Stretch,
            Self::Color(_) => AttributeKind::Color,
            Self::Background(_) => AttributeKind::Background,
            Self::Underline(_) => AttributeKind::Underline,
            Self::UnderlineColor(_) => AttributeKind::UnderlineColor,
            Self::Features(_) => AttributeKind::Features,
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Family(a), Self::Family(b)) => a.eq_ignore_ascii_case(b),
            (Self::Size(a), Self::Size(b)) => a == b,
            (Self::Weight(a), Self::Weight(b)) => a == b,
            (Self::Italic(a), Self::Italic(b)) => a == b,
            (Self::Stretch(a), Self::Stretch(b)) => a == b,
            (Self::Color(a), Self::Color(b)) | (Self::Background(a), Self::Background(b)) => {
                a == b
            }
            (Self::Underline(a), Self::Underline(b)) => a == b,
            (Self::UnderlineColor(a), Self::UnderlineColor(b)) => a == b,
            (Self::Features(a), Self::Features(b)) => a == b,
            _ => false,
        }
    }
}

/// An [`Attribute`] that has been handed to an [`AttributedString`].
///
/// Once applied, an attribute is retained by the string and may be shared by several runs
/// (for example after a run is split in two). Callers can inspect it through [`Deref`] but
/// cannot retain it themselves; the payload is freed when the last run referring to it goes
/// away.
///
/// [`AttributedString`]: crate::AttributedString
pub struct SharedAttribute(Rc<Attribute>);

impl SharedAttribute {
    pub(crate) fn new(attribute: Attribute) -> Self {
        Self(Rc::new(attribute))
    }

    /// Adds another reference to the same value. Only runs hold references.
    pub(crate) fn retain(&self) -> Self {
        Self(Rc::clone(&self.0))
    }

    /// Returns the number of runs currently referring to this value.
    pub fn retain_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Returns `true` if both handles refer to the same retained value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrows the attribute value.
    pub fn attribute(&self) -> &Attribute {
        &self.0
    }
}

impl Deref for SharedAttribute {
    type Target = Attribute;

    fn deref(&self) -> &Attribute {
        &self.0
    }
}

impl fmt::Debug for SharedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
