//! Stroke color and width classes shared by every backend.

use std::fmt;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional notation, e.g. `rgb(0,100,255)`.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// The fixed shape palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeColor {
    #[default]
    Black,
    Blue,
    Red,
    Green,
    White,
}

impl ShapeColor {
    pub const ALL: [ShapeColor; 5] = [
        ShapeColor::Black,
        ShapeColor::Blue,
        ShapeColor::Red,
        ShapeColor::Green,
        ShapeColor::White,
    ];

    /// Wire name used by the document format.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeColor::Black => "black",
            ShapeColor::Blue => "blue",
            ShapeColor::Red => "red",
            ShapeColor::Green => "green",
            ShapeColor::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The one palette both renderers resolve colors through.
    pub fn rgb(&self) -> Rgb {
        match self {
            ShapeColor::Black => Rgb::new(0, 0, 0),
            ShapeColor::Blue => Rgb::new(0, 100, 255),
            ShapeColor::Red => Rgb::new(255, 0, 0),
            ShapeColor::Green => Rgb::new(0, 255, 0),
            ShapeColor::White => Rgb::new(255, 255, 255),
        }
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stroke width class (1 = thin, 2 = medium, 3 = thick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeWidth(u8);

impl StrokeWidth {
    pub const THIN: StrokeWidth = StrokeWidth(1);
    pub const MEDIUM: StrokeWidth = StrokeWidth(2);
    pub const THICK: StrokeWidth = StrokeWidth(3);

    /// Clamps `class` into the supported 1..=3 range.
    pub fn new(class: u8) -> Self {
        StrokeWidth(class.clamp(1, 3))
    }

    pub fn class(&self) -> u8 {
        self.0
    }

    /// Line width in pixels.
    pub fn line_width(&self) -> f64 {
        f64::from(self.0)
    }

    /// Font size in pixels for text drawn with this class.
    pub fn font_size(&self) -> f64 {
        match self.0 {
            1 => 14.0,
            2 => 16.0,
            _ => 20.0,
        }
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        StrokeWidth::THIN
    }
}
