//! Data models for item appearance and canvas geometry
//!
//! This module provides:
//! - RGBA colors with hex parsing and formatting
//! - Border join styles (miter, bevel, round)
//! - The border attribute set carried by every layout item
//! - Canvas dimensions
//! - 2D points for pointer tracking

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

/// 8-bit per channel RGBA color
///
/// Serialized as a `#rrggbbaa` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Creates a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Returns true if the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl FromStr for Rgba {
    type Err = CommandError;

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommandError::InvalidAttribute {
            attribute: "color".to_string(),
            reason: format!("'{}' is not a #rrggbb or #rrggbbaa color", s),
        };

        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Rgba {
    type Error = CommandError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// How the corners of a border are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    /// Sharp corners
    #[default]
    Miter,
    /// Cut-off corners
    Bevel,
    /// Rounded corners
    Round,
}

impl fmt::Display for JoinStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Miter => write!(f, "miter"),
            Self::Bevel => write!(f, "bevel"),
            Self::Round => write!(f, "round"),
        }
    }
}

/// The border attributes of a single layout item.
///
/// This is the snapshot captured and restored by border change commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderAttributes {
    /// Border width in canvas units, always finite and >= 0
    pub width: f64,
    /// Border color
    pub color: Rgba,
    /// Corner join style
    pub join_style: JoinStyle,
}

impl BorderAttributes {
    pub fn new(width: f64, color: Rgba, join_style: JoinStyle) -> Self {
        Self {
            width,
            color,
            join_style,
        }
    }

    /// Checks the invariants every stored border must satisfy.
    pub fn validate(&self) -> Result<(), CommandError> {
        if !self.width.is_finite() {
            return Err(CommandError::InvalidAttribute {
                attribute: "border width".to_string(),
                reason: format!("{} is not a finite number", self.width),
            });
        }
        if self.width < 0.0 {
            return Err(CommandError::InvalidAttribute {
                attribute: "border width".to_string(),
                reason: format!("{} is negative", self.width),
            });
        }
        Ok(())
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_join_style(mut self, join_style: JoinStyle) -> Self {
        self.join_style = join_style;
        self
    }
}

impl Default for BorderAttributes {
    fn default() -> Self {
        Self {
            width: 0.0,
            color: Rgba::BLACK,
            join_style: JoinStyle::Miter,
        }
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(CommandError::InvalidCanvasSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
