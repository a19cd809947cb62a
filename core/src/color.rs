use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Straight (non-premultiplied) RGBA color, serialized as a `#RRGGBBAA` hex string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Neutral silver used for the cover when nothing else is configured.
    pub const SILVER: Self = Self::opaque(0xC0, 0xC0, 0xC0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 0x11);

        match hex.len() {
            3 => Some(Self::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Formats as a CSS color, `#rrggbb` when opaque and `#rrggbbaa` otherwise.
    pub fn to_css(self) -> String {
        let Self { r, g, b, a } = self;
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Source-over compositing of `self` on top of `dst`.
    pub fn over(self, dst: Self) -> Self {
        let sa = u32::from(self.a);
        let da = u32::from(dst.a) * (255 - sa) / 255;
        let out_a = sa + da;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * da) / out_a) as u8;
        Self::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            out_a as u8,
        )
    }

    /// Destination-out compositing: removes `strength` worth of opacity from `self`.
    pub fn erased_by(self, strength: u8) -> Self {
        let a = u32::from(self.a) * (255 - u32::from(strength)) / 255;
        if a == 0 {
            Self::TRANSPARENT
        } else {
            Self { a: a as u8, ..self }
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::SILVER
    }
}

impl TryFrom<String> for Rgba {
    type Error = ScratchError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value).ok_or(ScratchError::InvalidColor)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        let Rgba { r, g, b, a } = color;
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
