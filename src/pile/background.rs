use anyhow::{Context, ensure};
use std::{fmt, str::FromStr};

/// Solid pile background colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background(pub [u8; 3]);

impl Background {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);

    pub fn rgba(self) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, 255])
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Background {
    type Err = anyhow::Error;

    /// Parses "black", "white", "#rrggbb" or "rrggbb".
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let v = v.trim();

        match v.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }

        let hex = v.strip_prefix('#').unwrap_or(v);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid colour {v:?}, expected black, white or #rrggbb"
        );

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid colour {v:?}"))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BLACK => write!(f, "black"),
            Self::WHITE => write!(f, "white"),
            Self([r, g, b]) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}
