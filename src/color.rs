use crate::{registry::NamedColorRegistry, theme::raw::RawColor};
use hex::{FromHex, FromHexError};
use once_cell::sync::Lazy;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A resolved color: three 8 bit channels, ready to be emitted as an escape sequence.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color out of a raw color input.
    ///
    /// The input must contain exactly one of the accepted shapes (hex string, rgb sequence,
    /// r/g/b channels, ansi index, named reference); named references are looked up in the
    /// given registry.
    pub fn from_raw(raw: &RawColor, registry: &NamedColorRegistry) -> Result<Self, ParseColorError> {
        match raw.shape_count() {
            0 => return Err(ParseColorError::NoShape),
            1 => (),
            _ => return Err(ParseColorError::AmbiguousShape),
        };
        if let Some(hex) = &raw.hex {
            return hex.parse();
        }
        if let Some(channels) = &raw.rgb {
            let &[r, g, b] = channels.as_slice() else {
                return Err(ParseColorError::ChannelCount(channels.len()));
            };
            return Self::from_channels(r, g, b);
        }
        if raw.r.is_some() || raw.g.is_some() || raw.b.is_some() {
            let (Some(r), Some(g), Some(b)) = (raw.r, raw.g, raw.b) else {
                return Err(ParseColorError::MissingChannel);
            };
            return Self::from_channels(r, g, b);
        }
        if let Some(index) = raw.ansi {
            let index = u8::try_from(index).map_err(|_| ParseColorError::AnsiIndexOutOfRange(index))?;
            return Ok(Self::from_ansi(index));
        }
        let name = raw.name.as_ref().expect("no shape left");
        registry.resolve(name).ok_or_else(|| ParseColorError::UnresolvedName(name.clone()))
    }

    fn from_channels(r: i64, g: i64, b: i64) -> Result<Self, ParseColorError> {
        let channel = |value: i64| u8::try_from(value).map_err(|_| ParseColorError::ChannelOutOfRange(value));
        Ok(Self { r: channel(r)?, g: channel(g)?, b: channel(b)? })
    }

    /// Map an ANSI 256 palette index to its canonical RGB value.
    ///
    /// Indices 0-15 go through the standard color table, 16-231 through the 6x6x6 color cube,
    /// and 232-255 through the grayscale ramp.
    pub fn from_ansi(index: u8) -> Self {
        ANSI_PALETTE[index as usize]
    }
}

/// The 16 standard terminal colors.
const STANDARD_COLORS: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

static ANSI_PALETTE: Lazy<[Rgb; 256]> = Lazy::new(|| {
    let mut palette = [Rgb::default(); 256];
    palette[..16].copy_from_slice(&STANDARD_COLORS);
    // Per channel cube steps: 0 stays 0, n becomes 55 + 40n.
    let step = |n: usize| if n == 0 { 0 } else { (55 + 40 * n) as u8 };
    for r in 0..6 {
        for g in 0..6 {
            for b in 0..6 {
                palette[16 + r * 36 + g * 6 + b] = Rgb::new(step(r), step(g), step(b));
            }
        }
    }
    for i in 0..24 {
        let gray = (i * 10 + 8) as u8;
        palette[232 + i] = Rgb::new(gray, gray, gray);
    }
    palette
});

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.strip_prefix('#').unwrap_or(input);
        let values = <[u8; 3]>::from_hex(input)?;
        Ok(Self { r: values[0], g: values[1], b: values[2] })
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(value: Rgb) -> Self {
        Self::Rgb { r: value.r, g: value.g, b: value.b }
    }
}

/// An error parsing a color input.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseColorError {
    #[error("invalid hex color: {0}")]
    InvalidHex(#[from] FromHexError),

    #[error("color input has no recognized shape")]
    NoShape,

    #[error("color input mixes more than one shape")]
    AmbiguousShape,

    #[error("rgb sequence must have 3 entries, found {0}")]
    ChannelCount(usize),

    #[error("r, g, and b channels must all be present")]
    MissingChannel,

    #[error("channel value {0} is not in [0, 255]")]
    ChannelOutOfRange(i64),

    #[error("ansi index {0} is not in [0, 255]")]
    AnsiIndexOutOfRange(i64),

    #[error("named color not found: '{0}'")]
    UnresolvedName(String),
}
