use std::fmt;

use crate::error::{GeoloomError, GeoloomResult};

/// Straight-alpha RGBA color. Serializes as a `#RRGGBB` / `#RRGGBBAA` hex
/// string so request JSON can carry the same values a color picker produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(s: &str) -> GeoloomResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let parse = |i: usize| -> GeoloomResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GeoloomError::validation(format!("invalid hex color '{s}'")))
        };
        if !hex.is_ascii() {
            return Err(GeoloomError::validation(format!("invalid hex color '{s}'")));
        }
        match hex.len() {
            6 => Ok(Self::opaque(parse(0)?, parse(2)?, parse(4)?)),
            8 => Ok(Self::new(parse(0)?, parse(2)?, parse(4)?, parse(6)?)),
            _ => Err(GeoloomError::validation(format!(
                "hex color '{s}' must be #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }

    /// Premultiplied RGBA8 form used by the compositing buffers.
    pub fn premultiplied(self) -> [u8; 4] {
        let af = u16::from(self.a) + 1;
        let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
