use serde::{Deserialize, Serialize};

/// RGB-цвет аннотации; в конфиге хранится как `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Старший байт игнорируется.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_drops_alpha() {
        let c = Color::from_hex(0xFF00FF96);
        assert_eq!(c, Color::rgb(0x00, 0xFF, 0x96));
        assert_eq!(c.to_hex(), 0x00FF96);
    }

    #[test]
    fn serialized_as_integer() {
        let json = serde_json::to_string(&Color::from_hex(0x00FFDF)).unwrap();
        assert_eq!(json, "65503");
        assert_eq!(serde_json::from_str::<Color>("65503").unwrap().g, 0xFF);
    }
}
