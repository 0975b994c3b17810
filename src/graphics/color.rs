use std::fmt;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {

    pub const WHITE: Color      = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color      = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color        = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color      = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color       = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parses a color as written by Tiled: "#RRGGBB" or "#AARRGGBB".
    /// The leading '#' is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let byte = |idx: usize| u8::from_str_radix(&hex[idx..idx+2], 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::from_rgba8(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => None,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{a:02x}{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod test {
    use crate::Color;

    #[test]
    fn parse_hex() {
        assert_eq!(Some([255, 0, 128, 255]), Color::from_hex("#ff0080").map(Color::to_rgba8));
        assert_eq!(Some([255, 0, 128, 64]), Color::from_hex("40ff0080").map(Color::to_rgba8));
        assert_eq!(None, Color::from_hex("#ff00"));
        assert_eq!(None, Color::from_hex("#gg0000"));
    }

    #[test]
    fn display_round_trips_tiled_format() {
        let color = Color::from_hex("#80102030").unwrap();
        assert_eq!("#80102030", color.to_string());
    }
}
