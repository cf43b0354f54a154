use serde::{Deserialize, Serialize};

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Self = Self::new(255, 0, 0);
    pub const FOREST_GREEN: Self = Self::new(34, 139, 34);
    pub const ROYAL_BLUE: Self = Self::new(65, 105, 225);
    pub const WHITE_SMOKE: Self = Self::new(245, 245, 245);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// Charcoal used when the scene is reset.
    pub const DEFAULT_BACKGROUND: Self = Self::new(49, 50, 51);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `0.0..=1.0`.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}
