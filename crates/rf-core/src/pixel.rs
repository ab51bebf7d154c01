/// Bytes per pixel in the canonical interleaved RGBA form.
pub const CHANNELS: usize = 4;

/// Fully opaque alpha value.
pub const OPAQUE: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: OPAQUE }
    }

    /// Alpha normalized to `[0, 1]`.
    pub fn alpha_unit(self) -> f32 {
        self.a as f32 / 255.0
    }
}
