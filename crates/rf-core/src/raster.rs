use crate::Error;
use crate::pixel::{CHANNELS, OPAQUE, Rgba};

/// Owned RGBA pixel buffer.
///
/// The backing store is always interleaved RGBA with
/// `data.len() == width * height * 4`. RGB input is widened on construction;
/// no other layout is representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Builds a raster from raw bytes.
    ///
    /// Accepts `width * height * 4` bytes (stored as-is) or
    /// `width * height * 3` bytes (each pixel widened with alpha 255). Any
    /// other length is a `DimensionMismatch`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        let mismatch = |actual: usize| Error::DimensionMismatch {
            width,
            height,
            actual,
        };

        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or(mismatch(data.len()))?;
        let rgba_len = pixels.checked_mul(CHANNELS).ok_or(mismatch(data.len()))?;
        let rgb_len = pixels.checked_mul(3).ok_or(mismatch(data.len()))?;

        if data.len() == rgba_len {
            return Ok(Self {
                width,
                height,
                data,
            });
        }

        if data.len() == rgb_len {
            let mut widened = Vec::with_capacity(rgba_len);
            for px in data.chunks_exact(3) {
                widened.extend_from_slice(&[px[0], px[1], px[2], OPAQUE]);
            }
            return Ok(Self {
                width,
                height,
                data: widened,
            });
        }

        Err(mismatch(data.len()))
    }

    pub fn new_fill(width: u32, height: u32, px: Rgba) -> Self {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .expect("raster size overflow");

        let mut data = vec![0u8; len];
        for chunk in data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&[px.r, px.g, px.b, px.a]);
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixel_at((y as usize) * (self.width as usize) + x as usize))
    }

    /// Reads the pixel at a linear (row-major) pixel index.
    pub fn pixel_at(&self, index: usize) -> Rgba {
        assert!(index < self.pixel_count(), "pixel index out of bounds");
        let at = index * CHANNELS;
        Rgba::new(
            self.data[at],
            self.data[at + 1],
            self.data[at + 2],
            self.data[at + 3],
        )
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba) {
        assert!(
            x < self.width && y < self.height,
            "pixel coordinates out of bounds"
        );
        let at = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        self.data[at..at + CHANNELS].copy_from_slice(&[px.r, px.g, px.b, px.a]);
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
    }
}

/// Applies `f` to every pixel, returning a fresh raster of the same size.
pub fn map_pixels<F>(src: &Raster, f: F) -> Raster
where
    F: Fn(Rgba) -> Rgba,
{
    let mut data = Vec::with_capacity(src.data.len());
    for px in src.pixels() {
        let out = f(px);
        data.extend_from_slice(&[out.r, out.g, out.b, out.a]);
    }

    Raster {
        width: src.width,
        height: src.height,
        data,
    }
}
