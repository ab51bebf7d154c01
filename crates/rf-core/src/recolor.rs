use crate::pixel::Rgba;
use crate::raster::{Raster, map_pixels};

/// Channel weights for luminance reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for GrayWeights {
    /// Rec. 601 luma ratios.
    fn default() -> Self {
        Self {
            r: 0.299,
            g: 0.587,
            b: 0.114,
        }
    }
}

impl GrayWeights {
    /// Weighted luminance of a pixel, unclamped.
    pub fn luminance(&self, px: Rgba) -> f32 {
        self.r * px.r as f32 + self.g * px.g as f32 + self.b * px.b as f32
    }
}

/// Replaces RGB with the weighted luminance. Alpha is preserved.
pub fn grayscale(src: &Raster, weights: &GrayWeights) -> Raster {
    map_pixels(src, |px| {
        let l = weights.luminance(px).round().clamp(0.0, 255.0) as u8;
        Rgba::new(l, l, l, px.a)
    })
}

/// Maps pixels with luminance at or above `threshold` to white, the rest to
/// black. Alpha is preserved.
pub fn binarize(src: &Raster, threshold: u8, weights: &GrayWeights) -> Raster {
    map_pixels(src, |px| {
        let v = if weights.luminance(px) >= threshold as f32 {
            255
        } else {
            0
        };
        Rgba::new(v, v, v, px.a)
    })
}

/// Snaps each RGB channel to the nearest of `levels` evenly spaced values
/// between 0 and 255. Values below 2 behave as 2. Alpha is preserved.
pub fn quantize(src: &Raster, levels: u8) -> Raster {
    let step = 255.0 / (levels.max(2) as f32 - 1.0);
    map_pixels(src, |px| {
        let snap = |v: u8| ((v as f32 / step).round() * step).round().clamp(0.0, 255.0) as u8;
        Rgba::new(snap(px.r), snap(px.g), snap(px.b), px.a)
    })
}

#[cfg(test)]
mod tests {
    use crate::pixel::Rgba;
    use crate::raster::Raster;

    use super::{GrayWeights, binarize, grayscale, quantize};

    #[test]
    fn grayscale_weighted_sum() {
        let src = Raster::new_fill(1, 1, Rgba::new(100, 150, 200, 77));
        let out = grayscale(&src, &GrayWeights::default());

        // 0.299*100 + 0.587*150 + 0.114*200 = 140.75 -> 141
        assert_eq!(out.pixel_at(0), Rgba::new(141, 141, 141, 77));
    }

    #[test]
    fn grayscale_custom_weights() {
        let src = Raster::new_fill(1, 1, Rgba::opaque(200, 10, 10));
        let weights = GrayWeights {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        };
        assert_eq!(grayscale(&src, &weights).pixel_at(0), Rgba::opaque(200, 200, 200));
    }

    #[test]
    fn binarize_splits_on_threshold() {
        // Luminance of (200, 100, 50) is 124.2.
        let src = Raster::new_fill(1, 1, Rgba::new(200, 100, 50, 9));
        let weights = GrayWeights::default();

        assert_eq!(binarize(&src, 100, &weights).pixel_at(0), Rgba::new(255, 255, 255, 9));
        assert_eq!(binarize(&src, 200, &weights).pixel_at(0), Rgba::new(0, 0, 0, 9));
    }

    #[test]
    fn quantize_snaps_to_levels() {
        let src = Raster::new_fill(1, 1, Rgba::new(100, 200, 255, 31));
        let out = quantize(&src, 4);

        // Levels for 4: 0, 85, 170, 255.
        assert_eq!(out.pixel_at(0), Rgba::new(85, 170, 255, 31));
    }

    #[test]
    fn quantize_treats_low_levels_as_two() {
        let src = Raster::new_fill(1, 1, Rgba::opaque(128, 127, 5));
        for levels in [0, 1, 2] {
            let out = quantize(&src, levels);
            assert_eq!(out.pixel_at(0), Rgba::opaque(255, 0, 0));
        }
    }
}
