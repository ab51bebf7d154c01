//! Crop, pad, and canvas-resize without resampling.
//!
//! The output starts fully transparent; source pixels are copied verbatim
//! where the shifted window overlaps the source.

use rf_core::{Raster, Rgba};

/// Cuts a `width x height` window out of `src`, anchored at
/// `(offset_x, offset_y)` in source coordinates.
///
/// Destination pixel `(j, i)` takes source pixel
/// `(offset_x + j, offset_y + i)` when that lies inside `src`; every other
/// destination pixel stays transparent black. Negative offsets pad the
/// leading edges, offsets inside the source with a smaller window crop.
pub fn resize(src: &Raster, offset_x: isize, offset_y: isize, width: u32, height: u32) -> Raster {
    let mut out = Raster::new_fill(width, height, Rgba::default());
    if src.is_empty() {
        return out;
    }

    let src_w = src.width() as isize;
    let src_h = src.height() as isize;

    for i in 0..height {
        // A saturated coordinate falls outside the source and is skipped.
        let sy = offset_y.saturating_add(i as isize);
        if sy < 0 || sy >= src_h {
            continue;
        }

        for j in 0..width {
            let sx = offset_x.saturating_add(j as isize);
            if sx < 0 || sx >= src_w {
                continue;
            }

            let px = src.pixel_at(sy as usize * src.width() as usize + sx as usize);
            out.put_pixel(j, i, px);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use rf_core::{Raster, Rgba};

    use super::resize;

    fn numbered(width: u32, height: u32) -> Raster {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for i in 0..width * height {
            data.extend_from_slice(&[i as u8, (i + 100) as u8, (i + 200) as u8, 255]);
        }
        Raster::from_vec(width, height, data).expect("valid raster")
    }

    #[test]
    fn zero_offset_same_size_is_identity() {
        let src = numbered(3, 2);
        let out = resize(&src, 0, 0, 3, 2);
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn negative_offset_pads_a_leading_column() {
        let src = numbered(2, 2);
        let out = resize(&src, -1, 0, 3, 2);

        for y in 0..2 {
            assert_eq!(out.pixel(0, y), Some(Rgba::new(0, 0, 0, 0)));
            assert_eq!(out.pixel(1, y), src.pixel(0, y));
            assert_eq!(out.pixel(2, y), src.pixel(1, y));
        }
    }

    #[test]
    fn positive_offset_crops() {
        let src = numbered(3, 3);
        let out = resize(&src, 1, 1, 2, 2);

        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 2);
        assert_eq!(out.pixel(0, 0), src.pixel(1, 1));
        assert_eq!(out.pixel(1, 1), src.pixel(2, 2));
    }

    #[test]
    fn window_beyond_source_stays_transparent() {
        let src = numbered(2, 2);
        let out = resize(&src, 5, 5, 2, 2);
        assert!(out.pixels().all(|px| px == Rgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn offsets_at_the_isize_extremes_stay_transparent() {
        let src = numbered(2, 2);

        for (ox, oy) in [
            (isize::MAX, 0),
            (0, isize::MAX),
            (isize::MIN, 0),
            (0, isize::MIN),
        ] {
            let out = resize(&src, ox, oy, 2, 1);
            assert!(out.pixels().all(|px| px == Rgba::new(0, 0, 0, 0)));
        }
    }

    #[test]
    fn growing_canvas_pads_trailing_edges() {
        let src = numbered(2, 1);
        let out = resize(&src, 0, 0, 3, 2);

        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
        assert_eq!(out.pixel(1, 0), src.pixel(1, 0));
        assert_eq!(out.pixel(2, 0), Some(Rgba::new(0, 0, 0, 0)));
        assert_eq!(out.pixel(0, 1), Some(Rgba::new(0, 0, 0, 0)));
    }
}
