use rf_core::{Raster, Rgba};

/// Standard alpha-over of `above` on `below`.
///
/// With `aa`/`ab` the two alphas normalized to `[0, 1]`:
/// `a_out = aa * (1 - ab) + ab` and
/// `c_out = (c_below * aa * (1 - ab) + c_above * ab) / a_out`.
/// When both alphas are zero the result is `below` unchanged; that branch is
/// the only way `a_out` can reach zero.
pub fn over(below: Rgba, above: Rgba) -> Rgba {
    let aa = below.alpha_unit();
    let ab = above.alpha_unit();
    if aa == 0.0 && ab == 0.0 {
        return below;
    }

    let out_a = aa * (1.0 - ab) + ab;
    let blend = |cb: u8, ca: u8| -> u8 {
        let v = (cb as f32 * aa * (1.0 - ab) + ca as f32 * ab) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba::new(
        blend(below.r, above.r),
        blend(below.g, above.g),
        blend(below.b, above.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// Composites `fg` over `bg` at an integer offset.
///
/// The result has `bg`'s dimensions. Foreground pixel `(fx, fy)` lands on
/// `(offset_x + fx, offset_y + fy)`; placements outside the background are
/// skipped, everything else goes through [`over`]. Merging twice over
/// overlapping regions is order-dependent, as alpha compositing generally
/// is.
pub fn merge(bg: &Raster, fg: &Raster, offset_x: isize, offset_y: isize) -> Raster {
    let mut out = bg.clone();
    let bg_w = bg.width() as isize;
    let bg_h = bg.height() as isize;

    for fy in 0..fg.height() {
        // A saturated coordinate falls outside the background and is skipped.
        let ty = offset_y.saturating_add(fy as isize);
        if ty < 0 || ty >= bg_h {
            continue;
        }

        for fx in 0..fg.width() {
            let tx = offset_x.saturating_add(fx as isize);
            if tx < 0 || tx >= bg_w {
                continue;
            }

            let below = bg.pixel_at(ty as usize * bg.width() as usize + tx as usize);
            let above = fg.pixel_at(fy as usize * fg.width() as usize + fx as usize);
            out.put_pixel(tx as u32, ty as u32, over(below, above));
        }
    }

    out
}
