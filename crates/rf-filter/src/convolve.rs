use rf_core::{Error, Raster, Rgba};

use crate::kernel::Kernel;
use crate::window::window_indices_into;

/// Boundary handling when the kernel window leaves the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Copy the source pixel's RGB unchanged whenever any window cell is
    /// out of bounds, so borders do not darken.
    #[default]
    Preserve,
    /// Skip out-of-bounds cells; in-bounds cells accumulate as usual.
    Truncate,
}

/// Convolves `src` with `kernel`, returning a raster of the same size.
///
/// Weights accumulate per RGB channel in `f32`; each channel is rounded and
/// clamped to `[0, 255]` independently. The output alpha is 255 on every
/// pixel; source alpha does not participate in the accumulation.
///
/// Fails with `KernelShape` if either kernel dimension is even, before any
/// pixel is processed. A hand-built kernel whose weight count disagrees with
/// its dimensions is rejected with `LengthMismatch`.
pub fn convolve(src: &Raster, kernel: &Kernel, policy: EdgePolicy) -> Result<Raster, Error> {
    if kernel.width.is_multiple_of(2) || kernel.height.is_multiple_of(2) {
        return Err(Error::KernelShape {
            width: kernel.width,
            height: kernel.height,
        });
    }
    if kernel.weights.len() != kernel.width * kernel.height {
        return Err(Error::LengthMismatch {
            left: kernel.weights.len(),
            right: kernel.width * kernel.height,
        });
    }

    let width = src.width() as usize;
    let height = src.height() as usize;
    let rx = kernel.width / 2;
    let ry = kernel.height / 2;

    let mut out = Raster::new_fill(src.width(), src.height(), Rgba::default());
    let mut window = vec![None; kernel.weights.len()];

    for y in 0..height {
        for x in 0..width {
            // The window fits entirely inside iff the pixel is at least the
            // kernel radius away from every border.
            let inside = x >= rx && x + rx < width && y >= ry && y + ry < height;

            let px = if inside {
                accumulate_inside(src, kernel, x, y)
            } else {
                match policy {
                    EdgePolicy::Preserve => {
                        let s = src.pixel_at(y * width + x);
                        Rgba::opaque(s.r, s.g, s.b)
                    }
                    EdgePolicy::Truncate => {
                        window_indices_into(
                            src.width(),
                            src.height(),
                            x as u32,
                            y as u32,
                            kernel.width,
                            kernel.height,
                            &mut window,
                        );
                        accumulate_present(src, kernel, &window)
                    }
                }
            };

            out.put_pixel(x as u32, y as u32, px);
        }
    }

    Ok(out)
}

fn accumulate_inside(src: &Raster, kernel: &Kernel, x: usize, y: usize) -> Rgba {
    let width = src.width() as usize;
    let rx = kernel.width / 2;
    let ry = kernel.height / 2;

    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
    let mut wi = 0;
    for ky in 0..kernel.height {
        let row = (y + ky - ry) * width;
        for kx in 0..kernel.width {
            let s = src.pixel_at(row + x + kx - rx);
            let w = kernel.weights[wi];
            wi += 1;
            r += s.r as f32 * w;
            g += s.g as f32 * w;
            b += s.b as f32 * w;
        }
    }

    Rgba::opaque(narrow(r), narrow(g), narrow(b))
}

fn accumulate_present(src: &Raster, kernel: &Kernel, window: &[Option<usize>]) -> Rgba {
    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
    for (cell, &w) in window.iter().zip(&kernel.weights) {
        let Some(i) = cell else { continue };
        let s = src.pixel_at(*i);
        r += s.r as f32 * w;
        g += s.g as f32 * w;
        b += s.b as f32 * w;
    }

    Rgba::opaque(narrow(r), narrow(g), narrow(b))
}

fn narrow(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
