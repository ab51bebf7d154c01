//! Spatial filtering over RGBA rasters.
//!
//! ## Kernels
//! A [`Kernel`] is a row-major `f32` weight matrix with odd width and
//! height. Named presets cover the usual suspects (box blur, binomial
//! Gaussians, Sobel gradients, ridge detectors, sharpen, unsharp mask).
//!
//! ## Window Mapping
//! [`window_indices`] maps one kernel placement to linear pixel indices,
//! with `None` marking cells outside the image. The list always has
//! `kw * kh` entries and pairs index-for-index with the kernel weights.
//!
//! ## Edge Policy
//! [`convolve`] leaves border pixels untouched under the default
//! [`EdgePolicy::Preserve`]; [`EdgePolicy::Truncate`] accumulates whatever
//! cells remain in bounds. Output alpha is always fully opaque.

mod convolve;
mod kernel;
mod window;

pub use convolve::{EdgePolicy, convolve};
pub use kernel::Kernel;
pub use window::window_indices;
