//! Foundational primitives for RGBA pixel-buffer work.
//!
//! ## Buffer Layout
//! A [`Raster`] always stores interleaved RGBA, one byte per channel, in
//! row-major order: `data[(y * width + x) * 4]` is the red byte of `(x, y)`.
//! RGB input is widened with alpha 255 at construction; there is no other
//! in-memory form.
//!
//! ## Value Semantics
//! Rasters are immutable values from the point of view of transforms: every
//! operation in this workspace reads its inputs and returns a freshly
//! allocated output. Channel arithmetic that leaves `[0, 255]` saturates,
//! never wraps.
//!
//! ## Errors
//! Construction and comparison failures are reported through the workspace
//! [`Error`] enum. All failures are synchronous and local; nothing in this
//! crate logs, retries, or performs I/O.

mod error;
mod pixel;
mod raster;
mod recolor;
mod record;

pub use error::Error;
pub use pixel::{CHANNELS, OPAQUE, Rgba};
pub use raster::{Raster, map_pixels};
pub use recolor::{GrayWeights, binarize, grayscale, quantize};
pub use record::RasterRecord;
