//! Umbrella crate for the raster-forge workspace.
//!
//! Re-exports the library crates so downstream code can depend on a single
//! name:
//!
//! - [`rf_core`]: the RGBA raster container and per-pixel recoloring
//! - [`rf_filter`]: convolution kernels, window mapping, and edge policies
//! - [`rf_compose`]: pixel distances, alpha compositing, and block similarity
//! - [`rf_geom`]: canvas resizing
//!
//! ```
//! use raster_forge::{EdgePolicy, Kernel, Raster, Rgba, convolve};
//!
//! let img = Raster::new_fill(64, 64, Rgba::opaque(200, 200, 200));
//! let blurred = convolve(&img, &Kernel::box_blur(), EdgePolicy::Preserve)
//!     .expect("preset kernels are well formed");
//! assert_eq!(blurred.width(), 64);
//! ```

pub use rf_compose::*;
pub use rf_core::*;
pub use rf_filter::*;
pub use rf_geom::*;
