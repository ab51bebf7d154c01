//! Compositing and comparison over RGBA rasters.
//!
//! ## Distance Scores
//! Pixel distances are L1 sums over RGB, shaped by an [`AlphaPolicy`]; the
//! exact per-policy formula is part of each policy's contract. Region
//! scores add a flat penalty for every absent cell.
//!
//! ## Compositing
//! [`merge`] is the standard alpha-over operator applied at an integer
//! offset; [`similarity_mask`] reuses the comparator to score a repeating
//! block tile against a larger raster, writing per-tile scores into the
//! alpha channel of an otherwise black mask.

mod compare;
mod merge;
mod similarity;

pub use compare::{AlphaPolicy, MISSING_SCORE, pixel_distance, region_distance};
pub use merge::{merge, over};
pub use similarity::similarity_mask;
