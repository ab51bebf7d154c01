use rf_core::{CHANNELS, Raster, Rgba};

use crate::compare::{AlphaPolicy, MISSING_SCORE, region_distance};

/// Scores how well `block` matches `main` on a regular tile grid.
///
/// The block acts as a repeating tile: the offset is folded once, with
/// negative-safe modulo, into `[-bw, 0) x [-bh, 0)`, and the tile is then
/// stamped across `main`'s full extent with step `(bw, bh)`. Each placement
/// gathers the covered `main` pixels (absent outside the bounds), scores
/// them against the block with the `Multiply` policy and the default
/// missing-pair penalty, and divides by the region's total channel count
/// (`bw * bh * 4`).
///
/// The result has `main`'s dimensions and is transparent black except for
/// the alpha channel, which carries the placement's score in every pixel of
/// that tile: 0 means identical, larger means more dissimilar (the metric
/// tops out near 191 for fully missing tiles). An empty block yields the
/// all-zero mask.
pub fn similarity_mask(main: &Raster, block: &Raster, offset_x: isize, offset_y: isize) -> Raster {
    let mut out = Raster::new_fill(main.width(), main.height(), Rgba::default());
    if main.is_empty() || block.is_empty() {
        return out;
    }

    let main_w = main.width() as isize;
    let main_h = main.height() as isize;
    let bw = block.width() as isize;
    let bh = block.height() as isize;

    // Fold the phase once; the scan itself is a single pass.
    let start_x = offset_x.rem_euclid(bw) - bw;
    let start_y = offset_y.rem_euclid(bh) - bh;

    let block_px: Vec<Option<Rgba>> = block.pixels().map(Some).collect();
    let norm = (block_px.len() * CHANNELS) as f32;
    let mut region: Vec<Option<Rgba>> = Vec::with_capacity(block_px.len());

    let mut tile_y = start_y;
    while tile_y < main_h {
        let mut tile_x = start_x;
        while tile_x < main_w {
            region.clear();
            for dy in 0..bh {
                let y = tile_y + dy;
                for dx in 0..bw {
                    let x = tile_x + dx;
                    region.push(if x >= 0 && y >= 0 {
                        main.pixel(x as u32, y as u32)
                    } else {
                        None
                    });
                }
            }

            let total = region_distance(&region, &block_px, AlphaPolicy::Multiply, MISSING_SCORE)
                .expect("region is gathered at block size");
            let score = (total / norm).round().clamp(0.0, 255.0) as u8;

            let value = Rgba::new(0, 0, 0, score);
            for dy in 0..bh {
                let y = tile_y + dy;
                if y < 0 || y >= main_h {
                    continue;
                }
                for dx in 0..bw {
                    let x = tile_x + dx;
                    if x < 0 || x >= main_w {
                        continue;
                    }
                    out.put_pixel(x as u32, y as u32, value);
                }
            }

            tile_x += bw;
        }
        tile_y += bh;
    }

    out
}

#[cfg(test)]
mod tests {
    use rf_core::{Raster, Rgba};

    use super::similarity_mask;

    fn checker(width: u32, height: u32) -> Raster {
        let mut img = Raster::new_fill(width, height, Rgba::opaque(0, 0, 0));
        for y in 0..height {
            for x in 0..width {
                if (x + y) % 2 == 0 {
                    img.put_pixel(x, y, Rgba::opaque(255, 255, 255));
                }
            }
        }
        img
    }

    #[test]
    fn identical_tiles_score_zero() {
        let main = checker(4, 4);
        let block = checker(2, 2);

        let mask = similarity_mask(&main, &block, 0, 0);
        assert_eq!(mask.width(), 4);
        assert_eq!(mask.height(), 4);
        assert!(mask.pixels().all(|px| px == Rgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn mismatched_tile_scores_its_whole_region() {
        // One aligned 2x2 tile of the main differs from the block by 255 on
        // every RGB channel of one pixel: 765 / (2*2*4) rounds to 48.
        let mut main = checker(4, 2);
        let block = checker(2, 2);
        let flipped = if main.pixel(2, 0) == Some(Rgba::opaque(255, 255, 255)) {
            Rgba::opaque(0, 0, 0)
        } else {
            Rgba::opaque(255, 255, 255)
        };
        main.put_pixel(2, 0, flipped);

        let mask = similarity_mask(&main, &block, 0, 0);

        // Matching left tile.
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(mask.pixel(x, y), Some(Rgba::new(0, 0, 0, 0)));
        }
        // Dissimilar right tile carries the same score in all four pixels.
        for (x, y) in [(2, 0), (3, 0), (2, 1), (3, 1)] {
            assert_eq!(mask.pixel(x, y), Some(Rgba::new(0, 0, 0, 48)));
        }
    }

    #[test]
    fn offsets_fold_modulo_block_size() {
        let mut main = checker(6, 6);
        main.put_pixel(3, 3, Rgba::opaque(7, 7, 7));
        let block = checker(2, 2);

        let base = similarity_mask(&main, &block, 1, 1);
        for k in [-2isize, 2, 4] {
            let shifted = similarity_mask(&main, &block, 1 + k * 2, 1 + k * 2);
            assert_eq!(base, shifted);
        }
    }

    #[test]
    fn partial_tiles_pay_the_missing_penalty() {
        // A 3x3 main with a 2x2 block and zero offset: the top-left tile
        // aligns at (0,0), but tiles on the right and bottom hang over the
        // edge and collect penalties for absent cells.
        let main = Raster::new_fill(3, 3, Rgba::opaque(255, 255, 255));
        let block = Raster::new_fill(2, 2, Rgba::opaque(255, 255, 255));

        let mask = similarity_mask(&main, &block, 0, 0);

        // Fully covered tile: perfect match.
        assert_eq!(mask.pixel(0, 0), Some(Rgba::new(0, 0, 0, 0)));
        // Right-edge tile: two of four cells absent, 2 * 765 / 16 = 96.
        assert_eq!(mask.pixel(2, 0), Some(Rgba::new(0, 0, 0, 96)));
        // Corner tile: three of four cells absent, 3 * 765 / 16 = 143.
        assert_eq!(mask.pixel(2, 2), Some(Rgba::new(0, 0, 0, 143)));
    }

    #[test]
    fn empty_block_returns_the_zero_mask() {
        let main = checker(3, 3);
        let block = Raster::new_fill(0, 0, Rgba::default());

        let mask = similarity_mask(&main, &block, 5, -7);
        assert!(mask.pixels().all(|px| px == Rgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn transparent_main_matches_transparent_block() {
        // Multiply weighting zeroes both sides when alphas are zero.
        let main = Raster::new_fill(2, 2, Rgba::new(200, 50, 9, 0));
        let block = Raster::new_fill(2, 2, Rgba::new(1, 2, 3, 0));

        let mask = similarity_mask(&main, &block, 0, 0);
        assert!(mask.pixels().all(|px| px == Rgba::new(0, 0, 0, 0)));
    }
}
