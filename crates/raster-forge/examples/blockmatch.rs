//! Locate a composited badge by sweeping block-similarity phases.
//!
//! Builds a synthetic gradient backdrop, composites a checkered badge onto
//! it with `merge`, then runs `similarity_mask` once per grid phase and
//! keeps the tile with the lowest score. When the grid phase lines up with
//! the badge position, one tile covers the badge exactly and scores zero.
//!
//! Run from the workspace root:
//!
//! ```bash
//! cargo run --release -p raster-forge --example blockmatch
//! cargo run --release -p raster-forge --example blockmatch -- \
//!     --width 640 --height 480 --badge 32 --badge-x 413 --badge-y 257
//! ```
//!
//! Writes `scene.png`, `mask.png` (best-phase scores), and
//! `blockmatch.json` into the output directory.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use image::{GrayImage, RgbaImage};
use raster_forge::{Raster, Rgba, merge, similarity_mask};
use serde::Serialize;

// ── CLI ─────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Find a composited badge by sweeping block-similarity phases")]
struct Args {
    /// Backdrop width in pixels
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Backdrop height in pixels
    #[arg(long, default_value_t = 240)]
    height: u32,

    /// Badge edge length in pixels
    #[arg(long, default_value_t = 24)]
    badge: u32,

    /// Badge x position in the scene
    #[arg(long, default_value_t = 137)]
    badge_x: u32,

    /// Badge y position in the scene
    #[arg(long, default_value_t = 61)]
    badge_y: u32,

    /// Output directory for scene.png, mask.png, and blockmatch.json
    #[arg(long, default_value = "docs/fig/blockmatch")]
    out_dir: PathBuf,
}

// ── Output DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MatchDto {
    badge_at: [u32; 2],
    found_at: [isize; 2],
    phase: [u32; 2],
    score: u8,
    scanned_phases: u32,
    elapsed_ms: f64,
}

// ── Scene synthesis ─────────────────────────────────────────────────────────

fn backdrop(width: u32, height: u32) -> Raster {
    let mut img = Raster::new_fill(width, height, Rgba::opaque(0, 0, 0));
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            img.put_pixel(x, y, Rgba::opaque(r, g, 96));
        }
    }
    img
}

fn badge(size: u32) -> Raster {
    let mut img = Raster::new_fill(size, size, Rgba::opaque(255, 255, 255));
    for y in 0..size {
        for x in 0..size {
            if (x / 4 + y / 4) % 2 == 0 {
                img.put_pixel(x, y, Rgba::opaque(255, 0, 128));
            }
        }
    }
    img
}

// ── Matching ────────────────────────────────────────────────────────────────

struct Best {
    score: u8,
    found: (isize, isize),
    phase: (u32, u32),
    mask: Raster,
}

/// Every pixel of a tile carries the tile's score, so the minimum pixel
/// identifies the best tile. Its origin is recovered by snapping back to
/// the phase-shifted grid.
fn best_tile(mask: &Raster, phase_x: u32, phase_y: u32, size: u32) -> (u8, (isize, isize)) {
    let mut min_score = u8::MAX;
    let mut min_at = (0u32, 0u32);
    for (i, px) in mask.pixels().enumerate() {
        if px.a < min_score {
            min_score = px.a;
            min_at = (i as u32 % mask.width(), i as u32 / mask.width());
        }
    }

    let b = size as isize;
    let start_x = (phase_x as isize).rem_euclid(b) - b;
    let start_y = (phase_y as isize).rem_euclid(b) - b;
    let origin_x = start_x + (min_at.0 as isize - start_x) / b * b;
    let origin_y = start_y + (min_at.1 as isize - start_y) / b * b;
    (min_score, (origin_x, origin_y))
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.badge > 0, "badge size must be positive");

    let block = badge(args.badge);
    let scene = merge(
        &backdrop(args.width, args.height),
        &block,
        args.badge_x as isize,
        args.badge_y as isize,
    );
    println!(
        "scene {}x{}, badge {}x{} composited at ({}, {})",
        args.width, args.height, args.badge, args.badge, args.badge_x, args.badge_y
    );

    let t_scan = Instant::now();
    let mut best: Option<Best> = None;
    for phase_y in 0..args.badge {
        for phase_x in 0..args.badge {
            let mask = similarity_mask(&scene, &block, phase_x as isize, phase_y as isize);
            let (score, found) = best_tile(&mask, phase_x, phase_y, args.badge);
            if best.as_ref().is_none_or(|b| score < b.score) {
                best = Some(Best {
                    score,
                    found,
                    phase: (phase_x, phase_y),
                    mask,
                });
            }
        }
    }
    let elapsed_ms = t_scan.elapsed().as_secs_f64() * 1e3;

    let best = best.expect("badge size is positive, so at least one phase was scanned");
    println!(
        "best phase ({}, {}): tile at ({}, {}) scores {} [{} phases in {elapsed_ms:.1} ms]",
        best.phase.0,
        best.phase.1,
        best.found.0,
        best.found.1,
        best.score,
        args.badge * args.badge,
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;
    save_rgba(args.out_dir.join("scene.png"), &scene)?;
    save_scores(args.out_dir.join("mask.png"), &best.mask)?;

    let dto = MatchDto {
        badge_at: [args.badge_x, args.badge_y],
        found_at: [best.found.0, best.found.1],
        phase: [best.phase.0, best.phase.1],
        score: best.score,
        scanned_phases: args.badge * args.badge,
        elapsed_ms,
    };
    let out_path = args.out_dir.join("blockmatch.json");
    let out_file = fs::File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    serde_json::to_writer_pretty(out_file, &dto).context("writing match json")?;
    println!("wrote {}", out_path.display());

    Ok(())
}

// ── Image output ────────────────────────────────────────────────────────────

fn save_rgba(path: PathBuf, img: &Raster) -> Result<()> {
    let png = RgbaImage::from_raw(img.width(), img.height(), img.data().to_vec())
        .context("constructing RgbaImage from raster bytes")?;
    png.save(&path)
        .with_context(|| format!("saving {}", path.display()))
}

fn save_scores(path: PathBuf, mask: &Raster) -> Result<()> {
    let scores: Vec<u8> = mask.pixels().map(|px| px.a).collect();
    let gray = GrayImage::from_raw(mask.width(), mask.height(), scores)
        .context("constructing GrayImage from mask scores")?;
    gray.save(&path)
        .with_context(|| format!("saving {}", path.display()))
}
