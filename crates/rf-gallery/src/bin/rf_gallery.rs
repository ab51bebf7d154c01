use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, RgbaImage};
use rf_compose::{merge, similarity_mask};
use rf_core::{GrayWeights, Raster, binarize, grayscale, quantize};
use rf_filter::{EdgePolicy, Kernel, convolve};
use rf_geom::resize;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "rf_gallery")]
#[command(about = "Run raster-forge transforms on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "grayscale")]
    Grayscale(GrayscaleArgs),
    #[command(name = "binarize")]
    Binarize(BinarizeArgs),
    #[command(name = "quantize")]
    Quantize(QuantizeArgs),
    #[command(name = "convolve")]
    Convolve(ConvolveArgs),
    #[command(name = "merge")]
    Merge(MergeArgs),
    #[command(name = "similarity")]
    Similarity(SimilarityArgs),
    #[command(name = "resize")]
    Resize(ResizeArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct GrayscaleArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 0.299)]
    wr: f32,
    #[arg(long, default_value_t = 0.587)]
    wg: f32,
    #[arg(long, default_value_t = 0.114)]
    wb: f32,
}

#[derive(Args, Debug, Clone)]
struct BinarizeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 128)]
    threshold: u8,
}

#[derive(Args, Debug, Clone)]
struct QuantizeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 4)]
    levels: u8,
}

#[derive(Args, Debug, Clone)]
struct ConvolveArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value = "box-blur")]
    kernel: String,
    #[arg(long, default_value = "preserve")]
    edge: String,
}

#[derive(Args, Debug, Clone)]
struct MergeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    overlay: PathBuf,
    #[arg(long, default_value_t = 0)]
    dx: isize,
    #[arg(long, default_value_t = 0)]
    dy: isize,
}

#[derive(Args, Debug, Clone)]
struct SimilarityArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    block: PathBuf,
    #[arg(long, default_value_t = 0)]
    dx: isize,
    #[arg(long, default_value_t = 0)]
    dy: isize,
}

#[derive(Args, Debug, Clone)]
struct ResizeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 0)]
    dx: isize,
    #[arg(long, default_value_t = 0)]
    dy: isize,
    #[arg(long, required = true)]
    width: u32,
    #[arg(long, required = true)]
    height: u32,
}

#[derive(Debug, Clone, Serialize)]
struct MetaGrayscale {
    weights: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
struct MetaBinarize {
    threshold: u8,
    weights: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
struct MetaQuantize {
    levels: u8,
}

#[derive(Debug, Clone, Serialize)]
struct MetaConvolve {
    kernel: String,
    kernel_size: [usize; 2],
    edge: String,
}

#[derive(Debug, Clone, Serialize)]
struct MetaMerge {
    overlay: String,
    dx: isize,
    dy: isize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSimilarity {
    block: String,
    dx: isize,
    dy: isize,
    score_min: u8,
    score_max: u8,
}

#[derive(Debug, Clone, Serialize)]
struct MetaResize {
    dx: isize,
    dy: isize,
    width: u32,
    height: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Grayscale(args) => run_grayscale(args),
        Command::Binarize(args) => run_binarize(args),
        Command::Quantize(args) => run_quantize(args),
        Command::Convolve(args) => run_convolve(args),
        Command::Merge(args) => run_merge(args),
        Command::Similarity(args) => run_similarity(args),
        Command::Resize(args) => run_resize(args),
    }
}

fn run_grayscale(args: GrayscaleArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "grayscale")?;
    let img = load_raster(&args.common.input)?;

    let weights = GrayWeights {
        r: args.wr,
        g: args.wg,
        b: args.wb,
    };
    let out = grayscale(&img, &weights);

    save_raster(case_dir.join("result.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaGrayscale {
            weights: [weights.r, weights.g, weights.b],
        },
    )
}

fn run_binarize(args: BinarizeArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "binarize")?;
    let img = load_raster(&args.common.input)?;

    let weights = GrayWeights::default();
    let out = binarize(&img, args.threshold, &weights);

    save_raster(case_dir.join("result.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaBinarize {
            threshold: args.threshold,
            weights: [weights.r, weights.g, weights.b],
        },
    )
}

fn run_quantize(args: QuantizeArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "quantize")?;
    let img = load_raster(&args.common.input)?;

    let out = quantize(&img, args.levels);

    save_raster(case_dir.join("result.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaQuantize {
            levels: args.levels,
        },
    )
}

fn run_convolve(args: ConvolveArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "convolve")?;
    let img = load_raster(&args.common.input)?;

    let kernel = kernel_by_name(&args.kernel)?;
    let edge = edge_by_name(&args.edge)?;
    let out = convolve(&img, &kernel, edge)
        .with_context(|| format!("convolving with kernel '{}'", args.kernel))?;

    save_raster(case_dir.join("result.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaConvolve {
            kernel: args.kernel,
            kernel_size: [kernel.width, kernel.height],
            edge: args.edge,
        },
    )
}

fn run_merge(args: MergeArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "merge")?;
    let bg = load_raster(&args.common.input)?;
    let fg = load_raster(&args.overlay)?;

    fs::copy(&args.overlay, case_dir.join("overlay.png")).with_context(|| {
        format!("copying overlay {} into the case directory", args.overlay.display())
    })?;

    let out = merge(&bg, &fg, args.dx, args.dy);

    save_raster(case_dir.join("result.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaMerge {
            overlay: args.overlay.display().to_string(),
            dx: args.dx,
            dy: args.dy,
        },
    )
}

fn run_similarity(args: SimilarityArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "similarity")?;
    let main_img = load_raster(&args.common.input)?;
    let block = load_raster(&args.block)?;

    fs::copy(&args.block, case_dir.join("block.png")).with_context(|| {
        format!("copying block {} into the case directory", args.block.display())
    })?;

    let mask = similarity_mask(&main_img, &block, args.dx, args.dy);

    let mut score_min = u8::MAX;
    let mut score_max = u8::MIN;
    for px in mask.pixels() {
        score_min = score_min.min(px.a);
        score_max = score_max.max(px.a);
    }

    // The scores live in the alpha channel; a grayscale render reads better.
    save_mask(case_dir.join("result.png"), &mask)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaSimilarity {
            block: args.block.display().to_string(),
            dx: args.dx,
            dy: args.dy,
            score_min,
            score_max,
        },
    )
}

fn run_resize(args: ResizeArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "resize")?;
    let img = load_raster(&args.common.input)?;

    let out = resize(&img, args.dx, args.dy, args.width, args.height);

    save_raster(case_dir.join("result.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaResize {
            dx: args.dx,
            dy: args.dy,
            width: args.width,
            height: args.height,
        },
    )
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    fs::copy(&common.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            common.input.display(),
            case_dir.join("input.png").display()
        )
    })?;

    Ok(case_dir)
}

fn load_raster(path: &Path) -> Result<Raster> {
    let rgba = image::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    Raster::from_vec(width, height, rgba.into_raw())
        .with_context(|| format!("constructing raster from {}", path.display()))
}

fn save_raster(path: PathBuf, img: &Raster) -> Result<()> {
    let png = RgbaImage::from_raw(img.width(), img.height(), img.data().to_vec())
        .context("constructing RgbaImage from raster bytes")?;
    png.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_mask(path: PathBuf, mask: &Raster) -> Result<()> {
    let scores: Vec<u8> = mask.pixels().map(|px| px.a).collect();
    let gray = GrayImage::from_raw(mask.width(), mask.height(), scores)
        .context("constructing GrayImage from mask scores")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn kernel_by_name(name: &str) -> Result<Kernel> {
    Ok(match name {
        "identity" => Kernel::identity(),
        "box-blur" => Kernel::box_blur(),
        "gaussian3" => Kernel::gaussian3(),
        "gaussian5" => Kernel::gaussian5(),
        "ridge4" => Kernel::ridge4(),
        "ridge8" => Kernel::ridge8(),
        "sobel-x" => Kernel::sobel_x(),
        "sobel-y" => Kernel::sobel_y(),
        "sharpen" => Kernel::sharpen(),
        "unsharp-mask" => Kernel::unsharp_mask(),
        other => bail!("unknown kernel preset '{other}'"),
    })
}

fn edge_by_name(name: &str) -> Result<EdgePolicy> {
    Ok(match name {
        "preserve" => EdgePolicy::Preserve,
        "truncate" => EdgePolicy::Truncate,
        other => bail!("unknown edge policy '{other}'"),
    })
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
