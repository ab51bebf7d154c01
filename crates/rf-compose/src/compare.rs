use rf_core::{Error, Rgba};

/// Default score for pairs where either side is absent: the maximum
/// unweighted RGB distance, `255 * 3`.
pub const MISSING_SCORE: f32 = 765.0;

/// How the alpha channel participates in a pixel distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaPolicy {
    /// Alpha plays no role; plain L1 distance over RGB.
    Ignore,
    /// `a` is taken as fully opaque as-is; `b`'s RGB is weighted by `b`'s
    /// alpha. Intentionally asymmetric.
    IgnoreFirst,
    /// RGB compared unweighted, then the absolute alpha difference (in raw
    /// 0-255 units) is added to the score.
    Subtract,
    /// Each side's RGB is weighted by its own alpha:
    /// `sum_c |a_c * aa - b_c * ab|` with alphas normalized to `[0, 1]`.
    /// Symmetric, and identical to `Ignore` for opaque inputs.
    Multiply,
}

/// L1 distance between two pixels under the given alpha policy.
///
/// The base distance is the sum of absolute per-channel RGB differences,
/// never squared. Symmetric for `Ignore`, `Subtract`, and `Multiply`;
/// `IgnoreFirst` deliberately weights only `b`'s side.
pub fn pixel_distance(a: Rgba, b: Rgba, policy: AlphaPolicy) -> f32 {
    match policy {
        AlphaPolicy::Ignore => weighted_l1(a, 1.0, b, 1.0),
        AlphaPolicy::IgnoreFirst => weighted_l1(a, 1.0, b, b.alpha_unit()),
        AlphaPolicy::Subtract => weighted_l1(a, 1.0, b, 1.0) + (a.a as f32 - b.a as f32).abs(),
        AlphaPolicy::Multiply => weighted_l1(a, a.alpha_unit(), b, b.alpha_unit()),
    }
}

/// Sums [`pixel_distance`] over two equal-length pixel sequences.
///
/// Fails with `LengthMismatch` before any scoring if the lengths differ.
/// A pair where either side is `None` contributes the flat `missing_score`
/// instead of a computed distance; [`MISSING_SCORE`] is the conventional
/// default.
pub fn region_distance(
    a: &[Option<Rgba>],
    b: &[Option<Rgba>],
    policy: AlphaPolicy,
    missing_score: f32,
) -> Result<f32, Error> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut total = 0.0;
    for (pa, pb) in a.iter().zip(b) {
        total += match (pa, pb) {
            (Some(pa), Some(pb)) => pixel_distance(*pa, *pb, policy),
            _ => missing_score,
        };
    }

    Ok(total)
}

fn weighted_l1(a: Rgba, wa: f32, b: Rgba, wb: f32) -> f32 {
    (a.r as f32 * wa - b.r as f32 * wb).abs()
        + (a.g as f32 * wa - b.g as f32 * wb).abs()
        + (a.b as f32 * wa - b.b as f32 * wb).abs()
}
