use rf_core::Error;

/// Row-major convolution weight matrix with odd dimensions.
///
/// Fields are public so presets and tests can build kernels directly;
/// [`Kernel::new`] is the validating constructor for caller-supplied
/// weights, and `convolve` re-checks the shape at application time.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    pub width: usize,
    pub height: usize,
    pub weights: Vec<f32>,
}

impl Kernel {
    /// Validates that both dimensions are odd and that `weights` holds
    /// exactly `width * height` entries.
    pub fn new(width: usize, height: usize, weights: Vec<f32>) -> Result<Self, Error> {
        if width.is_multiple_of(2) || height.is_multiple_of(2) {
            return Err(Error::KernelShape { width, height });
        }

        let expected = width * height;
        if weights.len() != expected {
            return Err(Error::LengthMismatch {
                left: weights.len(),
                right: expected,
            });
        }

        Ok(Self {
            width,
            height,
            weights,
        })
    }

    /// 3x3 pass-through kernel.
    pub fn identity() -> Self {
        let mut weights = vec![0.0; 9];
        weights[4] = 1.0;
        Self {
            width: 3,
            height: 3,
            weights,
        }
    }

    /// 3x3 uniform mean.
    pub fn box_blur() -> Self {
        Self {
            width: 3,
            height: 3,
            weights: vec![1.0 / 9.0; 9],
        }
    }

    /// 3x3 binomial Gaussian approximation.
    pub fn gaussian3() -> Self {
        Self::separable(&[1.0, 2.0, 1.0], 16.0)
    }

    /// 5x5 binomial Gaussian approximation.
    pub fn gaussian5() -> Self {
        Self::separable(&[1.0, 4.0, 6.0, 4.0, 1.0], 256.0)
    }

    /// 4-connectivity ridge detector.
    pub fn ridge4() -> Self {
        Self {
            width: 3,
            height: 3,
            weights: vec![0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// 8-connectivity ridge detector.
    pub fn ridge8() -> Self {
        Self {
            width: 3,
            height: 3,
            weights: vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
        }
    }

    /// Horizontal Sobel gradient.
    pub fn sobel_x() -> Self {
        Self {
            width: 3,
            height: 3,
            weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical Sobel gradient.
    pub fn sobel_y() -> Self {
        Self {
            width: 3,
            height: 3,
            weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// 4-neighbor sharpening.
    pub fn sharpen() -> Self {
        Self {
            width: 3,
            height: 3,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// 5x5 unsharp mask: a negated Gaussian with its center lifted so the
    /// weights sum to one.
    pub fn unsharp_mask() -> Self {
        let mut k = Self::gaussian5();
        for w in &mut k.weights {
            *w = -*w;
        }
        k.weights[12] = 476.0 / 256.0;
        k
    }

    /// Outer product of `row` with itself, divided by `norm`.
    fn separable(row: &[f32], norm: f32) -> Self {
        let mut weights = Vec::with_capacity(row.len() * row.len());
        for &wy in row {
            for &wx in row {
                weights.push(wy * wx / norm);
            }
        }

        Self {
            width: row.len(),
            height: row.len(),
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use rf_core::Error;

    use super::Kernel;

    fn weight_sum(k: &Kernel) -> f32 {
        k.weights.iter().sum()
    }

    #[test]
    fn new_rejects_even_dimensions() {
        assert_eq!(
            Kernel::new(2, 3, vec![0.0; 6]).expect_err("even width"),
            Error::KernelShape {
                width: 2,
                height: 3,
            }
        );
        assert_eq!(
            Kernel::new(3, 2, vec![0.0; 6]).expect_err("even height"),
            Error::KernelShape {
                width: 3,
                height: 2,
            }
        );
    }

    #[test]
    fn new_rejects_wrong_weight_count() {
        assert_eq!(
            Kernel::new(3, 3, vec![0.0; 8]).expect_err("eight weights for nine cells"),
            Error::LengthMismatch { left: 8, right: 9 }
        );
    }

    #[test]
    fn identity_has_one_at_center() {
        let k = Kernel::identity();
        assert_eq!(k.weights[4], 1.0);
        assert_eq!(weight_sum(&k), 1.0);
    }

    #[test]
    fn smoothing_kernels_sum_to_one() {
        let smoothing = [Kernel::box_blur(), Kernel::gaussian3(), Kernel::gaussian5()];
        for k in smoothing {
            assert!((weight_sum(&k) - 1.0).abs() < 1e-6);
        }
        assert!((weight_sum(&Kernel::sharpen()) - 1.0).abs() < 1e-6);
        assert!((weight_sum(&Kernel::unsharp_mask()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn detector_kernels_sum_to_zero() {
        let detectors = [
            Kernel::ridge4(),
            Kernel::ridge8(),
            Kernel::sobel_x(),
            Kernel::sobel_y(),
        ];
        for k in detectors {
            assert!(weight_sum(&k).abs() < 1e-6);
        }
    }

    #[test]
    fn gaussian5_is_the_binomial_outer_product() {
        let k = Kernel::gaussian5();
        assert_eq!(k.width, 5);
        assert_eq!(k.height, 5);
        assert!((k.weights[12] - 36.0 / 256.0).abs() < 1e-7);
        assert!((k.weights[0] - 1.0 / 256.0).abs() < 1e-7);
    }
}
