use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    DimensionMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    KernelShape { width: usize, height: usize },
    LengthMismatch { left: usize, right: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { width, height, actual } => {
                write!(
                    f,
                    "dimension mismatch: {width}x{height} raster cannot hold {actual} bytes"
                )
            }
            Self::KernelShape { width, height } => {
                write!(f, "kernel shape {width}x{height}: dimensions must be odd")
            }
            Self::LengthMismatch { left, right } => {
                write!(f, "length mismatch: {left} vs {right}")
            }
        }
    }
}

impl std::error::Error for Error {}
