use thiserror::Error;

/// Every failure the stereo pipeline can surface.
///
/// None of these are transient. Capacity, ordering and length errors are bugs in the caller,
/// while [`Error::DegenerateDisparity`] is a legitimate property of the input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("correspondence set already holds its {capacity} points")]
    CapacityExceeded { capacity: usize },
    #[error("right point #{index} was added before its left point")]
    OutOfOrder { index: usize },
    #[error("left and right sequences have mismatched lengths ({left} and {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("correspondence #{index} has zero disparity")]
    DegenerateDisparity { index: usize },
    #[error("pixel ({x}, {y}) lies outside of the {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("invalid calibration: {0}")]
    InvalidCalibration(&'static str),
    #[error("correspondence set capacity must be positive")]
    ZeroCapacity,
    #[error("correspondence set is incomplete ({left} left and {right} right of {capacity})")]
    Incomplete {
        left: usize,
        right: usize,
        capacity: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
