use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Allows the retrieval of the point on the image the feature came from.
pub trait ImagePoint {
    /// Retrieves the point on the image
    fn image_point(&self) -> Point2<f64>;
}

/// A pixel picked on one of the rectified images.
///
/// The origin is the top left corner of the image, `x` grows to the right and `y` grows downwards.
/// Pixel coordinates are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PixelPoint(pub Point2<u32>);

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self(Point2::new(x, y))
    }
}

impl ImagePoint for PixelPoint {
    fn image_point(&self) -> Point2<f64> {
        self.0.map(f64::from)
    }
}

/// A sub-pixel point on an image frame in pixel coordinates.
///
/// Use this instead of [`PixelPoint`] when observations do not come from discrete picks,
/// for instance when they are produced by projecting synthetic points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KeyPoint(pub Point2<f64>);

impl ImagePoint for KeyPoint {
    fn image_point(&self) -> Point2<f64> {
        self.0
    }
}

/// A point in image coordinates re-expressed relative to the principal point.
///
/// `u` is the horizontal offset (`x` component) and `v` the vertical offset (`y` component),
/// both still in pixels. It is derived from an image point and carries no meaning on its own.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CenteredPoint(pub Point2<f64>);

impl CenteredPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self(Point2::new(u, v))
    }

    pub fn u(&self) -> f64 {
        self.0.x
    }

    pub fn v(&self) -> f64 {
        self.0.y
    }
}
