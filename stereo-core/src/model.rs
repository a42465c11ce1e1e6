use crate::{CenteredPoint, ImagePoint};
use nalgebra::{Point2, Vector2};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Allows the conversion of image points into principal point centered coordinates
/// for a rectified stereo rig, and exposes what triangulation needs to know about the rig.
///
/// Both cameras of a rectified rig share the same intrinsics, so a single model describes
/// both images.
pub trait StereoModel {
    /// The distance between the two optical centers along the X axis.
    fn baseline(&self) -> f64;

    /// The focal lengths `(fx, fy)` in pixels.
    fn focals(&self) -> Vector2<f64>;

    /// The principal point `(cx, cy)` in pixels.
    fn principal_point(&self) -> Point2<f64>;

    /// Re-expresses an image point relative to the principal point.
    fn center<P>(&self, point: P) -> CenteredPoint
    where
        P: ImagePoint;
}

/// What to do with a correspondence whose disparity is zero (or otherwise yields no finite depth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "snake_case"))]
pub enum DegeneratePolicy {
    /// Fail the whole batch, reporting the lowest offending index.
    #[default]
    Fail,
    /// Drop the offending correspondence and keep going.
    Skip,
}
