use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A 3d point relative to the left camera's optical center and orientation where
/// the positive X axis is right, positive Y axis is down, and positive Z axis is forwards
/// from the optical center of the camera.
///
/// The unit of distance is the unit of the stereo baseline, which is millimeters for
/// the calibrations used throughout this workspace.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraPoint(pub Point3<f64>);

impl CameraPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// Rounds every component to `decimals` decimal places.
    ///
    /// This is meant for reporting. Computations should keep using the full precision point.
    /// Components that can't be scaled without overflowing are returned unchanged.
    ///
    /// ```
    /// use stereo_core::CameraPoint;
    /// let point = CameraPoint::new(122.0577493, 55.2849024, 1231.2281904);
    /// assert_eq!(point.rounded(3), CameraPoint::new(122.058, 55.285, 1231.228));
    /// ```
    #[must_use]
    pub fn rounded(self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
        Self(self.0.map(|n| {
            let scaled = n * scale;
            if scaled.is_finite() {
                scaled.round() / scale
            } else {
                n
            }
        }))
    }

    /// Distance from the left optical center.
    pub fn distance(&self) -> f64 {
        self.0.coords.norm()
    }
}
