//! This crate plugs into `stereo-core` and provides the pinhole model of a rectified stereo rig.
//! It converts pixel picks into coordinates centered on the principal point, which is what disparity
//! triangulation consumes, and it can project 3d points back into both images using
//! [`CalibrationParameters::project`].

use stereo_core::nalgebra::{Matrix3, Point2, Point3, Vector2};
use stereo_core::{
    CenteredPoint, Error, FeatureMatch, ImagePoint, KeyPoint, PixelPoint, Result, StereoModel,
};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Re-expresses an image point relative to the principal point `(cx, cy)`.
///
/// This is exact: `u = x - cx` and `v = y - cy` with no further rounding.
///
/// ```
/// use stereo_core::PixelPoint;
/// use stereo_pinhole::to_centered;
/// let centered = to_centered(PixelPoint::new(700, 400), 635.709, 370.88);
/// assert_eq!(centered.u(), 700.0 - 635.709);
/// assert_eq!(centered.v(), 400.0 - 370.88);
/// ```
pub fn to_centered<P>(point: P, cx: f64, cy: f64) -> CenteredPoint
where
    P: ImagePoint,
{
    let point = point.image_point();
    CenteredPoint::new(point.x - cx, point.y - cy)
}

/// The calibration of a rectified stereo rig.
///
/// Both rectified cameras share these intrinsics. The right camera sits `baseline` units to the
/// right of the left camera, and the unit of `baseline` becomes the unit of every reconstructed point.
/// Values are validated once on construction and can't be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(try_from = "CalibrationRecord", into = "CalibrationRecord")
)]
pub struct CalibrationParameters {
    baseline: f64,
    focals: Vector2<f64>,
    principal_point: Point2<f64>,
    dimensions: Vector2<u32>,
}

impl CalibrationParameters {
    /// Creates validated calibration parameters.
    ///
    /// The focal lengths and image dimensions must be positive and every value must be finite.
    /// The baseline must be non-zero.
    pub fn new(
        baseline: f64,
        focals: Vector2<f64>,
        principal_point: Point2<f64>,
        dimensions: Vector2<u32>,
    ) -> Result<Self> {
        if !baseline.is_finite() || baseline == 0.0 {
            return Err(Error::InvalidCalibration("baseline must be finite and non-zero"));
        }
        if !focals.iter().all(|&f| f.is_finite() && f > 0.0) {
            return Err(Error::InvalidCalibration("focal lengths must be positive"));
        }
        if !principal_point.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidCalibration("principal point must be finite"));
        }
        if dimensions.iter().any(|&d| d == 0) {
            return Err(Error::InvalidCalibration("image dimensions must be positive"));
        }
        Ok(Self {
            baseline,
            focals,
            principal_point,
            dimensions,
        })
    }

    /// The calibration of the 1280x720 rectified rig this workspace was built around.
    ///
    /// The baseline is in millimeters.
    pub fn reference() -> Self {
        Self {
            baseline: 94.926,
            focals: Vector2::new(648.52, 648.52),
            principal_point: Point2::new(635.709, 370.88),
            dimensions: Vector2::new(1280, 720),
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn fx(&self) -> f64 {
        self.focals.x
    }

    pub fn fy(&self) -> f64 {
        self.focals.y
    }

    pub fn cx(&self) -> f64 {
        self.principal_point.x
    }

    pub fn cy(&self) -> f64 {
        self.principal_point.y
    }

    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    pub fn height(&self) -> u32 {
        self.dimensions.y
    }

    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    /// Checks if a pixel lies on the image.
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x < self.width() && point.y < self.height()
    }

    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.focals.x,  0.0,            self.principal_point.x,
            0.0,            self.focals.y,  self.principal_point.y,
            0.0,            0.0,            1.0,
        )
    }

    /// Projects a point in the left camera frame into both rectified images.
    ///
    /// The observations are sub-pixel and not clipped to the image. Returns `None` for points
    /// that are not in front of the rig.
    ///
    /// ```
    /// use stereo_core::nalgebra::Point3;
    /// use stereo_core::StereoModel;
    /// use stereo_pinhole::CalibrationParameters;
    /// let calibration = CalibrationParameters::reference();
    /// let m = calibration.project(Point3::new(120.0, -40.0, 1500.0)).unwrap();
    /// // Both observations lie on the same row.
    /// assert_eq!(m.0.y, m.1.y);
    /// // The disparity is `fx * baseline / Z`.
    /// let disparity = calibration.center(m.0).u() - calibration.center(m.1).u();
    /// assert!((disparity - 648.52 * 94.926 / 1500.0).abs() < 1e-9);
    /// ```
    pub fn project(&self, point: Point3<f64>) -> Option<FeatureMatch<KeyPoint>> {
        if point.z.is_nan() || point.z <= 0.0 {
            return None;
        }
        let v = self.focals.y * point.y / point.z + self.principal_point.y;
        let column = |x: f64| self.focals.x * x / point.z + self.principal_point.x;
        Some(FeatureMatch(
            KeyPoint(Point2::new(column(point.x), v)),
            KeyPoint(Point2::new(column(point.x - self.baseline), v)),
        ))
    }
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self::reference()
    }
}

impl StereoModel for CalibrationParameters {
    fn baseline(&self) -> f64 {
        self.baseline
    }

    fn focals(&self) -> Vector2<f64> {
        self.focals
    }

    fn principal_point(&self) -> Point2<f64> {
        self.principal_point
    }

    fn center<P>(&self, point: P) -> CenteredPoint
    where
        P: ImagePoint,
    {
        to_centered(point, self.principal_point.x, self.principal_point.y)
    }
}

/// The flat record calibration parameters are stored as.
///
/// Keys produced by rectification tools (`rectified_fx`, `rectified_cx`, ...) are accepted as aliases.
/// Convert it with [`TryFrom`] to get validated [`CalibrationParameters`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CalibrationRecord {
    pub baseline: f64,
    #[cfg_attr(feature = "serde-serialize", serde(alias = "rectified_fx"))]
    pub fx: f64,
    #[cfg_attr(feature = "serde-serialize", serde(alias = "rectified_fy"))]
    pub fy: f64,
    #[cfg_attr(feature = "serde-serialize", serde(alias = "rectified_cx"))]
    pub cx: f64,
    #[cfg_attr(feature = "serde-serialize", serde(alias = "rectified_cy"))]
    pub cy: f64,
    #[cfg_attr(feature = "serde-serialize", serde(alias = "rectified_width"))]
    pub width: u32,
    #[cfg_attr(feature = "serde-serialize", serde(alias = "rectified_height"))]
    pub height: u32,
}

impl TryFrom<CalibrationRecord> for CalibrationParameters {
    type Error = Error;

    fn try_from(record: CalibrationRecord) -> Result<Self> {
        Self::new(
            record.baseline,
            Vector2::new(record.fx, record.fy),
            Point2::new(record.cx, record.cy),
            Vector2::new(record.width, record.height),
        )
    }
}

impl From<CalibrationParameters> for CalibrationRecord {
    fn from(calibration: CalibrationParameters) -> Self {
        Self {
            baseline: calibration.baseline,
            fx: calibration.focals.x,
            fy: calibration.focals.y,
            cx: calibration.principal_point.x,
            cy: calibration.principal_point.y,
            width: calibration.dimensions.x,
            height: calibration.dimensions.y,
        }
    }
}
