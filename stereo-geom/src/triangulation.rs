use log::*;
use stereo_core::{CameraPoint, CenteredPoint, DegeneratePolicy, Error, Result, StereoModel};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// The horizontal disparity between the left and right observations of a point.
pub fn disparity(left: CenteredPoint, right: CenteredPoint) -> f64 {
    left.u() - right.u()
}

/// Recovers 3d points from index-aligned left and right observations by inverting the
/// rectified pinhole projection.
///
/// Every correspondence is triangulated on its own, so the output at index `i` only ever depends on the
/// inputs at index `i`. With the `rayon` feature the correspondences are processed in parallel; the order
/// of the output and the index reported on failure are the same as with sequential processing.
///
/// ```
/// use stereo_core::{PixelPoint, StereoModel};
/// use stereo_pinhole::CalibrationParameters;
/// use stereo_geom::DisparityTriangulator;
///
/// let calibration = CalibrationParameters::reference();
/// let left = [calibration.center(PixelPoint::new(700, 400))];
/// let right = [calibration.center(PixelPoint::new(650, 400))];
/// let points = DisparityTriangulator::new()
///     .triangulate(&calibration, &left, &right)
///     .unwrap();
/// assert_eq!(points[0].rounded(3).z, 1231.228);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct DisparityTriangulator {
    policy: DegeneratePolicy,
}

impl DisparityTriangulator {
    /// Creates a `DisparityTriangulator` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set what happens to correspondences with zero disparity.
    ///
    /// Default is [`DegeneratePolicy::Fail`].
    #[must_use]
    pub fn policy(self, policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Triangulates a single correspondence.
    ///
    /// `index` is only used to identify the correspondence in the returned error.
    pub fn triangulate_one<M>(
        &self,
        model: &M,
        index: usize,
        left: CenteredPoint,
        right: CenteredPoint,
    ) -> Result<CameraPoint>
    where
        M: StereoModel,
    {
        let d = disparity(left, right);
        if d == 0.0 {
            return Err(Error::DegenerateDisparity { index });
        }
        let focals = model.focals();
        let z = focals.x * (model.baseline() / d);
        if !z.is_finite() {
            return Err(Error::DegenerateDisparity { index });
        }
        if z < 0.0 {
            warn!(
                "correspondence #{} has negative disparity {} and lies behind the rig",
                index, d
            );
        }
        let x = left.u() * (z / focals.x);
        let y = left.v() * (z / focals.y);
        Ok(CameraPoint::new(x, y, z))
    }

    /// Triangulates every correspondence and keeps the index it came from.
    ///
    /// Both sequences must have the same, non-zero length. Under [`DegeneratePolicy::Skip`] the
    /// degenerate correspondences are left out, so the indices tell which inputs survived.
    pub fn triangulate_indexed<M>(
        &self,
        model: &M,
        left: &[CenteredPoint],
        right: &[CenteredPoint],
    ) -> Result<Vec<(usize, CameraPoint)>>
    where
        M: StereoModel + Sync,
    {
        if left.len() != right.len() || left.is_empty() {
            return Err(Error::LengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let process = |(index, (&l, &r)): (usize, (&CenteredPoint, &CenteredPoint))| {
            (index, self.triangulate_one(model, index, l, r))
        };

        #[cfg(not(feature = "rayon"))]
        let results: Vec<_> = left.iter().zip(right).enumerate().map(process).collect();
        #[cfg(feature = "rayon")]
        let results: Vec<_> = left
            .par_iter()
            .zip(right)
            .enumerate()
            .map(process)
            .collect();

        let mut points = Vec::with_capacity(results.len());
        for (index, result) in results {
            match (result, self.policy) {
                (Ok(point), _) => points.push((index, point)),
                (Err(e), DegeneratePolicy::Fail) => return Err(e),
                (Err(e), DegeneratePolicy::Skip) => warn!("skipping correspondence: {}", e),
            }
        }
        debug!(
            "triangulated {} of {} correspondences",
            points.len(),
            left.len()
        );
        Ok(points)
    }

    /// Triangulates every correspondence.
    ///
    /// Under [`DegeneratePolicy::Fail`] the output has the same length as the inputs and entry `i` comes from
    /// input `i`. See [`DisparityTriangulator::triangulate_indexed`] to track skipped correspondences.
    pub fn triangulate<M>(
        &self,
        model: &M,
        left: &[CenteredPoint],
        right: &[CenteredPoint],
    ) -> Result<Vec<CameraPoint>>
    where
        M: StereoModel + Sync,
    {
        self.triangulate_indexed(model, left, right)
            .map(|points| points.into_iter().map(|(_, point)| point).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereo_core::nalgebra::{Point2, Vector2};
    use stereo_core::ImagePoint;

    /// A unit rig with the principal point at the origin.
    struct UnitRig;

    impl StereoModel for UnitRig {
        fn baseline(&self) -> f64 {
            1.0
        }

        fn focals(&self) -> Vector2<f64> {
            Vector2::new(1.0, 2.0)
        }

        fn principal_point(&self) -> Point2<f64> {
            Point2::origin()
        }

        fn center<P>(&self, point: P) -> CenteredPoint
        where
            P: ImagePoint,
        {
            CenteredPoint(point.image_point())
        }
    }

    #[test]
    fn unit_rig() {
        let point = DisparityTriangulator::new()
            .triangulate_one(
                &UnitRig,
                0,
                CenteredPoint::new(0.75, 0.5),
                CenteredPoint::new(0.25, 0.5),
            )
            .unwrap();
        assert_eq!(point, CameraPoint::new(1.5, 0.5, 2.0));
    }

    #[test]
    fn zero_disparity() {
        let a = CenteredPoint::new(3.0, 1.0);
        assert_eq!(
            DisparityTriangulator::new().triangulate_one(&UnitRig, 7, a, a),
            Err(Error::DegenerateDisparity { index: 7 })
        );
    }

    #[test]
    fn vanishing_disparity_overflows() {
        let a = CenteredPoint::new(f64::MIN_POSITIVE / 4.0, 1.0);
        let b = CenteredPoint::new(0.0, 1.0);
        assert_eq!(
            DisparityTriangulator::new().triangulate_one(&UnitRig, 2, a, b),
            Err(Error::DegenerateDisparity { index: 2 })
        );
    }

    #[test]
    fn negative_disparity_is_behind() {
        let point = DisparityTriangulator::new()
            .triangulate_one(
                &UnitRig,
                0,
                CenteredPoint::new(0.25, 0.0),
                CenteredPoint::new(0.75, 0.0),
            )
            .unwrap();
        assert_eq!(point.z, -2.0);
    }

    #[test]
    fn policy_builder() {
        let triangulator = DisparityTriangulator::new();
        assert_eq!(triangulator.degenerate_policy(), DegeneratePolicy::Fail);
        let triangulator = triangulator.policy(DegeneratePolicy::Skip);
        assert_eq!(triangulator.degenerate_policy(), DegeneratePolicy::Skip);
    }
}
