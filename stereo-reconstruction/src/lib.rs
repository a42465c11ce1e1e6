//! Reconstructs 3d points from matched picks on a rectified stereo pair.
//!
//! [`StereoReconstruction`] ties a calibration, a [`CorrespondenceSet`] and the
//! [`DisparityTriangulator`] together. Collect picks in the set returned by
//! [`StereoReconstruction::correspondence_set`] and pass it to [`StereoReconstruction::reconstruct`] once it
//! is complete. Use [`export`] to write the result as a point cloud.

pub mod export;
mod settings;

pub use settings::*;

use float_ord::FloatOrd;
use log::*;
use stereo_core::{
    CameraPoint, CenteredPoint, CorrespondenceSet, Error, PixelPoint, Result, StereoModel,
};
use stereo_geom::DisparityTriangulator;
use stereo_pinhole::CalibrationParameters;

/// A reconstructed point along with the correspondence it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructedPoint {
    /// The index of the correspondence in the set
    pub index: usize,
    pub left: CenteredPoint,
    pub right: CenteredPoint,
    /// The point in the frame of the left camera
    pub point: CameraPoint,
}

impl ReconstructedPoint {
    /// The 1-based number of the pick this point came from.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The point rounded to the number of decimals it is reported with.
    pub fn reported(&self, decimals: u32) -> CameraPoint {
        self.point.rounded(decimals)
    }

    /// A `point #n: (X, Y, Z)` line with every component printed with `decimals` decimals.
    pub fn report(&self, decimals: u32) -> String {
        let p = self.reported(decimals);
        let d = decimals as usize;
        format!(
            "point #{}: ({:.*}, {:.*}, {:.*})",
            self.number(),
            d,
            p.x,
            d,
            p.y,
            d,
            p.z
        )
    }
}

pub struct StereoReconstruction {
    calibration: CalibrationParameters,
    settings: ReconstructionSettings,
    triangulator: DisparityTriangulator,
}

impl StereoReconstruction {
    /// `report_decimals` above [`MAX_REPORT_DECIMALS`] is clamped.
    pub fn new(calibration: CalibrationParameters, mut settings: ReconstructionSettings) -> Self {
        if settings.report_decimals > MAX_REPORT_DECIMALS {
            warn!(
                "report_decimals {} clamped to {}",
                settings.report_decimals, MAX_REPORT_DECIMALS
            );
            settings.report_decimals = MAX_REPORT_DECIMALS;
        }
        Self {
            calibration,
            settings,
            triangulator: DisparityTriangulator::new().policy(settings.degenerate_policy),
        }
    }

    pub fn calibration(&self) -> &CalibrationParameters {
        &self.calibration
    }

    pub fn settings(&self) -> &ReconstructionSettings {
        &self.settings
    }

    /// Creates an empty set that holds `num_points` correspondences.
    ///
    /// If `bounds_check` is enabled, the set rejects picks outside of the calibrated image.
    pub fn correspondence_set(&self) -> Result<CorrespondenceSet> {
        let set = CorrespondenceSet::new(self.settings.num_points)?;
        Ok(if self.settings.bounds_check {
            set.with_bounds(self.calibration.width(), self.calibration.height())
        } else {
            set
        })
    }

    /// Triangulates every correspondence of a complete set.
    ///
    /// The returned points are in pick order. Under [`stereo_core::DegeneratePolicy::Skip`] some indices
    /// may be missing.
    pub fn reconstruct(&self, set: &CorrespondenceSet) -> Result<Vec<ReconstructedPoint>> {
        if !set.is_complete() {
            return Err(Error::Incomplete {
                left: set.left_points().len(),
                right: set.right_points().len(),
                capacity: set.capacity(),
            });
        }

        let center = |points: &[PixelPoint]| -> Vec<CenteredPoint> {
            points.iter().map(|&p| self.calibration.center(p)).collect()
        };
        let left = center(set.left_points());
        let right = center(set.right_points());

        let points: Vec<ReconstructedPoint> = self
            .triangulator
            .triangulate_indexed(&self.calibration, &left, &right)?
            .into_iter()
            .map(|(index, point)| ReconstructedPoint {
                index,
                left: left[index],
                right: right[index],
                point,
            })
            .collect();

        let decimals = self.settings.report_decimals;
        let d = decimals as usize;
        for p in &points {
            info!(
                "{} from left ({:.*}, {:.*}) right ({:.*}, {:.*})",
                p.report(decimals),
                d,
                p.left.u(),
                d,
                p.left.v(),
                d,
                p.right.u(),
                d,
                p.right.v()
            );
        }

        let depths = || points.iter().map(|p| FloatOrd(p.point.z));
        if let (Some(FloatOrd(near)), Some(FloatOrd(far))) = (depths().min(), depths().max()) {
            info!(
                "reconstructed {} of {} points with depths from {} to {}",
                points.len(),
                set.len(),
                near,
                far
            );
        }

        Ok(points)
    }

    /// Writes the points and the optical centers of both cameras as a PLY point cloud.
    ///
    /// `invert_y` from the settings decides if the Y axis is flipped.
    pub fn export_ply(
        &self,
        writer: impl std::io::Write,
        points: &[ReconstructedPoint],
        color: [u8; 3],
    ) -> std::io::Result<()> {
        let points: Vec<_> = points.iter().map(|p| (p.point.0, color)).collect();
        export::export_ply(
            writer,
            &points,
            &export::optical_centers(&self.calibration),
            self.settings.invert_y,
        )
    }
}
