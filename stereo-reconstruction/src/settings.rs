use stereo_core::DegeneratePolicy;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The largest `report_decimals` honored. An `f64` holds at most 15 to 17 significant decimal digits.
pub const MAX_REPORT_DECIMALS: u32 = 15;

/// The settings for the reconstruction process.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReconstructionSettings {
    /// The number of correspondences to collect before reconstructing
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_num_points"))]
    pub num_points: usize,
    /// What to do with correspondences that have zero disparity
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub degenerate_policy: DegeneratePolicy,
    /// The number of decimals points are reported with (at most [`MAX_REPORT_DECIMALS`])
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_report_decimals")
    )]
    pub report_decimals: u32,
    /// Flip the Y axis of exported points so that up is positive
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_invert_y"))]
    pub invert_y: bool,
    /// Reject picks that fall outside of the calibrated image
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_bounds_check"))]
    pub bounds_check: bool,
}

impl Default for ReconstructionSettings {
    fn default() -> Self {
        Self {
            num_points: default_num_points(),
            degenerate_policy: DegeneratePolicy::default(),
            report_decimals: default_report_decimals(),
            invert_y: default_invert_y(),
            bounds_check: default_bounds_check(),
        }
    }
}

fn default_num_points() -> usize {
    30
}

fn default_report_decimals() -> u32 {
    3
}

fn default_invert_y() -> bool {
    true
}

fn default_bounds_check() -> bool {
    true
}
