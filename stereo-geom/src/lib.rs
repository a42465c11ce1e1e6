//! This crate contains the geometry used to recover depth from a rectified stereo pair.
//!
//! ## Disparity triangulation
//!
//! The two cameras of a rectified rig only differ by a translation of `b` (the baseline) along X.
//! A point at depth `Z` that is seen at centered column `uL` on the left image is seen at
//! `uR = uL - f * b / Z` on the right image. The difference `d = uL - uR` is the disparity,
//! and inverting the relation gives the point back:
//!
//! ```text
//! Z = fx * b / d
//! X = uL * Z / fx
//! Y = vL * Z / fy
//! ```
//!
//! A disparity of zero puts the point at infinity, which can't be represented and is reported as
//! [`stereo_core::Error::DegenerateDisparity`].

pub mod triangulation;

pub use triangulation::*;
