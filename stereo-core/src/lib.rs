//! # Stereo Core
//!
//! This library provides the common abstractions and types for reconstructing 3d points from a pair of
//! rectified stereo images. All of the crates in this workspace depend on it. It holds the pixel and
//! camera point types, the correspondence bookkeeping, the error taxonomy, and the [`StereoModel`] trait
//! that camera model crates (like `stereo-pinhole`) implement so that triangulation algorithms can be
//! written once against the trait.
//!
//! ## Rectified stereo
//!
//! A rectified stereo rig consists of two identical pinhole cameras `L` and `R` whose optical axes are parallel
//! and whose optical centers `O` are separated by the baseline `b` along the X axis. After rectification, the
//! epipolar lines are the image rows, so a point `p` seen at `l` in the left image is seen on the same row at `r`
//! in the right image. The horizontal offset between the two observations is the disparity, and the depth of
//! `p` is inversely proportional to it.
//!
//! - `p` the point we are trying to recover
//! - `l` the observation of `p` on the left image plane
//! - `r` the observation of `p` on the right image plane
//! - `O` the optical center of a camera
//! - `@` the image planes
//!
//! ```text
//!                     p
//!                    / \
//!                   /   \
//!                  /     \
//!   @@@@@@@@@@@@@@l@@@@@@@@@r@@@@@@@@@@@@@
//!                /           \
//!               /             \
//!              O------b--------O
//!              L               R
//! ```
//!
//! The matched pixels enter the pipeline as [`PixelPoint`]s collected in a [`CorrespondenceSet`],
//! are re-expressed relative to the principal point as [`CenteredPoint`]s, and leave it as [`CameraPoint`]s.

mod correspondence;
mod error;
mod keypoint;
mod matches;
mod model;
mod point;

pub use correspondence::*;
pub use error::*;
pub use keypoint::*;
pub use matches::*;
pub use model::*;
pub use nalgebra;
pub use point::*;
