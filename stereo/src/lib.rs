//! # `stereo`
//!
//! Batteries-included rectified stereo reconstruction crate
//!
//! This crate gathers the crates of this workspace in one place. It is useful for quickly
//! reconstructing a handful of picked points or for writing a tool like `stereo-sandbox`.
//! If you only need part of the functionality, depend on the individual crates instead.
//!
//! All of the basic types from `stereo-core` are included in the root of the crate.
//!
//! ## Modules
//! * [`camera`] - camera models to convert pixels into centered coordinates (and back)
//! * [`geom`] - triangulation of matched observations
//! * [`mvg`] - the reconstruction pipeline and point cloud export

pub use stereo_core::*;

/// Camera models
pub mod camera {
    /// The rectified pinhole camera model
    #[cfg(feature = "stereo-pinhole")]
    pub use stereo_pinhole as pinhole;
}

/// Computational geometry
pub mod geom {
    #[cfg(feature = "stereo-geom")]
    pub use stereo_geom::*;
}

/// Multiple-view geometry
pub mod mvg {
    #[cfg(feature = "stereo-reconstruction")]
    pub use stereo_reconstruction as reconstruction;
}
