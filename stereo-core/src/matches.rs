use crate::PixelPoint;

/// A pair of observations of the same 3d point, the left image first.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FeatureMatch<P>(pub P, pub P);

impl<P: Copy> FeatureMatch<P> {
    pub fn new(left: P, right: P) -> Self {
        Self(left, right)
    }

    pub fn left(&self) -> P {
        self.0
    }

    pub fn right(&self) -> P {
        self.1
    }
}

/// Matched pixel picks on the left and right rectified images.
pub type PixelMatch = FeatureMatch<PixelPoint>;
