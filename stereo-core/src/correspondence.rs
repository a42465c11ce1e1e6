use crate::{Error, PixelMatch, PixelPoint, Result};
use nalgebra::Point2;
use parking_lot::Mutex;
use std::sync::Arc;

/// Accumulates a fixed number of matched pixel picks between a left and a right rectified image.
///
/// Left picks are appended freely. A right pick only supplies its `x` coordinate: its row is copied from
/// the left pick at the same index, which enforces the epipolar constraint of rectified images. Index `i`
/// of the left sequence and index `i` of the right sequence observe the same 3d point.
///
/// ```
/// use stereo_core::{CorrespondenceSet, PixelPoint};
/// let mut set = CorrespondenceSet::new(2).unwrap();
/// set.add_left(PixelPoint::new(700, 400)).unwrap();
/// set.add_left(PixelPoint::new(310, 95)).unwrap();
/// set.add_right(650).unwrap();
/// assert!(!set.is_complete());
/// set.add_right(290).unwrap();
/// assert!(set.is_complete());
/// assert_eq!(set.right_points()[0], PixelPoint::new(650, 400));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrespondenceSet {
    capacity: usize,
    bounds: Option<(u32, u32)>,
    left: Vec<PixelPoint>,
    right: Vec<PixelPoint>,
}

impl CorrespondenceSet {
    /// Creates an empty set that will hold exactly `capacity` pairs.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            bounds: None,
            left: Vec::with_capacity(capacity),
            right: Vec::with_capacity(capacity),
        })
    }

    /// Rejects picks that fall outside of a `width` by `height` image.
    #[must_use]
    pub fn with_bounds(self, width: u32, height: u32) -> Self {
        Self {
            bounds: Some((width, height)),
            ..self
        }
    }

    /// Appends a pick on the left image.
    pub fn add_left(&mut self, point: PixelPoint) -> Result<()> {
        if self.left.len() == self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.check_bounds(point)?;
        self.left.push(point);
        Ok(())
    }

    /// Appends a pick on the right image at column `x`.
    ///
    /// The row is taken from the left pick with the same index, so that left pick must already exist.
    pub fn add_right(&mut self, x: u32) -> Result<()> {
        let index = self.right.len();
        if index == self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let y = self
            .left
            .get(index)
            .ok_or(Error::OutOfOrder { index })?
            .y;
        let point = PixelPoint(Point2::new(x, y));
        self.check_bounds(point)?;
        self.right.push(point);
        Ok(())
    }

    fn check_bounds(&self, point: PixelPoint) -> Result<()> {
        match self.bounds {
            Some((width, height)) if point.x >= width || point.y >= height => {
                Err(Error::PixelOutOfBounds {
                    x: point.x,
                    y: point.y,
                    width,
                    height,
                })
            }
            _ => Ok(()),
        }
    }

    /// Both sequences hold `capacity` picks.
    pub fn is_complete(&self) -> bool {
        self.left.len() == self.capacity && self.right.len() == self.capacity
    }

    pub fn left_points(&self) -> &[PixelPoint] {
        &self.left
    }

    pub fn right_points(&self) -> &[PixelPoint] {
        &self.right
    }

    /// The number of completed pairs.
    pub fn len(&self) -> usize {
        self.right.len()
    }

    /// No pair has been completed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of left picks still waiting for their right pick.
    pub fn pending_right(&self) -> usize {
        self.left.len() - self.right.len()
    }

    /// Iterates over the completed pairs in pick order.
    pub fn pairs(&self) -> impl Iterator<Item = PixelMatch> + '_ {
        self.left
            .iter()
            .zip(&self.right)
            .map(|(&left, &right)| PixelMatch::new(left, right))
    }

    /// Forgets every pick, keeping the capacity and bounds.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

/// A cloneable handle to a [`CorrespondenceSet`] that can be fed from several threads.
///
/// Every call takes the lock, so `add_left` and `add_right` coming from independent capture
/// streams are applied one at a time and the index alignment of the set is preserved.
#[derive(Debug, Clone)]
pub struct SharedCorrespondenceSet(Arc<Mutex<CorrespondenceSet>>);

impl SharedCorrespondenceSet {
    pub fn new(set: CorrespondenceSet) -> Self {
        Self(Arc::new(Mutex::new(set)))
    }

    pub fn add_left(&self, point: PixelPoint) -> Result<()> {
        self.0.lock().add_left(point)
    }

    pub fn add_right(&self, x: u32) -> Result<()> {
        self.0.lock().add_right(x)
    }

    pub fn is_complete(&self) -> bool {
        self.0.lock().is_complete()
    }

    /// Copies the current state of the set.
    pub fn snapshot(&self) -> CorrespondenceSet {
        self.0.lock().clone()
    }
}
