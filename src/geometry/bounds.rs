use crate::math::Point3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box holding every point, or `None` for an empty iterator.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |mut bb, p| {
            bb.min = bb.min.inf(p);
            bb.max = bb.max.sup(p);
            bb
        }))
    }

    /// Largest side length.
    #[must_use]
    pub fn extent(&self) -> f64 {
        (self.max - self.min).max()
    }
}
