//! Axis Aligned Bounding Box.

use crate::math::{Matrix4, Point, Real, Vector};
use crate::na;

/// An Axis Aligned Bounding Box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// Position of the point with the smallest coordinates.
    pub mins: Point<Real>,
    /// Position of the point with the highest coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new Aabb.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each
    ///     component of `mins` must be smaller than the related component of
    ///     `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid Aabb with `mins` components set to `Real::MAX` and
    /// `maxs` components set to `-Real::MAX`.
    ///
    /// This is often used as the initial value of some merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new Aabb from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The center of this Aabb.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this Aabb.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The half extents of this Aabb.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        self.extents() * 0.5
    }

    /// The volume of this Aabb.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// The surface area of this Aabb.
    #[inline]
    pub fn surface_area(&self) -> Real {
        let extents = self.extents();
        2.0 * (extents.x * extents.y + extents.y * extents.z + extents.z * extents.x)
    }

    /// The index of the axis with the largest extent.
    ///
    /// Ties resolve to the smallest axis index.
    #[inline]
    pub fn longest_axis(&self) -> usize {
        self.extents().imax()
    }

    /// Checks if this Aabb fully encloses `other`.
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    /// Merges `other` into this Aabb in-place.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    /// The smallest Aabb enclosing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Computes the vertices of this Aabb.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }

    /// Computes the Aabb enclosing `self` transformed by the 4×4 matrix `m`.
    pub fn transformed_by(&self, m: &Matrix4<Real>) -> Self {
        let mut result = Aabb::new_invalid();

        for vertex in self.vertices() {
            result.take_point(m.transform_point(&vertex));
        }

        result
    }

    /// Enlarges this Aabb so it also contains the point `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb;
    use crate::math::{Matrix4, Point, Vector};

    #[test]
    fn merged_encloses_both() {
        let a = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point::new(1.0, 0.0, 0.0), Point::new(2.0, 1.0, 1.0));
        let m = a.merged(&b);
        assert!(m.contains(&a));
        assert!(m.contains(&b));
        assert_relative_eq!(m.mins, Point::new(0.0, 0.0, 0.0));
        assert_relative_eq!(m.maxs, Point::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn longest_axis_prefers_lower_index_on_ties() {
        let a = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 2.0, 1.0));
        assert_eq!(a.longest_axis(), 0);
        let b = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 3.0, 3.0));
        assert_eq!(b.longest_axis(), 1);
    }

    #[test]
    fn measures() {
        let a = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 3.0, 4.0));
        assert_relative_eq!(a.volume(), 24.0);
        assert_relative_eq!(a.surface_area(), 2.0 * (6.0 + 12.0 + 8.0));
        assert_relative_eq!(a.center(), Point::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn transformed_by_translation() {
        let a = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
        let m = Matrix4::new_translation(&Vector::new(10.0, -2.0, 0.5));
        let t = a.transformed_by(&m);
        assert_relative_eq!(t.mins, Point::new(10.0, -2.0, 0.5));
        assert_relative_eq!(t.maxs, Point::new(11.0, -1.0, 1.5));
    }
}
