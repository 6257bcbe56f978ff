//! View frustum and frustum-vs-Aabb classification.

use crate::bounding_volume::Aabb;
use crate::math::{Matrix4, Point, Real, Vector, DIM};
use crate::na;
use crate::stats::Stats;

/// The result of classifying a volume against a [`Frustum`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SideResult {
    /// The volume is fully inside the frustum.
    Inside,
    /// The volume crosses at least one frustum plane.
    Intersecting,
    /// The volume is fully outside the frustum.
    Outside,
}

/// A plane in implicit form: the points `x` with `normal · x + d = 0`.
#[derive(Copy, Clone, Debug)]
struct Plane {
    normal: Vector<Real>,
    d: Real,
}

impl Plane {
    #[inline]
    fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) + self.d
    }
}

/// A view frustum: six inward-facing planes extracted from a
/// view-projection matrix.
#[derive(Copy, Clone, Debug)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Extracts the six frustum planes of the view-projection matrix `m`.
    ///
    /// The planes face inward: a point `x` lies within the frustum when
    /// `normal · x + d >= 0` holds for all six planes. The planes are not
    /// normalized since only the signs of distances matter for
    /// classification.
    pub fn from_view_projection(m: &Matrix4<Real>) -> Self {
        let row = |i: usize| -> na::Vector4<Real> { m.row(i).transpose() };
        let plane = |v: na::Vector4<Real>| Plane {
            normal: Vector::new(v.x, v.y, v.z),
            d: v.w,
        };

        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Frustum {
            planes: [
                plane(r3 + r0), // left
                plane(r3 - r0), // right
                plane(r3 + r1), // bottom
                plane(r3 - r1), // top
                plane(r3 + r2), // near
                plane(r3 - r2), // far
            ],
        }
    }

    /// Classifies `aabb` against this frustum with the n/p-vertex test.
    ///
    /// For each plane only two box corners matter: the one farthest along
    /// the plane normal (p-vertex) and the one farthest against it
    /// (n-vertex). A plane whose p-vertex is behind it rejects the whole
    /// box; a plane whose n-vertex is behind it cuts through the box.
    ///
    /// Every call increments [`Stats::frustum_vs_aabb`].
    pub fn classify(&self, aabb: &Aabb) -> SideResult {
        Stats::record_frustum_vs_aabb();

        let mut result = SideResult::Inside;

        for plane in &self.planes {
            let mut p_vertex = aabb.mins;
            let mut n_vertex = aabb.maxs;
            for i in 0..DIM {
                if plane.normal[i] >= 0.0 {
                    p_vertex[i] = aabb.maxs[i];
                    n_vertex[i] = aabb.mins[i];
                }
            }

            if plane.signed_distance(&p_vertex) < 0.0 {
                return SideResult::Outside;
            }

            if plane.signed_distance(&n_vertex) < 0.0 {
                result = SideResult::Intersecting;
            }
        }

        result
    }
}
