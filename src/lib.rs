/*!
bvh3d
=====

**bvh3d** is a bounding volume hierarchy over axis-aligned bounding boxes,
written with the rust programming language. It accelerates two spatial
queries over a scene of caller-owned objects: view-frustum culling and ray
intersection.

Two construction strategies are provided: a recursive top-down median-split
builder and an incremental branch-and-bound inserter. Objects are borrowed
from the caller and threaded through intrusive per-leaf lists, so adding an
object to a node never allocates.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod query;
pub mod stats;

/// Compilation aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use na::{Matrix4, Point3, Vector3};

    /// The scalar type used throughout this crate.
    pub use f32 as Real;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
