//! Spatial partitioning tools.

pub use self::bvh::{Bvh, BvhBuildConfig, BvhInfo, BvhNode, BvhObject};

mod bvh;
