pub use self::bvh_tree::{Bvh, BvhBuildConfig, BvhInfo, BvhNode, BvhObject};

mod bvh_dump;
mod bvh_insert;
mod bvh_queries;
mod bvh_top_down;
mod bvh_traverse;
mod bvh_tree;
