//! Spatial queries: rays and view frusta.

pub use self::frustum::{Frustum, SideResult};
pub use self::ray::Ray;

mod frustum;
mod ray;
