//! Dense vectors and the distance metrics defined over them.

pub mod core;

pub use self::core::distance::DistanceMetric;
pub use self::core::vector::Vector;
