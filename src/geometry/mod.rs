mod bbox;
mod point;

pub use bbox::{BoundingBox, BoundingBoxBuilder};
pub use point::Point;
