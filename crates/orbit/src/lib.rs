pub mod geometry;
pub mod macros;

pub use geometry::{
    Insets, Point, Rect, Size, angle_between, distance, missing_triangle_leg, normalize_degrees,
    point_on_circle,
};
