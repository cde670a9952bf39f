//! Screen-space geometry with Y growing downward.
//!
//! Angles are in degrees, measured clockwise from vertical-up, so `0°` is
//! straight above the origin and `90°` is to its right.

use derive_more::{From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        distance(*self, other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn largest_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Component-wise maximum.
    pub fn union(&self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn top(top: f64) -> Self {
        Self {
            top,
            ..Self::default()
        }
    }
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of the ray from `origin` to `point`, clockwise from vertical-up, in `[0, 360)`.
pub fn angle_between(origin: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - origin.x, point.y - origin.y);
    // atan2 measures from the x axis; rotate a quarter turn to measure from up
    let angle = dy.atan2(dx).to_degrees() + 90.0;
    if angle < 0.0 { angle + 360.0 } else { angle }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx.hypot(dy)
}

/// Parametric position on a circle, Y inverted for downward-growing screens.
pub fn point_on_circle(radius: f64, angle_degrees: f64, origin: Point) -> Point {
    let angle = angle_degrees.to_radians();
    Point::new(
        origin.x + radius * angle.sin(),
        origin.y - radius * angle.cos(),
    )
}

/// Length of the unknown leg of a right triangle.
///
/// Whichever input has the larger magnitude is used as the hypotenuse, so the
/// result is always real.
pub fn missing_triangle_leg(hypotenuse: f64, known_leg: f64) -> f64 {
    let hypotenuse = hypotenuse.abs().max(known_leg.abs());
    let leg = known_leg.abs().min(hypotenuse);
    (hypotenuse.powi(2) - leg.powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn angular_gap(a: f64, b: f64) -> f64 {
        let gap = (a - b).rem_euclid(360.0);
        gap.min(360.0 - gap)
    }

    #[test]
    fn test_point_on_circle_keeps_radius() {
        let origins = [Point::new(0.0, 0.0), Point::new(100.0, 100.0), Point::new(-40.0, 7.5)];
        for origin in origins {
            for radius in [0.0, 1.0, 42.5, 300.0] {
                for step in 0..72 {
                    let angle = step as f64 * 5.0 - 90.0;
                    let p = point_on_circle(radius, angle, origin);
                    assert!((distance(p, origin) - radius).abs() < EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_angle_between_inverts_point_on_circle() {
        let origin = Point::new(100.0, 100.0);
        for step in 0..360 {
            let angle = step as f64;
            let p = point_on_circle(80.0, angle, origin);
            let recovered = angle_between(origin, p);
            assert!((0.0..360.0).contains(&recovered));
            assert!(angular_gap(recovered, angle) < 1e-6, "{angle} -> {recovered}");
        }
    }

    #[test]
    fn test_angle_between_screen_directions() {
        let origin = Point::new(50.0, 50.0);
        assert!((angle_between(origin, Point::new(50.0, 0.0)) - 0.0).abs() < EPSILON);
        assert!((angle_between(origin, Point::new(100.0, 50.0)) - 90.0).abs() < EPSILON);
        assert!((angle_between(origin, Point::new(50.0, 100.0)) - 180.0).abs() < EPSILON);
        assert!((angle_between(origin, Point::new(0.0, 50.0)) - 270.0).abs() < EPSILON);
        assert!((angle_between(origin, Point::new(0.0, 0.0)) - 315.0).abs() < EPSILON);
    }

    #[test]
    fn test_point_on_circle_up_is_negative_y() {
        let p = point_on_circle(10.0, 0.0, Point::new(0.0, 0.0));
        assert!(p.x.abs() < EPSILON);
        assert!((p.y + 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_missing_triangle_leg() {
        assert!((missing_triangle_leg(5.0, 3.0) - 4.0).abs() < EPSILON);
        assert!((missing_triangle_leg(5.0, -3.0) - 4.0).abs() < EPSILON);
        // swapped inputs still resolve against the larger magnitude
        assert!((missing_triangle_leg(3.0, 5.0) - 4.0).abs() < EPSILON);
        assert_eq!(missing_triangle_leg(7.0, 7.0), 0.0);
        assert_eq!(missing_triangle_leg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_missing_triangle_leg_pythagoras() {
        for h in [0.0, 0.5, 3.0, 10.0, 125.0] {
            for a in [0.0, 0.25, 3.0, 9.0, 200.0] {
                let leg = missing_triangle_leg(h, a);
                let (hyp, known) = (h.max(a), h.min(a));
                assert!((leg.powi(2) + known.powi(2) - hyp.powi(2)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-45.0), 315.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(765.0), 45.0);
        assert!((0.0..360.0).contains(&normalize_degrees(-1e-18)));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.max_x(), 110.0);
        assert_eq!(rect.mid_y(), 45.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_point_from_tuple() {
        let p: Point = (3.0, 4.0).into();
        assert_eq!(p.distance_to(Point::default()), 5.0);
        assert_eq!(Size::from((2.0, 9.0)).largest_side(), 9.0);
    }
}
