//! Declarative keyframe animations.
//!
//! The menu only decides target values and timing; a host animator does the
//! interpolation and reports back through
//! [`crate::ContextualMenu::animation_finished`].

use super::delegate::ViewHandle;
use derive_more::{Display, From, Into};
use orbit::{Point, Rect};
use palette::Srgba;
use std::mem::discriminant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("animation#{_0}")]
pub struct AnimationId(u64);

impl AnimationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Cubic,
    EaseInOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Dimmed backdrop behind the items.
    Scrim,
    /// Ring following the finger.
    Indicator,
    View(ViewHandle),
}

/// Outline drawn around the touch indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub diameter: f64,
    pub stroke_width: f64,
    pub color: Srgba<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    Center(Point),
    Alpha(f64),
    Scale(f64),
    Hidden(bool),
    Frame(Rect),
    Fill(Srgba<f64>),
    Ring(Ring),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    pub target: Target,
    pub property: Property,
}

impl Change {
    pub fn new(target: Target, property: Property) -> Self {
        Self { target, property }
    }

    pub fn center(view: ViewHandle, center: Point) -> Self {
        Self::new(Target::View(view), Property::Center(center))
    }

    pub fn alpha(view: ViewHandle, alpha: f64) -> Self {
        Self::new(Target::View(view), Property::Alpha(alpha))
    }

    pub fn scale(view: ViewHandle, scale: f64) -> Self {
        Self::new(Target::View(view), Property::Scale(scale))
    }

    fn same_slot(&self, other: &Change) -> bool {
        self.target == other.target
            && discriminant(&self.property) == discriminant(&other.property)
    }
}

/// Changes applied over `[start, start + duration]`, as fractions of the
/// whole animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub start: f64,
    pub duration: f64,
    pub changes: Vec<Change>,
}

impl Keyframe {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub id: AnimationId,
    /// Seconds.
    pub duration: f64,
    pub curve: Curve,
    /// Start from whatever is on screen, interrupting an animation in flight.
    pub begin_from_current_state: bool,
    pub keyframes: Vec<Keyframe>,
}

impl Animation {
    pub fn new(id: AnimationId, duration: f64) -> Self {
        Self {
            id,
            duration,
            curve: Curve::EaseInOut,
            begin_from_current_state: false,
            keyframes: Vec::new(),
        }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn from_current_state(mut self) -> Self {
        self.begin_from_current_state = true;
        self
    }

    pub fn keyframe(mut self, start: f64, duration: f64, changes: Vec<Change>) -> Self {
        debug_assert!((0.0..=1.0).contains(&start) && duration >= 0.0);
        self.keyframes.push(Keyframe {
            start,
            duration,
            changes,
        });
        self
    }

    /// Changes spanning the whole animation.
    pub fn throughout(self, changes: Vec<Change>) -> Self {
        self.keyframe(0.0, 1.0, changes)
    }

    /// Value of every animated property once the animation has run.
    ///
    /// The keyframe ending last wins; among keyframes ending together the one
    /// declared last wins.
    pub fn final_values(&self) -> Vec<Change> {
        let mut ordered: Vec<&Keyframe> = self.keyframes.iter().collect();
        ordered.sort_by(|a, b| a.end().total_cmp(&b.end()));

        let mut values: Vec<Change> = Vec::new();
        for change in ordered.into_iter().flat_map(|k| k.changes.iter()) {
            match values.iter_mut().find(|v| v.same_slot(change)) {
                Some(existing) => *existing = *change,
                None => values.push(*change),
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_values_last_ending_keyframe_wins() {
        let view = ViewHandle::new(1);
        let animation = Animation::new(AnimationId::new(7), 0.2)
            .keyframe(0.6, 0.4, vec![Change::scale(view, 1.0)])
            .keyframe(0.0, 0.2, vec![Change::scale(view, 1.2)])
            .keyframe(0.2, 0.6, vec![Change::scale(view, 0.8)])
            .throughout(vec![Change::alpha(view, 1.0)]);

        let values = animation.final_values();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&Change::scale(view, 1.0)));
        assert!(values.contains(&Change::alpha(view, 1.0)));
    }

    #[test]
    fn test_final_values_keeps_targets_apart() {
        let (a, b) = (ViewHandle::new(1), ViewHandle::new(2));
        let animation = Animation::new(AnimationId::new(1), 0.3)
            .keyframe(
                0.0,
                0.8,
                vec![
                    Change::center(a, Point::new(0.0, 0.0)),
                    Change::center(b, Point::new(1.0, 1.0)),
                ],
            )
            .keyframe(0.8, 0.2, vec![Change::center(a, Point::new(5.0, 5.0))])
            .throughout(vec![Change::new(Target::Scrim, Property::Alpha(1.0))]);

        let values = animation.final_values();
        assert_eq!(values.len(), 3);
        assert!(values.contains(&Change::center(a, Point::new(5.0, 5.0))));
        assert!(values.contains(&Change::center(b, Point::new(1.0, 1.0))));
        assert!(values.contains(&Change::new(Target::Scrim, Property::Alpha(1.0))));
    }

    #[test]
    fn test_builder_flags() {
        let animation = Animation::new(AnimationId::new(3), 0.2)
            .with_curve(Curve::Cubic)
            .from_current_state();
        assert_eq!(animation.curve, Curve::Cubic);
        assert!(animation.begin_from_current_state);
        assert_eq!(AnimationId::new(3).next(), AnimationId::new(4));
    }
}
