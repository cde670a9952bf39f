//! Normalized gesture input.
//!
//! Hosts translate their platform recognizers into [`GestureEvent`]s tagged
//! with the [`GestureSource`] that produced them.

use crate::config::ActivationTrigger;
use orbit::Point;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum GestureSource {
    LongPress,
    PressureTouch,
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub location: Point,
    /// Normalized `[0, 1]` force, for pressure-capable input.
    pub pressure: Option<f64>,
}

impl GestureEvent {
    pub fn new(phase: GesturePhase, location: Point) -> Self {
        Self {
            phase,
            location,
            pressure: None,
        }
    }

    pub fn began(location: Point) -> Self {
        Self::new(GesturePhase::Began, location)
    }

    pub fn moved(location: Point) -> Self {
        Self::new(GesturePhase::Changed, location)
    }

    pub fn ended(location: Point) -> Self {
        Self::new(GesturePhase::Ended, location)
    }

    pub fn cancelled(location: Point) -> Self {
        Self::new(GesturePhase::Cancelled, location)
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }
}

impl ActivationTrigger {
    /// Adapter that drives presentation, if any.
    pub fn source(&self) -> Option<GestureSource> {
        match self {
            ActivationTrigger::LongPress => Some(GestureSource::LongPress),
            ActivationTrigger::PressureTouch => Some(GestureSource::PressureTouch),
            ActivationTrigger::Tap => Some(GestureSource::Tap),
            ActivationTrigger::Immediate => None,
        }
    }

    /// Whether the touch indicator ring follows the finger.
    pub fn shows_indicator(&self) -> bool {
        matches!(
            self,
            ActivationTrigger::LongPress | ActivationTrigger::PressureTouch
        )
    }
}

/// Raw sample from a force-capable touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub location: Point,
    pub force: f64,
    pub maximum_possible_force: f64,
}

pub const DEFAULT_MAXIMUM_FORCE: f64 = 4.0;

/// Turns raw force touches into gesture events carrying a normalized pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureRecognizer {
    maximum_force: f64,
    force: f64,
}

impl Default for PressureRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAXIMUM_FORCE)
    }
}

impl PressureRecognizer {
    pub fn new(maximum_force: f64) -> Self {
        Self {
            maximum_force,
            force: 0.0,
        }
    }

    /// Normalized force of the latest sample.
    pub fn force(&self) -> f64 {
        self.force
    }

    pub fn maximum_force(&self) -> f64 {
        self.maximum_force
    }

    /// Only the first touch is considered; an empty set produces nothing.
    pub fn recognize(&mut self, phase: GesturePhase, touches: &[Touch]) -> Option<GestureEvent> {
        let touch = touches.first()?;

        // the device may not be able to reach the configured maximum
        self.maximum_force = self.maximum_force.min(touch.maximum_possible_force);
        self.force = if self.maximum_force > 0.0 {
            (touch.force / self.maximum_force).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let event = GestureEvent::new(phase, touch.location).with_pressure(self.force);
        if phase.is_terminal() {
            self.reset();
        }
        Some(event)
    }

    pub fn reset(&mut self) {
        self.force = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(force: f64, max: f64) -> Touch {
        Touch {
            location: Point::new(10.0, 20.0),
            force,
            maximum_possible_force: max,
        }
    }

    #[test]
    fn test_pressure_normalization() {
        let mut recognizer = PressureRecognizer::default();
        let event = recognizer
            .recognize(GesturePhase::Began, &[touch(2.0, 6.67)])
            .unwrap();
        assert_eq!(event.phase, GesturePhase::Began);
        assert_eq!(event.location, Point::new(10.0, 20.0));
        assert_eq!(event.pressure, Some(0.5));
        assert_eq!(recognizer.force(), 0.5);
    }

    #[test]
    fn test_device_maximum_caps_configured_maximum() {
        let mut recognizer = PressureRecognizer::default();
        recognizer.recognize(GesturePhase::Began, &[touch(1.0, 2.0)]);
        assert_eq!(recognizer.maximum_force(), 2.0);
        assert_eq!(recognizer.force(), 0.5);

        // stays capped even if a later touch claims a higher maximum
        recognizer.recognize(GesturePhase::Changed, &[touch(4.0, 6.0)]);
        assert_eq!(recognizer.maximum_force(), 2.0);
        assert_eq!(recognizer.force(), 1.0);
    }

    #[test]
    fn test_terminal_phase_resets_force() {
        let mut recognizer = PressureRecognizer::default();
        recognizer.recognize(GesturePhase::Changed, &[touch(3.0, 6.0)]);
        let event = recognizer
            .recognize(GesturePhase::Ended, &[touch(3.0, 6.0)])
            .unwrap();
        assert_eq!(event.pressure, Some(0.75));
        assert_eq!(recognizer.force(), 0.0);
    }

    #[test]
    fn test_empty_touches_ignored() {
        let mut recognizer = PressureRecognizer::default();
        assert!(recognizer.recognize(GesturePhase::Began, &[]).is_none());
    }

    #[test]
    fn test_zero_maximum_force() {
        let mut recognizer = PressureRecognizer::new(0.0);
        let event = recognizer
            .recognize(GesturePhase::Began, &[touch(1.0, 6.0)])
            .unwrap();
        assert_eq!(event.pressure, Some(0.0));
    }

    #[test]
    fn test_trigger_sources() {
        assert_eq!(
            ActivationTrigger::PressureTouch.source(),
            Some(GestureSource::PressureTouch)
        );
        assert_eq!(ActivationTrigger::Immediate.source(), None);
        assert!(ActivationTrigger::LongPress.shows_indicator());
        assert!(!ActivationTrigger::Tap.shows_indicator());
    }
}
