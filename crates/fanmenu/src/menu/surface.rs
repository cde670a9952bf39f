use super::delegate::{Title, View, ViewHandle};
use super::style::LabelStyle;
use super::timeline::{Animation, AnimationId, Change, Property, Ring, Target};
use crate::gesture::GestureSource;
use orbit::{Point, Rect, Size};
use palette::Srgba;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct PillLabel {
    pub text: Title,
    pub style: LabelStyle,
    pub size: Size,
    pub corner_radius: f64,
}

/// Views the menu has to fabricate when the delegate does not supply them.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewSpec {
    Label(PillLabel),
    /// Invisible stand-in for an item without a title.
    Placeholder(Size),
    Overlay { size: Size, color: Srgba<f64> },
}

impl ViewSpec {
    pub fn size(&self) -> Size {
        match self {
            ViewSpec::Label(label) => label.size,
            ViewSpec::Placeholder(size) | ViewSpec::Overlay { size, .. } => *size,
        }
    }
}

/// Rendering collaborator. Owns every visual; the menu only refers to them by
/// handle.
pub trait Surface {
    fn measure_text(&self, text: &Title, style: &LabelStyle) -> Size {
        style.estimate_text_size(text)
    }

    fn create_view(&mut self, spec: ViewSpec) -> View;

    /// Places `view` on the scrim, on top of everything already there.
    fn add(&mut self, view: ViewHandle, center: Point, alpha: f64);

    fn remove(&mut self, view: ViewHandle);

    /// Stacks `overlay` over `host`, filling it and following it around.
    fn attach_overlay(&mut self, overlay: ViewHandle, host: ViewHandle);

    fn bring_to_front(&mut self, target: Target);

    fn set(&mut self, change: Change);

    fn animate(&mut self, animation: Animation);

    fn enable_gesture(&mut self, _source: GestureSource, _enabled: bool) {}
}

/// Shared counter handing out unique view handles.
#[derive(Debug, Clone, Default)]
pub struct HandleAllocator(Rc<Cell<u64>>);

impl HandleAllocator {
    pub fn next(&self) -> ViewHandle {
        let raw = self.0.get() + 1;
        self.0.set(raw);
        ViewHandle::new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: Point,
    pub alpha: f64,
    pub scale: f64,
    pub hidden: bool,
    pub frame: Option<Rect>,
    pub fill: Option<Srgba<f64>>,
    pub ring: Option<Ring>,
    pub host: Option<ViewHandle>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: Point::default(),
            alpha: 1.0,
            scale: 1.0,
            hidden: false,
            frame: None,
            fill: None,
            ring: None,
            host: None,
        }
    }
}

impl ViewState {
    fn apply(&mut self, property: Property) {
        match property {
            Property::Center(center) => self.center = center,
            Property::Alpha(alpha) => self.alpha = alpha,
            Property::Scale(scale) => self.scale = scale,
            Property::Hidden(hidden) => self.hidden = hidden,
            Property::Frame(frame) => self.frame = Some(frame),
            Property::Fill(color) => self.fill = Some(color),
            Property::Ring(ring) => self.ring = Some(ring),
        }
    }
}

/// Headless surface: keeps the resulting state of every command, jumps
/// animations straight to their end values and queues them for completion.
#[derive(Debug)]
pub struct RecordingSurface {
    handles: HandleAllocator,
    created: HashMap<ViewHandle, ViewSpec>,
    states: HashMap<Target, ViewState>,
    z_order: Vec<ViewHandle>,
    animations: Vec<Animation>,
    gestures: HashSet<GestureSource>,
}

impl RecordingSurface {
    pub fn new(handles: HandleAllocator) -> Self {
        let mut states = HashMap::new();
        states.insert(
            Target::Scrim,
            ViewState {
                alpha: 0.0,
                ..ViewState::default()
            },
        );
        states.insert(Target::Indicator, ViewState::default());

        Self {
            handles,
            created: HashMap::new(),
            states,
            z_order: Vec::new(),
            animations: Vec::new(),
            gestures: HashSet::new(),
        }
    }

    pub fn state(&self, target: Target) -> Option<&ViewState> {
        self.states.get(&target)
    }

    pub fn view(&self, view: ViewHandle) -> Option<&ViewState> {
        self.state(Target::View(view))
    }

    pub fn spec(&self, view: ViewHandle) -> Option<&ViewSpec> {
        self.created.get(&view)
    }

    /// Views on the scrim, back to front.
    pub fn stacking(&self) -> impl Iterator<Item = ViewHandle> + '_ {
        self.z_order.iter().copied()
    }

    pub fn front_most(&self) -> Option<ViewHandle> {
        self.z_order.last().copied()
    }

    /// Number of fabricated views still alive.
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Hands back every animation started since the last call.
    pub fn take_finished(&mut self) -> Vec<AnimationId> {
        self.animations.drain(..).map(|a| a.id).collect()
    }

    pub fn is_gesture_enabled(&self, source: GestureSource) -> bool {
        self.gestures.contains(&source)
    }

    fn raise(&mut self, view: ViewHandle) {
        self.z_order.retain(|v| *v != view);
        self.z_order.push(view);
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(HandleAllocator::default())
    }
}

impl Surface for RecordingSurface {
    fn create_view(&mut self, spec: ViewSpec) -> View {
        let view = View::new(self.handles.next(), spec.size());
        log::trace!("create {} {:?}", view.handle, spec);
        self.created.insert(view.handle, spec);
        view
    }

    fn add(&mut self, view: ViewHandle, center: Point, alpha: f64) {
        log::debug!(
            "add {} at ({:.1}, {:.1}) alpha {:.2}",
            view,
            center.x,
            center.y,
            alpha
        );
        self.states.insert(
            Target::View(view),
            ViewState {
                center,
                alpha,
                ..ViewState::default()
            },
        );
        self.raise(view);
    }

    fn remove(&mut self, view: ViewHandle) {
        log::debug!("remove {}", view);
        let overlays: Vec<ViewHandle> = self
            .states
            .iter()
            .filter_map(|(target, state)| match target {
                Target::View(overlay) if state.host == Some(view) => Some(*overlay),
                _ => None,
            })
            .collect();

        for handle in overlays.into_iter().chain([view]) {
            self.states.remove(&Target::View(handle));
            self.created.remove(&handle);
        }
        self.z_order.retain(|v| *v != view);
    }

    fn attach_overlay(&mut self, overlay: ViewHandle, host: ViewHandle) {
        log::trace!("attach {} over {}", overlay, host);
        self.states.insert(
            Target::View(overlay),
            ViewState {
                host: Some(host),
                ..ViewState::default()
            },
        );
    }

    fn bring_to_front(&mut self, target: Target) {
        // scrim and indicator live outside the item stack
        if let Target::View(view) = target {
            self.raise(view);
        }
    }

    fn set(&mut self, change: Change) {
        match self.states.get_mut(&change.target) {
            Some(state) => state.apply(change.property),
            None => log::warn!("set on unknown target {:?}", change.target),
        }
    }

    fn animate(&mut self, animation: Animation) {
        log::debug!(
            "animate {} over {:.2}s ({} keyframes)",
            animation.id,
            animation.duration,
            animation.keyframes.len()
        );
        for change in animation.final_values() {
            self.set(change);
        }
        self.animations.push(animation);
    }

    fn enable_gesture(&mut self, source: GestureSource, enabled: bool) {
        log::debug!(
            "{} {:?} adapter",
            if enabled { "register" } else { "deregister" },
            source
        );
        if enabled {
            self.gestures.insert(source);
        } else {
            self.gestures.remove(&source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_across_clones() {
        let handles = HandleAllocator::default();
        let shared = handles.clone();
        let a = handles.next();
        let b = shared.next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_animation_jumps_to_final_values() {
        let mut surface = RecordingSurface::default();
        let view = surface.create_view(ViewSpec::Placeholder(Size::square(1.0)));
        surface.add(view.handle, Point::new(0.0, 0.0), 0.0);

        let animation = Animation::new(AnimationId::new(1), 0.3)
            .keyframe(0.0, 0.8, vec![Change::center(view.handle, Point::new(10.0, 0.0))])
            .keyframe(0.8, 0.2, vec![Change::center(view.handle, Point::new(8.0, 0.0))])
            .throughout(vec![Change::alpha(view.handle, 1.0)]);
        surface.animate(animation);

        let state = surface.view(view.handle).unwrap();
        assert_eq!(state.center, Point::new(8.0, 0.0));
        assert_eq!(state.alpha, 1.0);
        assert_eq!(surface.take_finished(), vec![AnimationId::new(1)]);
        assert!(surface.take_finished().is_empty());
    }

    #[test]
    fn test_remove_drops_overlays() {
        let mut surface = RecordingSurface::default();
        let host = surface.create_view(ViewSpec::Placeholder(Size::square(10.0)));
        let overlay = surface.create_view(ViewSpec::Overlay {
            size: Size::square(10.0),
            color: Srgba::new(0.0, 0.0, 0.0, 0.7),
        });
        surface.add(host.handle, Point::default(), 1.0);
        surface.attach_overlay(overlay.handle, host.handle);
        assert!(surface.view(overlay.handle).is_some());

        surface.remove(host.handle);
        assert!(surface.view(host.handle).is_none());
        assert!(surface.view(overlay.handle).is_none());
        assert!(surface.spec(host.handle).is_none());
        assert!(surface.spec(overlay.handle).is_none());
        assert_eq!(surface.stacking().count(), 0);
    }

    #[test]
    fn test_bring_to_front() {
        let mut surface = RecordingSurface::default();
        let a = surface.create_view(ViewSpec::Placeholder(Size::square(1.0)));
        let b = surface.create_view(ViewSpec::Placeholder(Size::square(1.0)));
        surface.add(a.handle, Point::default(), 1.0);
        surface.add(b.handle, Point::default(), 1.0);
        assert_eq!(surface.front_most(), Some(b.handle));

        surface.bring_to_front(Target::View(a.handle));
        assert_eq!(surface.stacking().collect::<Vec<_>>(), vec![b.handle, a.handle]);
    }
}
