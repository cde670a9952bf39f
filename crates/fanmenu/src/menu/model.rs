use super::delegate::{DataSource, MenuDelegate, Title, View};
use super::item::{ItemMetrics, MenuItem};
use super::layout::{Container, Layout};
use super::style::{LabelStyle, MenuColors};
use super::surface::{PillLabel, Surface, ViewSpec};
use super::timeline::{Animation, AnimationId, Change, Curve, Property, Ring, Target};
use super::{
    DISMISS_DURATION, HIGHLIGHT_DURATION, INDICATOR_SIZE, INDICATOR_STROKE_WIDTH,
    PRESENT_DURATION, PRESENT_OVERSHOOT_FRACTION, TITLE_LABEL_OVERSHOOT, TITLE_LABEL_PADDING,
    TITLE_OVERSHOOT_FRACTION,
};
use crate::config::{ActivationTrigger, LayoutConfig};
use crate::gesture::{GestureEvent, GesturePhase, GestureSource};
use log::{debug, info, trace};
use orbit::{Point, Size, angle_between, distance, point_on_circle};
use strum::{Display as StrumDisplay, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Dismissing,
}

/// Press-and-drag radial menu.
///
/// All visuals live on the [`Surface`]; the menu decides where they go and
/// when, and expects [`ContextualMenu::animation_finished`] once each
/// animation it started has run.
pub struct ContextualMenu<S: Surface> {
    surface: S,
    layout_config: LayoutConfig,
    label_style: LabelStyle,
    colors: MenuColors,
    trigger: ActivationTrigger,
    data_source: Option<Box<dyn DataSource>>,
    delegate: Option<Box<dyn MenuDelegate>>,
    container: Option<Container>,
    origin: Point,
    items: Vec<MenuItem>,
    layout: Option<Layout>,
    phase: Phase,
    // animation whose completion moves the phase forward
    transition: Option<AnimationId>,
    last_animation: AnimationId,
}

impl<S: Surface> ContextualMenu<S> {
    pub fn new(surface: S, layout_config: LayoutConfig, trigger: ActivationTrigger) -> Self {
        Self {
            surface,
            layout_config,
            label_style: LabelStyle::default(),
            colors: MenuColors::default(),
            trigger,
            data_source: None,
            delegate: None,
            container: None,
            origin: Point::default(),
            items: Vec::new(),
            layout: None,
            phase: Phase::Closed,
            transition: None,
            last_animation: AnimationId::new(0),
        }
    }

    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    pub fn with_colors(mut self, colors: MenuColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    pub fn trigger(&self) -> ActivationTrigger {
        self.trigger
    }

    pub fn container(&self) -> Option<Container> {
        self.container
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.is_highlighted)
    }

    pub fn set_data_source(&mut self, data_source: Box<dyn DataSource>) {
        self.data_source = Some(data_source);
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn MenuDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Takes effect from the next presentation.
    pub fn set_layout_config(&mut self, layout_config: LayoutConfig) {
        self.layout_config = layout_config;
    }

    pub fn set_label_style(&mut self, label_style: LabelStyle) {
        self.label_style = label_style;
    }

    pub fn attach(&mut self, container: Container) {
        debug!(
            "attached to {:.0}x{:.0} container",
            container.bounds.width(),
            container.bounds.height()
        );
        self.container = Some(container);
        self.surface
            .set(Change::new(Target::Scrim, Property::Frame(container.bounds)));
        self.surface
            .set(Change::new(Target::Scrim, Property::Fill(self.colors.scrim)));
        self.surface.set(Change::new(
            Target::Indicator,
            Property::Ring(Ring {
                diameter: INDICATOR_SIZE,
                stroke_width: INDICATOR_STROKE_WIDTH,
                color: self.colors.indicator_border,
            }),
        ));
        self.apply_trigger();
    }

    /// A presentation already running keeps its cached layout.
    pub fn detach(&mut self) {
        debug!("detached");
        self.container = None;
        for source in GestureSource::iter() {
            self.surface.enable_gesture(source, false);
        }
    }

    pub fn set_activation_trigger(&mut self, trigger: ActivationTrigger) {
        info!("activation trigger {} -> {}", self.trigger, trigger);
        self.trigger = trigger;
        self.apply_trigger();
    }

    fn apply_trigger(&mut self) {
        let active = self.trigger.source();
        for source in GestureSource::iter() {
            self.surface.enable_gesture(source, Some(source) == active);
        }
        self.surface.set(Change::new(
            Target::Indicator,
            Property::Hidden(!self.trigger.shows_indicator()),
        ));

        if self.trigger == ActivationTrigger::Immediate
            && let Some(container) = self.container
        {
            self.present(container.center());
        }
    }

    pub fn handle_gesture(&mut self, source: GestureSource, event: GestureEvent) {
        if self.trigger.source() != Some(source) {
            trace!("ignoring {} gesture while trigger is {}", source, self.trigger);
            return;
        }

        match event.phase {
            GesturePhase::Began => self.present(event.location),
            // taps only ever report their end
            _ if source == GestureSource::Tap => self.present(event.location),
            GesturePhase::Changed => self.handle_drag_update(event.location),
            GesturePhase::Ended | GesturePhase::Cancelled => self.handle_gesture_end(),
        }
    }

    /// Rebuilds the items from the data source. Only allowed while closed.
    pub fn reload(&mut self) {
        if self.phase != Phase::Closed {
            debug!("reload ignored while {}", self.phase);
            return;
        }
        self.rebuild_items();
    }

    fn rebuild_items(&mut self) {
        self.clear_items();

        let (Some(data_source), Some(delegate)) =
            (self.data_source.as_deref(), self.delegate.as_deref_mut())
        else {
            debug!("no data source or delegate, menu stays empty");
            return;
        };

        let count = data_source.item_count();
        self.items = (0..count)
            .map(|index| {
                build_item(
                    index,
                    delegate,
                    &mut self.surface,
                    &self.label_style,
                    &self.colors,
                )
            })
            .collect();

        for item in &self.items {
            for view in item.top_level_views() {
                self.surface.add(view, self.origin, 0.0);
            }
            self.surface
                .attach_overlay(item.highlighted.handle, item.content.handle);
            self.surface.set(Change::alpha(item.highlighted.handle, 0.0));
        }
        debug!("built {} items", self.items.len());
    }

    fn clear_items(&mut self) {
        for item in self.items.drain(..) {
            for view in item.top_level_views() {
                self.surface.remove(view);
            }
        }
    }

    pub fn present(&mut self, origin: Point) {
        if self.phase != Phase::Closed {
            debug!("present ignored while {}", self.phase);
            return;
        }
        let Some(container) = self.container else {
            debug!("present ignored, no container attached");
            return;
        };
        if !self
            .delegate
            .as_deref_mut()
            .is_none_or(|delegate| delegate.should_activate())
        {
            debug!("activation vetoed by delegate");
            return;
        }

        self.origin = origin;
        self.surface
            .set(Change::new(Target::Indicator, Property::Center(origin)));
        self.rebuild_items();
        if self.items.is_empty() {
            debug!("present ignored, no items");
            return;
        }

        let metrics: Vec<ItemMetrics> = self.items.iter().map(MenuItem::metrics).collect();
        let layout = Layout::new(origin, &self.layout_config, &metrics, container);
        self.surface.bring_to_front(Target::Scrim);

        let (overshoot, resting) = (layout.total_radius(), layout.center_radius());
        let mut outward = Vec::with_capacity(self.items.len() * 3);
        let mut settle = Vec::with_capacity(self.items.len() * 2);

        for item in &self.items {
            self.surface
                .set(Change::center(item.title.handle, title_anchor(item, origin)));

            let far = layout.center_for_item(item.index, overshoot);
            outward.push(Change::alpha(item.content.handle, 1.0));
            outward.push(Change::center(item.content.handle, far));
            outward.push(Change::center(item.title.handle, title_anchor(item, far)));

            let near = layout.center_for_item(item.index, resting);
            settle.push(Change::center(item.content.handle, near));
            settle.push(Change::center(item.title.handle, title_anchor(item, near)));
        }

        let animation = Animation::new(self.next_animation_id(), PRESENT_DURATION)
            .with_curve(Curve::Cubic)
            .throughout(vec![Change::new(Target::Scrim, Property::Alpha(1.0))])
            .keyframe(0.0, PRESENT_OVERSHOOT_FRACTION, outward)
            .keyframe(
                PRESENT_OVERSHOOT_FRACTION,
                1.0 - PRESENT_OVERSHOOT_FRACTION,
                settle,
            );

        info!(
            "presenting {} items at ({:.1}, {:.1})",
            self.items.len(),
            origin.x,
            origin.y
        );
        self.layout = Some(layout);
        self.phase = Phase::Opening;
        self.transition = Some(animation.id);
        self.surface.animate(animation);
    }

    pub fn handle_drag_update(&mut self, point: Point) {
        if self.phase != Phase::Open {
            trace!("drag ignored while {}", self.phase);
            return;
        }
        let Some(layout) = self.layout.as_ref() else {
            return;
        };

        let origin = layout.origin();
        let resting = layout.center_radius();
        let reach = distance(point, origin);
        let on_ring = point_on_circle(resting, angle_between(origin, point), origin);
        let indicator = if reach > resting { on_ring } else { point };

        let target = if reach.min(resting) < layout.dead_zone_radius() {
            None
        } else {
            match layout.nearest_item(on_ring) {
                Some((index, gap)) if gap <= self.items[index].content.size.height => Some(index),
                _ => None,
            }
        };

        match target {
            Some(index) => {
                let item = &self.items[index];
                for view in item.top_level_views() {
                    self.surface.bring_to_front(Target::View(view));
                }
                self.set_highlighted(index, true);
            }
            None => self.clear_highlight(),
        }

        self.surface
            .set(Change::new(Target::Indicator, Property::Center(indicator)));
    }

    /// At most one item is highlighted; highlighting one unhighlights the
    /// previous. Only has an effect while open.
    pub fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        if self.phase != Phase::Open || index >= self.items.len() {
            return;
        }

        if highlighted && let Some(previous) = self.highlighted_index().filter(|&p| p != index) {
            self.items[previous].is_highlighted = false;
            self.item_highlight_changed(previous);
        }

        if self.items[index].is_highlighted == highlighted {
            return;
        }
        self.items[index].is_highlighted = highlighted;
        self.item_highlight_changed(index);
    }

    pub fn clear_highlight(&mut self) {
        if let Some(index) = self.highlighted_index() {
            self.set_highlighted(index, false);
        }
    }

    fn item_highlight_changed(&mut self, index: usize) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let item = &self.items[index];
        let highlighted = item.is_highlighted;
        let (content, overlay, title) = (item.content, item.highlighted, item.title);

        let radius = if highlighted {
            layout.highlighted_radius()
        } else {
            layout.center_radius()
        };
        let center = layout.center_for_item(index, radius);
        let alpha = if highlighted { 1.0 } else { 0.0 };

        // highlighted labels float above the item, resting ones tuck under its top edge
        let (direction, padding, overshoot) = if highlighted {
            (-1.0, TITLE_LABEL_PADDING, TITLE_LABEL_OVERSHOOT)
        } else {
            (1.0, 0.0, 0.0)
        };
        let top = center.y - content.size.height / 2.0;
        let title_y = |extra: f64| direction * (title.size.height / 2.0 + padding + extra) + top;

        self.surface.bring_to_front(Target::View(title.handle));
        self.surface.set(Change::alpha(overlay.handle, 1.0 - alpha));

        let mut animation = Animation::new(self.next_animation_id(), HIGHLIGHT_DURATION)
            .from_current_state()
            .throughout(vec![
                Change::alpha(title.handle, alpha),
                Change::alpha(overlay.handle, alpha),
                Change::center(content.handle, center),
            ])
            .keyframe(
                0.0,
                TITLE_OVERSHOOT_FRACTION,
                vec![Change::center(title.handle, Point::new(center.x, title_y(overshoot)))],
            )
            .keyframe(
                TITLE_OVERSHOOT_FRACTION,
                1.0 - TITLE_OVERSHOOT_FRACTION,
                vec![Change::center(title.handle, Point::new(center.x, title_y(0.0)))],
            );
        if highlighted {
            animation = animation
                .keyframe(0.0, 0.2, vec![Change::scale(content.handle, 1.2)])
                .keyframe(0.2, 0.6, vec![Change::scale(content.handle, 0.8)])
                .keyframe(0.6, 0.4, vec![Change::scale(content.handle, 1.0)]);
        }
        self.surface.animate(animation);

        trace!(
            "item {} {}",
            index,
            if highlighted { "highlighted" } else { "unhighlighted" }
        );
        if let Some(delegate) = self.delegate.as_deref_mut() {
            if highlighted {
                delegate.did_highlight(index);
            } else {
                delegate.did_unhighlight(index);
            }
        }
    }

    /// Selects the highlighted item, or dismisses when nothing is highlighted.
    pub fn handle_gesture_end(&mut self) {
        match self.highlighted_index() {
            Some(index) => self.select(index),
            None => self.dismiss(),
        }
    }

    /// Tapping an item.
    pub fn select(&mut self, index: usize) {
        if !self.is_presented() || index >= self.items.len() {
            debug!("select {} ignored while {}", index, self.phase);
            return;
        }
        info!("item {} selected", index);
        if let Some(delegate) = self.delegate.as_deref_mut() {
            delegate.did_select(index);
        }
        self.dismiss();
    }

    /// Tapping the scrim.
    pub fn scrim_tapped(&mut self) {
        self.dismiss();
    }

    pub fn dismiss(&mut self) {
        if !self.is_presented() {
            trace!("dismiss ignored while {}", self.phase);
            return;
        }
        if !self
            .delegate
            .as_deref_mut()
            .is_none_or(|delegate| delegate.should_dismiss())
        {
            debug!("dismissal vetoed by delegate");
            return;
        }

        let origin = self.origin;
        let mut changes = vec![Change::new(Target::Scrim, Property::Alpha(0.0))];
        for view in self.items.iter().flat_map(MenuItem::top_level_views) {
            changes.push(Change::center(view, origin));
            changes.push(Change::alpha(view, 0.0));
        }

        let animation = Animation::new(self.next_animation_id(), DISMISS_DURATION).throughout(changes);
        debug!("dismissing");
        self.phase = Phase::Dismissing;
        self.transition = Some(animation.id);
        self.surface.animate(animation);
    }

    /// Called by the host when an animation has run to completion.
    pub fn animation_finished(&mut self, id: AnimationId) {
        if self.transition.take_if(|pending| *pending == id).is_none() {
            trace!("{} finished", id);
            return;
        }

        match self.phase {
            Phase::Opening => {
                self.phase = Phase::Open;
                info!("menu open");
                if let Some(delegate) = self.delegate.as_deref_mut() {
                    delegate.did_activate();
                }
            }
            Phase::Dismissing => {
                self.clear_items();
                self.layout = None;
                self.phase = Phase::Closed;
                info!("menu closed");
                if let Some(delegate) = self.delegate.as_deref_mut() {
                    delegate.did_dismiss();
                }
            }
            Phase::Closed | Phase::Open => {}
        }
    }

    fn is_presented(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Open)
    }

    fn next_animation_id(&mut self) -> AnimationId {
        self.last_animation = self.last_animation.next();
        self.last_animation
    }
}

/// Label position when its item is centered at `center`: tucked under the
/// item's top edge.
fn title_anchor(item: &MenuItem, center: Point) -> Point {
    Point::new(
        center.x,
        center.y - item.content.size.height / 2.0 + item.title.size.height / 2.0,
    )
}

fn build_item<S: Surface>(
    index: usize,
    delegate: &mut dyn MenuDelegate,
    surface: &mut S,
    style: &LabelStyle,
    colors: &MenuColors,
) -> MenuItem {
    let content = delegate.content_view(index);

    let highlighted = match delegate.highlighted_view(index) {
        Some(view) => view,
        None => surface.create_view(ViewSpec::Overlay {
            size: content.size,
            color: colors.highlight_overlay,
        }),
    };

    let title = match delegate.title_view(index) {
        Some(view) => view,
        None => generated_title(delegate.title(index), surface, style),
    };

    MenuItem::new(index, content, highlighted, title)
}

fn generated_title<S: Surface>(title: Option<Title>, surface: &mut S, style: &LabelStyle) -> View {
    match title.filter(|text| !text.is_empty()) {
        Some(text) => {
            let size = style.pill_size(surface.measure_text(&text, style));
            surface.create_view(ViewSpec::Label(PillLabel {
                text,
                style: style.clone(),
                size,
                corner_radius: size.height / 2.0,
            }))
        }
        None => surface.create_view(ViewSpec::Placeholder(Size::square(1.0))),
    }
}
