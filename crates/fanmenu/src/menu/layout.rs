//! Item placement around the activation point.
//!
//! Items sit on a circle around the origin. The whole ring is rotated by a
//! single angle offset so the item nearest a container edge keeps its label
//! inside the container.

use super::item::ItemMetrics;
use super::{INDICATOR_SIZE, MIN_ARC_SLOTS, SCREEN_EDGE_MARGIN, TITLE_LABEL_PADDING};
use crate::config::{LayoutConfig, MenuShape};
use orbit::{
    Insets, Point, Rect, Size, angle_between, distance, missing_triangle_leg, normalize_degrees,
    point_on_circle,
};

/// The area the menu is presented in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Container {
    pub bounds: Rect,
    pub safe_insets: Insets,
}

impl Container {
    pub fn new(bounds: Rect, safe_insets: Insets) -> Self {
        Self {
            bounds,
            safe_insets,
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Highest y an item's label may reach.
    pub fn top_boundary(&self) -> f64 {
        self.bounds.min_y() + self.safe_insets.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Which container edges the menu is close to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenEdge {
    pub side: Side,
    pub top: bool,
}

/// Immutable placement for one presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    origin: Point,
    shape: MenuShape,
    item_count: usize,
    item_padding: f64,
    highlight_offset: f64,
    largest_item_side: f64,
    largest_title: Size,
    first_title: Size,
    last_title: Size,
    container: Container,
    angle_offset: f64,
}

impl Layout {
    pub fn new(
        origin: Point,
        config: &LayoutConfig,
        items: &[ItemMetrics],
        container: Container,
    ) -> Self {
        let largest_item_side = items
            .iter()
            .map(|m| m.item.largest_side())
            .fold(0.0, f64::max);
        let largest_title = items.iter().fold(Size::ZERO, |acc, m| acc.union(m.title));

        let mut layout = Self {
            origin,
            shape: config.shape,
            item_count: items.len(),
            item_padding: config.item_padding,
            highlight_offset: config.effective_highlight_offset(),
            largest_item_side,
            largest_title,
            first_title: items.first().map(|m| m.title).unwrap_or_default(),
            last_title: items.last().map(|m| m.title).unwrap_or_default(),
            container,
            angle_offset: 0.0,
        };
        layout.angle_offset = layout.edge_avoidance_offset();
        layout
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn highlight_offset(&self) -> f64 {
        self.highlight_offset
    }

    /// Denominator for angular spacing. Arcs never spread fewer than eight slots.
    pub fn slot_count(&self) -> usize {
        match self.shape {
            MenuShape::Arc => self.item_count.max(MIN_ARC_SLOTS),
            MenuShape::Circle => self.item_count,
        }
    }

    pub fn angle_increment(&self) -> f64 {
        match self.slot_count() {
            0 => 0.0,
            slots => 360.0 / slots as f64,
        }
    }

    /// Un-rotated angle of `index`; item 0 sits one increment before the top.
    pub fn starting_angle(&self, index: usize) -> f64 {
        let increment = self.angle_increment();
        -increment + index as f64 * increment
    }

    /// [`Layout::starting_angle`] wrapped into `[0, 360)`.
    pub fn nominal_angle(&self, index: usize) -> f64 {
        normalize_degrees(self.starting_angle(index))
    }

    pub fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    /// Overshoot distance reached during the opening animation.
    pub fn total_radius(&self) -> f64 {
        INDICATOR_SIZE / 2.0 + self.item_padding + self.largest_item_side
    }

    /// Resting distance of item centers once fully open.
    pub fn center_radius(&self) -> f64 {
        self.total_radius() - self.largest_item_side / 2.0
    }

    pub fn highlighted_radius(&self) -> f64 {
        self.center_radius() + self.highlight_offset
    }

    /// Touches closer to the origin than this highlight nothing.
    pub fn dead_zone_radius(&self) -> f64 {
        self.center_radius() - self.item_padding
    }

    pub fn center_for_item(&self, index: usize, radius: f64) -> Point {
        point_on_circle(
            radius,
            self.starting_angle(index) + self.angle_offset,
            self.origin,
        )
    }

    pub fn screen_edge(&self) -> ScreenEdge {
        let side = if self.origin.x < self.container.bounds.mid_x() {
            Side::Left
        } else {
            Side::Right
        };
        let highest_label_y = self.origin.y
            - self.total_radius()
            - self.highlight_offset
            - TITLE_LABEL_PADDING
            - self.largest_title.height;

        ScreenEdge {
            side,
            top: highest_label_y < self.container.top_boundary(),
        }
    }

    /// Item whose resting center is nearest `point`, with that distance.
    /// Ties go to the lowest index.
    pub fn nearest_item(&self, point: Point) -> Option<(usize, f64)> {
        let radius = self.center_radius();
        (0..self.item_count)
            .map(|i| (i, distance(self.center_for_item(i, radius), point)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    fn edge_avoidance_offset(&self) -> f64 {
        if self.item_count == 0 {
            return 0.0;
        }

        // a highlighted item reaches furthest, so solve on that circle
        let radius = self.highlighted_radius();
        let edge = self.screen_edge();
        let bounds = self.container.bounds;

        let (boundary_angle, closest_title) = match edge.side {
            Side::Left => (self.starting_angle(0) + 360.0, self.first_title),
            Side::Right => (self.starting_angle(self.item_count - 1), self.last_title),
        };
        let unrotated = point_on_circle(radius, boundary_angle, self.origin);
        let half_footprint = closest_title.width.max(self.largest_item_side) / 2.0;

        let crosses_side = match edge.side {
            Side::Left => unrotated.x - half_footprint < bounds.min_x() + SCREEN_EDGE_MARGIN,
            Side::Right => unrotated.x + half_footprint > bounds.max_x() - SCREEN_EDGE_MARGIN,
        };

        let mut offset = 0.0;

        if crosses_side {
            let target_x = match edge.side {
                Side::Left => bounds.min_x() + SCREEN_EDGE_MARGIN + half_footprint,
                Side::Right => bounds.max_x() - SCREEN_EDGE_MARGIN - half_footprint,
            };
            let rise = missing_triangle_leg(radius, target_x - self.origin.x);
            let target = Point::new(target_x, self.origin.y - rise);
            offset = angle_between(self.origin, target) - boundary_angle;
        }

        // top wins over the side correction when both apply
        if edge.top {
            let mirror = match edge.side {
                Side::Left => 1.0,
                Side::Right => -1.0,
            };
            let target_y = (bounds.min_y() + SCREEN_EDGE_MARGIN).max(self.container.top_boundary())
                + closest_title.height
                + TITLE_LABEL_PADDING
                + self.largest_item_side / 2.0;
            let run = missing_triangle_leg(radius, self.origin.y - target_y) * mirror;
            let target = Point::new(self.origin.x + run, target_y);
            offset = angle_between(self.origin, target) - boundary_angle;
        }

        offset
    }
}
