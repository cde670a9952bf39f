pub mod delegate;
pub mod item;
pub mod layout;
pub mod model;
pub mod style;
pub mod surface;
pub mod timeline;

pub use delegate::{DataSource, MenuDelegate, Title, View, ViewHandle};
pub use item::{ItemMetrics, MenuItem};
pub use layout::{Container, Layout, ScreenEdge, Side};
pub use model::{ContextualMenu, Phase};
pub use style::{LabelStyle, MenuColors};
pub use surface::{PillLabel, RecordingSurface, Surface, ViewSpec};
pub use timeline::{Animation, AnimationId, Change, Curve, Keyframe, Property, Ring, Target};

pub const INDICATOR_SIZE: f64 = 50.0; // touch indicator ring diameter
pub const INDICATOR_STROKE_WIDTH: f64 = 4.0;
pub const MIN_ARC_SLOTS: usize = 8;
pub const SCREEN_EDGE_MARGIN: f64 = 10.0; // keep labels this far from container edges
pub const TITLE_LABEL_PADDING: f64 = 2.5; // gap between an item and its label
pub const TITLE_LABEL_INSET: f64 = 5.0; // top/bottom padding inside a generated label
pub const TITLE_LABEL_OVERSHOOT: f64 = 7.0;
pub const DEFAULT_ITEM_PADDING: f64 = 30.0;
pub const DEFAULT_HIGHLIGHT_OFFSET: f64 = 25.0;
pub const DEFAULT_ITEM_SIZE: f64 = 50.0;

// Animation timing, in seconds and fractions of the animation
pub const PRESENT_DURATION: f64 = 0.3;
pub const PRESENT_OVERSHOOT_FRACTION: f64 = 0.8;
pub const DISMISS_DURATION: f64 = 0.3;
pub const HIGHLIGHT_DURATION: f64 = 0.2;
pub const TITLE_OVERSHOOT_FRACTION: f64 = 0.7;
