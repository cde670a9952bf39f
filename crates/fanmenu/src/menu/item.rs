use super::delegate::{View, ViewHandle};
use orbit::Size;

/// Footprint of one item and its label, all the layout engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemMetrics {
    pub item: Size,
    pub title: Size,
}

impl ItemMetrics {
    pub fn new(item: Size, title: Size) -> Self {
        Self { item, title }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub index: usize,
    pub content: View,
    pub highlighted: View,
    pub title: View,
    pub is_highlighted: bool,
}

impl MenuItem {
    pub fn new(index: usize, content: View, highlighted: View, title: View) -> Self {
        Self {
            index,
            content,
            highlighted,
            title,
            is_highlighted: false,
        }
    }

    pub fn metrics(&self) -> ItemMetrics {
        ItemMetrics::new(self.content.size, self.title.size)
    }

    /// Views placed directly on the scrim; the overlay rides on the content.
    pub fn top_level_views(&self) -> [ViewHandle; 2] {
        [self.content.handle, self.title.handle]
    }
}
