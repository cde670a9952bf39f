use derive_more::{AsRef, Deref, Display, From, Into};
use orbit::Size;

/// Opaque reference to a visual owned by the rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("view#{_0}")]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub handle: ViewHandle,
    pub size: Size,
}

impl View {
    pub fn new(handle: ViewHandle, size: Size) -> Self {
        Self { handle, size }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Title(String);

orbit::impl_string_newtype!(Title);

pub trait DataSource {
    fn item_count(&self) -> usize;
}

/// Content and lifecycle hooks for a [`crate::ContextualMenu`].
///
/// Only `content_view` is required. Permission gates default to allowing,
/// notifications default to doing nothing.
pub trait MenuDelegate {
    fn content_view(&mut self, index: usize) -> View;

    /// Overlay shown on top of the content while highlighted.
    fn highlighted_view(&mut self, _index: usize) -> Option<View> {
        None
    }

    /// Custom label view. Takes precedence over [`MenuDelegate::title`].
    fn title_view(&mut self, _index: usize) -> Option<View> {
        None
    }

    /// Text for a generated pill label.
    fn title(&mut self, _index: usize) -> Option<Title> {
        None
    }

    fn should_activate(&mut self) -> bool {
        true
    }

    fn should_dismiss(&mut self) -> bool {
        true
    }

    fn did_activate(&mut self) {}

    fn did_dismiss(&mut self) {}

    fn did_select(&mut self, _index: usize) {}

    fn did_highlight(&mut self, _index: usize) {}

    fn did_unhighlight(&mut self, _index: usize) {}
}
