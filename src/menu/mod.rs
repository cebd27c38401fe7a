//! Native menu container contracts.
//!
//! [`MenuHost`] is the seam between the reconciler and the platform: a
//! real backend adapts its widget toolkit behind this trait, while
//! [`MemoryMenu`] provides a headless reference implementation.

pub mod arena;
pub mod memory;

pub use arena::{HandleArena, ItemHandle};
pub use memory::{MemoryMenu, MenuEntry};

use std::sync::Arc;

use crate::graphics::Color;
use crate::icon::Drawable;

/// How an item asks to be displayed on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowAsAction {
    /// Collapse into the overflow menu when space runs out.
    #[default]
    IfRoom,
    /// Always visible on the toolbar.
    Always,
}

/// A rendered menu title.
///
/// Styled titles carry their own foreground color, the way spannable
/// strings do on platforms that support them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    Plain(String),
    Styled { text: String, color: Color },
}

impl Title {
    /// An empty plain title. Items never render a null label.
    pub fn empty() -> Self {
        Title::Plain(String::new())
    }

    pub fn text(&self) -> &str {
        match self {
            Title::Plain(text) => text,
            Title::Styled { text, .. } => text,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Title::Plain(_) => None,
            Title::Styled { color, .. } => Some(*color),
        }
    }
}

/// Callback bound to a native item's click.
pub type ClickAction = Arc<dyn Fn() + Send + Sync>;

/// Contract the platform menu container fulfils.
///
/// Items iterate in insertion order. Every mutator takes a handle and
/// must be a silent no-op when the handle is no longer alive: staleness
/// is an expected race, not an error.
pub trait MenuHost: Send + Sync {
    /// Remove every item, invalidating all outstanding handles.
    fn clear(&self);

    /// Append an item with the given title, returning its handle.
    fn add(&self, title: Title) -> ItemHandle;

    /// Whether the handle still refers to an attached entry.
    fn is_alive(&self, handle: ItemHandle) -> bool;

    /// Number of items currently attached.
    fn item_count(&self) -> usize;

    fn set_title(&self, handle: ItemHandle, title: Title);

    fn set_enabled(&self, handle: ItemHandle, enabled: bool);

    /// Label for assistive technology.
    fn set_accessible_label(&self, handle: ItemHandle, label: &str);

    fn set_icon(&self, handle: ItemHandle, icon: Drawable);

    fn set_show_as_action(&self, handle: ItemHandle, mode: ShowAsAction);

    /// Bind the click callback, replacing any previous binding.
    fn set_click(&self, handle: ItemHandle, action: ClickAction);

    /// Recolor the rendered title text directly.
    ///
    /// Only used for hosts whose action bar ignores colors carried by
    /// styled titles.
    fn set_text_color(&self, handle: ItemHandle, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_accessors() {
        let plain = Title::Plain("Save".into());
        assert_eq!(plain.text(), "Save");
        assert_eq!(plain.color(), None);

        let styled = Title::Styled {
            text: "Save".into(),
            color: Color::WHITE,
        };
        assert_eq!(styled.text(), "Save");
        assert_eq!(styled.color(), Some(Color::WHITE));

        assert_eq!(Title::empty().text(), "");
    }
}
