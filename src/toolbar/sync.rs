//! Menu reconciliation.
//!
//! Keeps a native menu's visible items, in order, equal to an ordered
//! sequence of [`ToolbarItem`]s, and keeps exactly one change-notification
//! subscription active per represented item. Handles full rebuilds,
//! targeted in-place updates, and self-healing when the tracked state has
//! drifted from the menu (a stale handle falls back to a full rebuild).

use std::sync::Arc;

use tracing::debug;

use crate::graphics::Color;
use crate::item::{ChangeHandler, ItemProperty, Placement, ToolbarItem};
use crate::menu::{ItemHandle, MenuHost, ShowAsAction, Title};
use crate::toolbar::icon::IconUpdater;

/// Icon alpha applied to disabled items.
pub const DISABLED_ICON_ALPHA: u8 = 127;

/// Opacity factor applied to tinted title text of disabled items.
pub const DISABLED_TEXT_OPACITY: f32 = 0.302;

/// Capabilities of the host's title renderer.
#[derive(Debug, Clone, Copy)]
pub struct HostCapabilities {
    /// Whether the action bar honors colors carried by styled titles.
    /// Hosts that do not get their item text recolored directly.
    pub styled_title_tint: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            styled_title_tint: true,
        }
    }
}

/// Reconciles a native menu against an ordered item sequence.
///
/// The tracked handle list and item list are always the same length and
/// positionally aligned: index `i` of one corresponds to index `i` of the
/// other.
pub struct MenuSynchronizer {
    menu: Arc<dyn MenuHost>,
    icon_updater: Arc<dyn IconUpdater>,
    capabilities: HostCapabilities,
    disabled_text_opacity: f32,
    handles: Vec<ItemHandle>,
    items: Vec<Arc<ToolbarItem>>,
}

impl MenuSynchronizer {
    pub fn new(menu: Arc<dyn MenuHost>, icon_updater: Arc<dyn IconUpdater>) -> Self {
        Self {
            menu,
            icon_updater,
            capabilities: HostCapabilities::default(),
            disabled_text_opacity: DISABLED_TEXT_OPACITY,
            handles: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_disabled_text_opacity(mut self, opacity: f32) -> Self {
        self.disabled_text_opacity = opacity;
        self
    }

    /// Items currently represented, positionally aligned with the menu.
    pub fn tracked_items(&self) -> &[Arc<ToolbarItem>] {
        &self.items
    }

    /// Handles currently tracked, positionally aligned with the items.
    pub fn tracked_handles(&self) -> &[ItemHandle] {
        &self.handles
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Drop every subscription held against `items`.
    ///
    /// Idempotent. Must run before an item sequence is discarded, or the
    /// subscriber keeps receiving stale callbacks.
    pub fn dispose_items(items: &[Arc<ToolbarItem>], handler: &ChangeHandler) {
        for item in items {
            item.unsubscribe(handler);
        }
    }

    /// Rebuild the menu from scratch to match `items`.
    ///
    /// Clears the menu (invalidating all outstanding handles), drops the
    /// previous subscriptions, then creates one native item per descriptor
    /// in order. Afterwards the tracked lists mirror `items` exactly.
    pub fn update_items(
        &mut self,
        items: &[Arc<ToolbarItem>],
        tint: Option<Color>,
        handler: &ChangeHandler,
    ) {
        debug!(count = items.len(), "rebuilding menu items");

        self.menu.clear();

        let previous = std::mem::take(&mut self.items);
        for item in &previous {
            item.unsubscribe(handler);
        }
        self.handles.clear();

        for item in items {
            self.update_item(None, item, tint, handler);
        }
    }

    /// Create (`index` absent) or patch in place (`index` present) a
    /// single menu entry for `item`.
    ///
    /// The update mode never resizes the tracked lists. A target whose
    /// handle is no longer alive aborts without mutating anything; the
    /// caller is expected to fall back to [`update_items`].
    ///
    /// [`update_items`]: MenuSynchronizer::update_items
    pub fn update_item(
        &mut self,
        index: Option<usize>,
        item: &Arc<ToolbarItem>,
        tint: Option<Color>,
        handler: &ChangeHandler,
    ) {
        // Re-subscribing is dedup'd, so a reused item instance ends up with
        // exactly one subscription.
        item.subscribe(handler);

        let title = self.render_title(item, tint);

        let handle = match index {
            None => {
                let handle = self.menu.add(title);
                self.handles.push(handle);
                self.items.push(Arc::clone(item));
                handle
            }
            Some(index) => {
                let Some(&handle) = self.handles.get(index) else {
                    return;
                };
                if !self.menu.is_alive(handle) {
                    debug!(index, "menu item no longer alive; skipping in-place update");
                    return;
                }
                self.menu.set_title(handle, title);
                handle
            }
        };

        self.menu.set_enabled(handle, item.is_enabled());
        self.menu
            .set_accessible_label(handle, &item.accessible_label());

        self.icon_updater.update_icon(&self.menu, handle, item, tint);

        if item.placement() == Placement::Primary {
            self.menu.set_show_as_action(handle, ShowAsAction::Always);
        }

        let target = Arc::clone(item);
        self.menu.set_click(handle, Arc::new(move || target.activate()));

        // Hosts whose action bar ignores styled-title colors need the
        // rendered text recolored directly.
        if item.placement() == Placement::Primary && !self.capabilities.styled_title_tint {
            if let Some(tint) = tint {
                self.menu.set_text_color(handle, self.text_color(item, tint));
            }
        }
    }

    /// React to an item's property-change notification.
    ///
    /// Only text, icon, and enabled changes touch the menu. A position
    /// outside the tracked lists (the collection shrank or reordered since
    /// the last sync) is ignored; a dead handle triggers a full rebuild.
    pub fn on_item_changed(
        &mut self,
        changed: &ToolbarItem,
        property: ItemProperty,
        all_items: &[Arc<ToolbarItem>],
        tint: Option<Color>,
        handler: &ChangeHandler,
    ) {
        if !matches!(
            property,
            ItemProperty::Text | ItemProperty::Icon | ItemProperty::Enabled
        ) {
            return;
        }

        // Locate the changed item by identity.
        let Some(index) = all_items
            .iter()
            .position(|item| std::ptr::eq(Arc::as_ptr(item), changed))
        else {
            return;
        };

        if index >= self.handles.len() {
            return;
        }

        if self.menu.is_alive(self.handles[index]) {
            let item = Arc::clone(&all_items[index]);
            self.update_item(Some(index), &item, tint, handler);
        } else {
            debug!(index, "tracked handle dead; resynchronizing whole menu");
            self.update_items(all_items, tint, handler);
        }
    }

    /// Forget all tracked state, dropping the subscriptions it held.
    pub fn reset(&mut self, handler: &ChangeHandler) {
        for item in &self.items {
            item.unsubscribe(handler);
        }
        self.items.clear();
        self.handles.clear();
    }

    /// Resolve the title for `item`.
    ///
    /// Non-blank text on a primary item with a tint renders as a styled
    /// title carrying the tint (dimmed when disabled); otherwise plain.
    /// Blank text renders as an empty label, never null.
    fn render_title(&self, item: &Arc<ToolbarItem>, tint: Option<Color>) -> Title {
        let text = item.text();
        if text.trim().is_empty() {
            return Title::empty();
        }

        match tint {
            Some(tint) if item.placement() == Placement::Primary => Title::Styled {
                text,
                color: self.text_color(item, tint),
            },
            _ => Title::Plain(text),
        }
    }

    fn text_color(&self, item: &ToolbarItem, tint: Color) -> Color {
        if item.is_enabled() {
            tint
        } else {
            tint.multiply_alpha(self.disabled_text_opacity)
        }
    }
}
