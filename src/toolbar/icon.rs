//! Icon application with tint and disabled-state opacity.

use std::sync::Arc;

use tracing::trace;

use crate::dispatch::Dispatcher;
use crate::graphics::Color;
use crate::icon::{Drawable, IconResolver};
use crate::item::ToolbarItem;
use crate::menu::{ItemHandle, MenuHost};
use crate::toolbar::sync::DISABLED_ICON_ALPHA;

/// Strategy for applying a descriptor's icon to a native item.
///
/// The default implementation resolves asynchronously; embedders inject
/// their own to source icons differently (sprite sheets, system symbols).
pub trait IconUpdater: Send + Sync {
    fn update_icon(
        &self,
        menu: &Arc<dyn MenuHost>,
        handle: ItemHandle,
        item: &Arc<ToolbarItem>,
        tint: Option<Color>,
    );
}

/// Default updater: resolve, re-marshal, re-validate, tint, apply.
pub struct TintedIconUpdater {
    resolver: Arc<dyn IconResolver>,
    dispatcher: Arc<dyn Dispatcher>,
    disabled_alpha: u8,
}

impl TintedIconUpdater {
    pub fn new(resolver: Arc<dyn IconResolver>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            resolver,
            dispatcher,
            disabled_alpha: DISABLED_ICON_ALPHA,
        }
    }

    /// Override the alpha applied to disabled items' icons.
    pub fn with_disabled_alpha(mut self, alpha: u8) -> Self {
        self.disabled_alpha = alpha;
        self
    }
}

impl IconUpdater for TintedIconUpdater {
    fn update_icon(
        &self,
        menu: &Arc<dyn MenuHost>,
        handle: ItemHandle,
        item: &Arc<ToolbarItem>,
        tint: Option<Color>,
    ) {
        let Some(source) = item.icon() else {
            return;
        };

        let menu = Arc::clone(menu);
        let item = Arc::clone(item);
        let dispatcher = Arc::clone(&self.dispatcher);
        let disabled_alpha = self.disabled_alpha;

        self.resolver.load(
            &source,
            Box::new(move |loaded| {
                dispatcher.dispatch(Box::new(move || {
                    // The menu may have been rebuilt while the load was in
                    // flight; a stale handle means the result is dropped.
                    if !menu.is_alive(handle) {
                        trace!(?handle, "icon resolved for a stale menu item; dropped");
                        return;
                    }

                    let Some(image) = loaded else {
                        return;
                    };

                    // Fresh drawable per item; the cached template is shared
                    // and must stay untouched.
                    let mut drawable = Drawable::from_template(&image);
                    if let Some(tint) = tint {
                        drawable.set_color_filter(tint);
                    }
                    if !item.is_enabled() {
                        drawable.set_alpha(disabled_alpha);
                    }
                    menu.set_icon(handle, drawable);
                }));
            }),
        );
    }
}
