//! Toolbar binding: wires items, change handler, and synchronizer.
//!
//! [`ToolbarHandler`] owns the one [`ChangeHandler`] subscribed to every
//! bound item, so property changes made by the view-model layer flow into
//! the reconciler without the embedder doing any plumbing.

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::config::BindingConfig;
use crate::dispatch::Dispatcher;
use crate::graphics::Color;
use crate::icon::IconResolver;
use crate::item::{ChangeHandler, ItemProperty, ToolbarItem};
use crate::menu::MenuHost;
use crate::toolbar::icon::{IconUpdater, TintedIconUpdater};
use crate::toolbar::sync::{HostCapabilities, MenuSynchronizer};

/// Binds a native menu to a declarative toolbar-item collection.
pub struct ToolbarHandler {
    sync: Mutex<MenuSynchronizer>,
    items: Mutex<Vec<Arc<ToolbarItem>>>,
    tint: Mutex<Option<Color>>,
    handler: ChangeHandler,
}

impl ToolbarHandler {
    /// Bind a menu host using the default asynchronous icon pipeline.
    pub fn bind(
        menu: Arc<dyn MenuHost>,
        resolver: Arc<dyn IconResolver>,
        dispatcher: Arc<dyn Dispatcher>,
        config: &BindingConfig,
    ) -> Arc<Self> {
        let updater = TintedIconUpdater::new(resolver, dispatcher)
            .with_disabled_alpha(config.toolbar.disabled_icon_alpha);
        Self::bind_with_updater(menu, Arc::new(updater), config)
    }

    /// Bind a menu host with a custom icon-update strategy.
    pub fn bind_with_updater(
        menu: Arc<dyn MenuHost>,
        icon_updater: Arc<dyn IconUpdater>,
        config: &BindingConfig,
    ) -> Arc<Self> {
        let sync = MenuSynchronizer::new(menu, icon_updater)
            .with_capabilities(HostCapabilities {
                styled_title_tint: config.host.styled_title_tint,
            })
            .with_disabled_text_opacity(config.toolbar.disabled_text_opacity);

        Arc::new_cyclic(|weak: &std::sync::Weak<ToolbarHandler>| {
            let weak = weak.clone();
            let handler = ChangeHandler::new(move |item, property| {
                if let Some(bound) = weak.upgrade() {
                    bound.on_item_changed(item, property);
                }
            });

            Self {
                sync: Mutex::new(sync),
                items: Mutex::new(Vec::new()),
                tint: Mutex::new(None),
                handler,
            }
        })
    }

    /// Replace the bound item collection, rebuilding the menu.
    pub fn set_items(&self, items: Vec<Arc<ToolbarItem>>) {
        info!(count = items.len(), "binding toolbar items");
        let tint = *self.tint.lock().unwrap();
        self.sync
            .lock()
            .unwrap()
            .update_items(&items, tint, &self.handler);
        *self.items.lock().unwrap() = items;
    }

    /// Change the toolbar tint and re-render the bound items.
    pub fn set_tint(&self, tint: Option<Color>) {
        *self.tint.lock().unwrap() = tint;
        let items = self.items.lock().unwrap().clone();
        if !items.is_empty() {
            self.sync
                .lock()
                .unwrap()
                .update_items(&items, tint, &self.handler);
        }
    }

    pub fn tint(&self) -> Option<Color> {
        *self.tint.lock().unwrap()
    }

    /// Number of items currently bound.
    pub fn item_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Unhook every subscription and forget the bound items.
    ///
    /// Call before discarding the binding; afterwards item mutations no
    /// longer touch the menu.
    pub fn disconnect(&self) {
        let items = std::mem::take(&mut *self.items.lock().unwrap());
        MenuSynchronizer::dispose_items(&items, &self.handler);
        self.sync.lock().unwrap().reset(&self.handler);
        info!("toolbar binding disconnected");
    }

    fn on_item_changed(&self, item: &ToolbarItem, property: ItemProperty) {
        let all = self.items.lock().unwrap().clone();
        let tint = *self.tint.lock().unwrap();
        self.sync
            .lock()
            .unwrap()
            .on_item_changed(item, property, &all, tint, &self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::InlineDispatcher;
    use crate::icon::test_support::test_image;
    use crate::icon::{IconSource, MemoryIconResolver};
    use crate::item::Placement;
    use crate::menu::MemoryMenu;

    fn init_logging() {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }

    fn bound_fixture() -> (Arc<MemoryMenu>, Arc<ToolbarHandler>) {
        init_logging();

        let menu = Arc::new(MemoryMenu::new());
        let resolver = MemoryIconResolver::new();
        resolver.insert("save", test_image());

        let handler = ToolbarHandler::bind(
            menu.clone(),
            Arc::new(resolver),
            Arc::new(InlineDispatcher),
            &BindingConfig::default(),
        );
        (menu, handler)
    }

    #[test]
    fn test_set_items_populates_menu() {
        let (menu, binding) = bound_fixture();

        let save = ToolbarItem::new("Save");
        save.set_icon(Some(IconSource::Named("save".into())));
        binding.set_items(vec![save, ToolbarItem::new("Delete")]);

        assert_eq!(menu.titles(), vec!["Save", "Delete"]);
        assert_eq!(binding.item_count(), 2);
    }

    #[test]
    fn test_item_mutation_flows_into_menu() {
        let (menu, binding) = bound_fixture();

        let save = ToolbarItem::new("Save");
        binding.set_items(vec![Arc::clone(&save)]);

        save.set_text("Save All");
        assert_eq!(menu.titles(), vec!["Save All"]);

        save.set_enabled(false);
        let handle = menu.handles()[0];
        assert!(!menu.entry(handle, |e| e.enabled).unwrap());
    }

    #[test]
    fn test_ignored_property_does_not_touch_menu() {
        let (menu, binding) = bound_fixture();

        let save = ToolbarItem::new("Save");
        binding.set_items(vec![Arc::clone(&save)]);
        let before = menu.mutation_count();

        save.set_placement(Placement::Secondary);
        save.set_description(Some("Save the document".into()));

        assert_eq!(menu.mutation_count(), before);
    }

    #[test]
    fn test_set_tint_rerenders() {
        let (menu, binding) = bound_fixture();
        let save = ToolbarItem::new("Save");
        binding.set_items(vec![save]);

        let tint = Color::rgb(0, 120, 215);
        binding.set_tint(Some(tint));

        assert_eq!(binding.tint(), Some(tint));
        let handle = menu.handles()[0];
        let title = menu.entry(handle, |e| e.title.clone()).unwrap();
        assert_eq!(title.color(), Some(tint));
    }

    #[test]
    fn test_disconnect_stops_observing() {
        let (menu, binding) = bound_fixture();

        let save = ToolbarItem::new("Save");
        binding.set_items(vec![Arc::clone(&save)]);
        binding.disconnect();

        assert_eq!(save.subscription_count(), 0);
        assert_eq!(binding.item_count(), 0);

        // Later mutations are invisible to the menu.
        let before = menu.mutation_count();
        save.set_text("Save All");
        assert_eq!(menu.mutation_count(), before);
        assert_eq!(menu.titles(), vec!["Save"]);
    }

    #[test]
    fn test_menu_rebuilt_behind_binding_self_heals() {
        let (menu, binding) = bound_fixture();

        let save = ToolbarItem::new("Save");
        binding.set_items(vec![Arc::clone(&save)]);

        // Something else cleared the native menu.
        menu.clear();
        save.set_text("Save All");

        assert_eq!(menu.titles(), vec!["Save All"]);
        assert_eq!(save.subscription_count(), 1);
    }
}
