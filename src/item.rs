//! Declarative toolbar items and their change notifications.
//!
//! A [`ToolbarItem`] is owned by the embedder's view-model layer; the
//! binding only observes it. Identity is the allocation: items are
//! compared by address, handlers by the address of their closure.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::icon::IconSource;

/// Whether an item always shows on the bar or collapses into overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Primary,
    Secondary,
}

/// Properties reported through change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemProperty {
    Text,
    Icon,
    Enabled,
    Description,
    Placement,
}

/// Action invoked when the user activates an item.
pub type ActivateAction = Arc<dyn Fn() + Send + Sync>;

/// Multicast property-change subscriber.
///
/// Subscription and unsubscription key on the identity of the inner
/// closure, mirroring classic event-handler semantics: subscribing the
/// same handler twice keeps a single subscription.
#[derive(Clone)]
pub struct ChangeHandler(Arc<dyn Fn(&ToolbarItem, ItemProperty) + Send + Sync>);

impl ChangeHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ToolbarItem, ItemProperty) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Whether two handlers are the same subscription.
    pub fn ptr_eq(&self, other: &ChangeHandler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn call(&self, item: &ToolbarItem, property: ItemProperty) {
        (self.0)(item, property);
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChangeHandler")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// One user-facing toolbar action.
pub struct ToolbarItem {
    text: Mutex<String>,
    description: Mutex<Option<String>>,
    icon: Mutex<Option<IconSource>>,
    enabled: Mutex<bool>,
    placement: Mutex<Placement>,
    action: Mutex<Option<ActivateAction>>,
    listeners: Mutex<Vec<ChangeHandler>>,
}

impl ToolbarItem {
    /// Create an enabled, primary-placement item with the given text.
    pub fn new(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            text: Mutex::new(text.into()),
            description: Mutex::new(None),
            icon: Mutex::new(None),
            enabled: Mutex::new(true),
            placement: Mutex::new(Placement::Primary),
            action: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    pub fn description(&self) -> Option<String> {
        self.description.lock().unwrap().clone()
    }

    pub fn icon(&self) -> Option<IconSource> {
        self.icon.lock().unwrap().clone()
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled.lock().unwrap()
    }

    pub fn placement(&self) -> Placement {
        *self.placement.lock().unwrap()
    }

    /// Label exposed to assistive technology: the title, or the
    /// description when the title is blank.
    pub fn accessible_label(&self) -> String {
        let text = self.text();
        if !text.trim().is_empty() {
            return text;
        }
        self.description().unwrap_or_default()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut guard = self.text.lock().unwrap();
            if *guard == text {
                return;
            }
            *guard = text;
        }
        self.notify(ItemProperty::Text);
    }

    pub fn set_description(&self, description: Option<String>) {
        {
            let mut guard = self.description.lock().unwrap();
            if *guard == description {
                return;
            }
            *guard = description;
        }
        self.notify(ItemProperty::Description);
    }

    pub fn set_icon(&self, icon: Option<IconSource>) {
        {
            let mut guard = self.icon.lock().unwrap();
            if *guard == icon {
                return;
            }
            *guard = icon;
        }
        self.notify(ItemProperty::Icon);
    }

    pub fn set_enabled(&self, enabled: bool) {
        {
            let mut guard = self.enabled.lock().unwrap();
            if *guard == enabled {
                return;
            }
            *guard = enabled;
        }
        self.notify(ItemProperty::Enabled);
    }

    pub fn set_placement(&self, placement: Placement) {
        {
            let mut guard = self.placement.lock().unwrap();
            if *guard == placement {
                return;
            }
            *guard = placement;
        }
        self.notify(ItemProperty::Placement);
    }

    /// Replace the activation action. Does not notify.
    pub fn set_action(&self, action: Option<ActivateAction>) {
        *self.action.lock().unwrap() = action;
    }

    /// Invoke the activation action, if any.
    pub fn activate(&self) {
        let action = self.action.lock().unwrap().clone();
        if let Some(action) = action {
            action();
        }
    }

    /// Subscribe `handler` to property changes.
    ///
    /// Any existing subscription with the same identity is removed first,
    /// so re-subscribing never duplicates notifications.
    pub fn subscribe(&self, handler: &ChangeHandler) {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.retain(|existing| !existing.ptr_eq(handler));
        listeners.push(handler.clone());
    }

    /// Remove `handler`'s subscription. No-op when not subscribed.
    pub fn unsubscribe(&self, handler: &ChangeHandler) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|existing| !existing.ptr_eq(handler));
    }

    /// Number of active subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Fire a property change at every subscriber.
    ///
    /// The subscriber list is snapshotted first so handlers may
    /// re-subscribe from inside the callback.
    fn notify(&self, property: ItemProperty) {
        let listeners: Vec<ChangeHandler> = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener.call(self, property);
        }
    }
}

impl fmt::Debug for ToolbarItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolbarItem")
            .field("text", &self.text())
            .field("enabled", &self.is_enabled())
            .field("placement", &self.placement())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handler(count: Arc<AtomicUsize>) -> ChangeHandler {
        ChangeHandler::new(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_subscribe_dedups() {
        let item = ToolbarItem::new("Save");
        let count = Arc::new(AtomicUsize::new(0));
        let handler = counting_handler(Arc::clone(&count));

        item.subscribe(&handler);
        item.subscribe(&handler);
        assert_eq!(item.subscription_count(), 1);

        item.set_text("Save All");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let item = ToolbarItem::new("Save");
        let handler = counting_handler(Arc::new(AtomicUsize::new(0)));

        item.subscribe(&handler);
        item.unsubscribe(&handler);
        item.unsubscribe(&handler);

        assert_eq!(item.subscription_count(), 0);
    }

    #[test]
    fn test_notify_carries_property() {
        let item = ToolbarItem::new("Save");
        let seen: Arc<Mutex<Vec<ItemProperty>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let handler = ChangeHandler::new(move |_, property| {
            seen_clone.lock().unwrap().push(property);
        });

        item.subscribe(&handler);
        item.set_enabled(false);
        item.set_icon(Some(IconSource::Named("save".into())));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ItemProperty::Enabled, ItemProperty::Icon]
        );
    }

    #[test]
    fn test_unchanged_value_does_not_notify() {
        let item = ToolbarItem::new("Save");
        let count = Arc::new(AtomicUsize::new(0));
        let handler = counting_handler(Arc::clone(&count));

        item.subscribe(&handler);
        item.set_text("Save");
        item.set_enabled(true);

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_may_resubscribe_reentrantly() {
        let item = ToolbarItem::new("Save");

        // The handler re-registers itself while a notification is in
        // flight; this must not deadlock.
        let slot: Arc<Mutex<Option<ChangeHandler>>> = Arc::new(Mutex::new(None));
        let slot_clone = Arc::clone(&slot);
        let handler = ChangeHandler::new(move |item, _| {
            if let Some(this) = slot_clone.lock().unwrap().as_ref() {
                item.unsubscribe(this);
                item.subscribe(this);
            }
        });
        *slot.lock().unwrap() = Some(handler.clone());

        item.subscribe(&handler);
        item.set_text("Save All");

        assert_eq!(item.subscription_count(), 1);
    }

    #[test]
    fn test_accessible_label_falls_back_to_description() {
        let item = ToolbarItem::new("");
        item.set_description(Some("Save the document".into()));
        assert_eq!(item.accessible_label(), "Save the document");

        let titled = ToolbarItem::new("Save");
        assert_eq!(titled.accessible_label(), "Save");
    }

    #[test]
    fn test_activate() {
        let item = ToolbarItem::new("Save");
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        item.activate(); // no action yet

        item.set_action(Some(Arc::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        })));
        item.activate();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
