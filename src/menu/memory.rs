//! In-memory menu host for tests and headless embedders.

use std::fmt;
use std::sync::Mutex;

use tracing::debug;

use crate::graphics::Color;
use crate::icon::Drawable;
use crate::menu::arena::{HandleArena, ItemHandle};
use crate::menu::{ClickAction, MenuHost, ShowAsAction, Title};

/// One entry in a [`MemoryMenu`].
pub struct MenuEntry {
    pub title: Title,
    pub enabled: bool,
    pub accessible_label: String,
    pub icon: Option<Drawable>,
    pub show_as_action: ShowAsAction,
    pub text_color: Option<Color>,
    click: Option<ClickAction>,
}

impl MenuEntry {
    fn new(title: Title) -> Self {
        Self {
            title,
            enabled: true,
            accessible_label: String::new(),
            icon: None,
            show_as_action: ShowAsAction::IfRoom,
            text_color: None,
            click: None,
        }
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("title", &self.title)
            .field("enabled", &self.enabled)
            .field("show_as_action", &self.show_as_action)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct MenuInner {
    entries: HandleArena<MenuEntry>,
    order: Vec<ItemHandle>,
    mutations: u64,
}

/// Reference [`MenuHost`] built on the handle arena.
///
/// Records every successful mutation, so tests can assert that operations
/// targeting stale handles left the menu completely untouched.
#[derive(Default)]
pub struct MemoryMenu {
    inner: Mutex<MenuInner>,
}

impl MemoryMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the entry behind `handle`, if it is alive.
    pub fn entry<R>(&self, handle: ItemHandle, f: impl FnOnce(&MenuEntry) -> R) -> Option<R> {
        let inner = self.inner.lock().unwrap();
        inner.entries.get(handle).map(f)
    }

    /// Titles of the attached items, in insertion order.
    pub fn titles(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .order
            .iter()
            .filter_map(|&handle| inner.entries.get(handle))
            .map(|entry| entry.title.text().to_string())
            .collect()
    }

    /// Handles of the attached items, in insertion order.
    pub fn handles(&self) -> Vec<ItemHandle> {
        self.inner.lock().unwrap().order.clone()
    }

    /// Total successful mutations since creation (adds included).
    pub fn mutation_count(&self) -> u64 {
        self.inner.lock().unwrap().mutations
    }

    /// Simulate a user click. Returns whether a callback fired.
    pub fn click(&self, handle: ItemHandle) -> bool {
        let action = {
            let inner = self.inner.lock().unwrap();
            inner
                .entries
                .get(handle)
                .and_then(|entry| entry.click.clone())
        };

        match action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    fn mutate(&self, handle: ItemHandle, f: impl FnOnce(&mut MenuEntry)) {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        match inner.entries.get_mut(handle) {
            Some(entry) => {
                f(entry);
                inner.mutations += 1;
            }
            None => debug!(?handle, "mutation on stale menu handle ignored"),
        }
    }
}

impl MenuHost for MemoryMenu {
    fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.order.clear();
        inner.mutations += 1;
    }

    fn add(&self, title: Title) -> ItemHandle {
        let mut inner = self.inner.lock().unwrap();
        let handle = inner.entries.insert(MenuEntry::new(title));
        inner.order.push(handle);
        inner.mutations += 1;
        handle
    }

    fn is_alive(&self, handle: ItemHandle) -> bool {
        self.inner.lock().unwrap().entries.contains(handle)
    }

    fn item_count(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    fn set_title(&self, handle: ItemHandle, title: Title) {
        self.mutate(handle, |entry| entry.title = title);
    }

    fn set_enabled(&self, handle: ItemHandle, enabled: bool) {
        self.mutate(handle, |entry| entry.enabled = enabled);
    }

    fn set_accessible_label(&self, handle: ItemHandle, label: &str) {
        self.mutate(handle, |entry| entry.accessible_label = label.to_string());
    }

    fn set_icon(&self, handle: ItemHandle, icon: Drawable) {
        self.mutate(handle, |entry| entry.icon = Some(icon));
    }

    fn set_show_as_action(&self, handle: ItemHandle, mode: ShowAsAction) {
        self.mutate(handle, |entry| entry.show_as_action = mode);
    }

    fn set_click(&self, handle: ItemHandle, action: ClickAction) {
        self.mutate(handle, |entry| entry.click = Some(action));
    }

    fn set_text_color(&self, handle: ItemHandle, color: Color) {
        self.mutate(handle, |entry| entry.text_color = Some(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_add_and_iterate_in_order() {
        let menu = MemoryMenu::new();
        menu.add(Title::Plain("Save".into()));
        menu.add(Title::Plain("Delete".into()));

        assert_eq!(menu.titles(), vec!["Save", "Delete"]);
        assert_eq!(menu.item_count(), 2);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let menu = MemoryMenu::new();
        let handle = menu.add(Title::Plain("Save".into()));

        assert!(menu.is_alive(handle));
        menu.clear();
        assert!(!menu.is_alive(handle));
        assert_eq!(menu.item_count(), 0);
    }

    #[test]
    fn test_stale_mutators_are_noops() {
        let menu = MemoryMenu::new();
        let handle = menu.add(Title::Plain("Save".into()));
        menu.clear();

        let before = menu.mutation_count();
        menu.set_enabled(handle, false);
        menu.set_title(handle, Title::Plain("Stale".into()));
        menu.set_text_color(handle, Color::WHITE);

        assert_eq!(menu.mutation_count(), before);
    }

    #[test]
    fn test_click_fires_bound_action() {
        let menu = MemoryMenu::new();
        let handle = menu.add(Title::Plain("Save".into()));

        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        menu.set_click(
            handle,
            Arc::new(move || {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(menu.click(handle));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        menu.clear();
        assert!(!menu.click(handle));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
