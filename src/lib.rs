//! menubind - platform-binding glue for a declarative UI toolkit.
//!
//! Maps a platform-neutral element model (toolbar items, pages, fonts)
//! onto a native widget surface expressed as trait contracts. The core is
//! the toolbar [`MenuSynchronizer`]: it keeps a native menu's items, in
//! order, equal to an ordered sequence of [`ToolbarItem`]s, patches single
//! items in place, loads icons asynchronously with liveness re-validation,
//! and never leaks a change-notification subscription across a rebuild.
//!
//! ```
//! use std::sync::Arc;
//! use menubind::config::BindingConfig;
//! use menubind::dispatch::InlineDispatcher;
//! use menubind::icon::MemoryIconResolver;
//! use menubind::item::ToolbarItem;
//! use menubind::menu::MemoryMenu;
//! use menubind::toolbar::ToolbarHandler;
//!
//! let menu = Arc::new(MemoryMenu::new());
//! let binding = ToolbarHandler::bind(
//!     menu.clone(),
//!     Arc::new(MemoryIconResolver::new()),
//!     Arc::new(InlineDispatcher),
//!     &BindingConfig::default(),
//! );
//!
//! let save = ToolbarItem::new("Save");
//! binding.set_items(vec![save.clone()]);
//!
//! // Property changes flow into the menu automatically.
//! save.set_text("Save All");
//! assert_eq!(menu.titles(), vec!["Save All"]);
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod icon;
pub mod item;
pub mod menu;
pub mod page;
pub mod toolbar;

pub use config::BindingConfig;
pub use error::BindingError;
pub use graphics::Color;
pub use item::{ChangeHandler, ItemProperty, Placement, ToolbarItem};
pub use menu::{ItemHandle, MemoryMenu, MenuHost, ShowAsAction, Title};
pub use toolbar::{HostCapabilities, MenuSynchronizer, ToolbarHandler};
