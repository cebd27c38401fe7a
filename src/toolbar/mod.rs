//! Toolbar binding: menu reconciliation, icon application, and wiring.

pub mod handler;
pub mod icon;
pub mod sync;

pub use handler::ToolbarHandler;
pub use icon::{IconUpdater, TintedIconUpdater};
pub use sync::{HostCapabilities, MenuSynchronizer, DISABLED_ICON_ALPHA, DISABLED_TEXT_OPACITY};
