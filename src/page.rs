//! Page content mounting into a native container.
//!
//! A [`Page`] is the declarative side; a [`ViewContainer`] is whatever
//! view group the platform hands us. Mounting is wholesale: remove
//! everything, then attach the current content's native view.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::HandlerError;

/// Opaque reference to a platform view, with a process-unique id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeView {
    id: u64,
}

impl NativeView {
    /// Allocate a view reference with a fresh id.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Default for NativeView {
    fn default() -> Self {
        Self::new()
    }
}

/// Content that can produce a platform view when mounted.
pub trait PageContent: Send + Sync {
    fn mount(&self) -> NativeView;
}

/// Container the platform provides for a page's view tree.
pub trait ViewContainer: Send + Sync {
    /// Detach every child view.
    fn remove_all(&self);

    /// Attach a view as the last child.
    fn add(&self, view: NativeView);

    fn child_count(&self) -> usize;
}

/// Declarative page: a title plus optional content.
pub struct Page {
    title: Mutex<String>,
    content: Mutex<Option<Arc<dyn PageContent>>>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            title: Mutex::new(title.into()),
            content: Mutex::new(None),
        })
    }

    pub fn title(&self) -> String {
        self.title.lock().unwrap().clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.lock().unwrap() = title.into();
    }

    pub fn content(&self) -> Option<Arc<dyn PageContent>> {
        self.content.lock().unwrap().clone()
    }

    pub fn set_content(&self, content: Option<Arc<dyn PageContent>>) {
        *self.content.lock().unwrap() = content;
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}

/// Binds a [`Page`] to a native container.
pub struct PageHandler {
    page: Arc<Page>,
    container: Arc<dyn ViewContainer>,
}

impl PageHandler {
    /// Connect a page to its container.
    ///
    /// Both sides must already be set; a missing one is a framework-usage
    /// bug and fails construction eagerly.
    pub fn connect(
        page: Option<Arc<Page>>,
        container: Option<Arc<dyn ViewContainer>>,
    ) -> Result<Self, HandlerError> {
        let page = page.ok_or(HandlerError::MissingVirtualView)?;
        let container = container.ok_or(HandlerError::MissingNativeView)?;
        Ok(Self { page, container })
    }

    pub fn page(&self) -> &Arc<Page> {
        &self.page
    }

    /// Remount the page's content from scratch.
    pub fn update_content(&self) {
        self.container.remove_all();

        if let Some(content) = self.page.content() {
            self.container.add(content.mount());
        } else {
            debug!("page has no content; container left empty");
        }
    }

    /// Stop managing the container's children.
    pub fn disconnect(&self) {
        self.container.remove_all();
    }
}
