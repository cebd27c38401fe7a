//! Asynchronous icon resolution.
//!
//! Resolvers turn an [`IconSource`] into a decoded [`Image`] template and
//! hand it to a completion callback. The callback may run on any thread;
//! callers re-marshal onto the UI thread before touching native state.
//! A resolver may always complete with no image; failures are logged, not
//! surfaced.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::IconError;
use crate::icon::{IconSource, Image};

/// Completion callback for an icon load.
pub type IconCallback = Box<dyn FnOnce(Option<Image>) + Send + 'static>;

/// Resolves an [`IconSource`] to a decoded template, asynchronously.
pub trait IconResolver: Send + Sync {
    fn load(&self, source: &IconSource, done: IconCallback);
}

/// Resolver backed by a fixed set of named templates.
///
/// Named lookups and byte decodes complete inline; file sources are not
/// supported and complete empty.
#[derive(Default)]
pub struct MemoryIconResolver {
    templates: Mutex<HashMap<String, Image>>,
}

impl MemoryIconResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a name, replacing any previous one.
    pub fn insert(&self, name: impl Into<String>, image: Image) {
        self.templates.lock().unwrap().insert(name.into(), image);
    }

    fn resolve(&self, source: &IconSource) -> Result<Image, IconError> {
        match source {
            IconSource::Named(name) => self
                .templates
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| IconError::UnknownName(name.clone())),
            IconSource::Bytes(bytes) => Image::decode(bytes),
            IconSource::File(path) => Err(IconError::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("file sources are not supported in memory: {}", path.display()),
            ))),
        }
    }
}

impl IconResolver for MemoryIconResolver {
    fn load(&self, source: &IconSource, done: IconCallback) {
        match self.resolve(source) {
            Ok(image) => done(Some(image)),
            Err(e) => {
                debug!("icon resolution produced no image: {}", e);
                done(None);
            }
        }
    }
}

/// Resolver that decodes files and raw bytes on a blocking worker.
pub struct FsIconResolver {
    runtime: tokio::runtime::Handle,
}

impl FsIconResolver {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    fn decode_file(path: &std::path::Path) -> Result<Image, IconError> {
        let bytes = std::fs::read(path)?;
        Image::decode(&bytes)
    }
}

impl IconResolver for FsIconResolver {
    fn load(&self, source: &IconSource, done: IconCallback) {
        match source {
            IconSource::File(path) => {
                let path = path.clone();
                self.runtime.spawn_blocking(move || {
                    match Self::decode_file(&path) {
                        Ok(image) => done(Some(image)),
                        Err(e) => {
                            warn!("failed to load icon from {}: {}", path.display(), e);
                            done(None);
                        }
                    }
                });
            }
            IconSource::Bytes(bytes) => {
                let bytes = std::sync::Arc::clone(bytes);
                self.runtime.spawn_blocking(move || match Image::decode(&bytes) {
                    Ok(image) => done(Some(image)),
                    Err(e) => {
                        warn!("failed to decode icon bytes: {}", e);
                        done(None);
                    }
                });
            }
            IconSource::Named(name) => {
                debug!("no template registered for named icon '{}'", name);
                done(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::test_support::{test_image, test_png_bytes};
    use std::sync::mpsc;
    use std::sync::Arc;

    fn load_blocking(resolver: &dyn IconResolver, source: &IconSource) -> Option<Image> {
        let (tx, rx) = mpsc::channel();
        resolver.load(
            source,
            Box::new(move |image| {
                tx.send(image).unwrap();
            }),
        );
        rx.recv().unwrap()
    }

    #[test]
    fn test_memory_named_lookup() {
        let resolver = MemoryIconResolver::new();
        resolver.insert("save", test_image());

        let loaded = load_blocking(&resolver, &IconSource::Named("save".into()));
        assert!(loaded.is_some());

        let missing = load_blocking(&resolver, &IconSource::Named("delete".into()));
        assert!(missing.is_none());
    }

    #[test]
    fn test_memory_shares_cached_template() {
        let resolver = MemoryIconResolver::new();
        resolver.insert("save", test_image());

        let first = load_blocking(&resolver, &IconSource::Named("save".into())).unwrap();
        let second = load_blocking(&resolver, &IconSource::Named("save".into())).unwrap();

        assert!(first.shares_pixels(&second));
    }

    #[test]
    fn test_memory_decodes_bytes() {
        let resolver = MemoryIconResolver::new();
        let source = IconSource::Bytes(Arc::new(test_png_bytes()));

        let loaded = load_blocking(&resolver, &source).unwrap();
        assert_eq!(loaded.width(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fs_resolver_decodes_bytes_off_thread() {
        let resolver = FsIconResolver::new(tokio::runtime::Handle::current());
        let source = IconSource::Bytes(Arc::new(test_png_bytes()));

        let (tx, rx) = mpsc::channel();
        resolver.load(
            &source,
            Box::new(move |image| {
                tx.send(image).unwrap();
            }),
        );

        let loaded = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        assert!(loaded.is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fs_resolver_missing_file_completes_empty() {
        let resolver = FsIconResolver::new(tokio::runtime::Handle::current());
        let source = IconSource::File("/definitely/not/here.png".into());

        let (tx, rx) = mpsc::channel();
        resolver.load(
            &source,
            Box::new(move |image| {
                tx.send(image).unwrap();
            }),
        );

        let loaded = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }
}
