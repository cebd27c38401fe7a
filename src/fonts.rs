//! Typeface resolution with a shared default.
//!
//! The registry hands out one [`Typeface`] per (family, weight, italic)
//! combination. Requests that name no family resolve to the configured
//! default typeface. There is no substitution: an unknown family gets its
//! own typeface handle, exactly as a platform typeface factory behaves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::info;

use crate::config::BindingConfig;

/// Global font registry.
static FONT_REGISTRY: OnceCell<Arc<FontRegistry>> = OnceCell::new();

/// Initialize the global font registry from configuration.
pub fn init_font_registry(config: &BindingConfig) -> Arc<FontRegistry> {
    FONT_REGISTRY
        .get_or_init(|| {
            info!(
                default_family = %config.fonts.default_family,
                "initializing font registry"
            );
            Arc::new(FontRegistry::new(&config.fonts.default_family))
        })
        .clone()
}

/// Get the global font registry, if initialized.
pub fn font_registry() -> Option<Arc<FontRegistry>> {
    FONT_REGISTRY.get().cloned()
}

/// Font weight buckets the registry distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Platform-neutral font request.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: Option<String>,
    pub size: f32,
    pub weight: FontWeight,
    pub italic: bool,
}

impl Font {
    /// A font of the given size with no named family.
    pub fn of_size(size: f32) -> Self {
        Self {
            family: None,
            size,
            weight: FontWeight::Regular,
            italic: false,
        }
    }

    /// A font of the given family and size.
    pub fn named(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            ..Self::of_size(size)
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Resolved platform typeface handle.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Typeface {
    family: String,
    weight: FontWeight,
    italic: bool,
}

impl Typeface {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    family: String,
    weight: FontWeight,
    italic: bool,
}

/// Caches typefaces per (family, weight, italic).
pub struct FontRegistry {
    default_typeface: Arc<Typeface>,
    faces: Mutex<HashMap<FontKey, Arc<Typeface>>>,
}

impl FontRegistry {
    pub fn new(default_family: impl Into<String>) -> Self {
        Self {
            default_typeface: Arc::new(Typeface {
                family: default_family.into(),
                weight: FontWeight::Regular,
                italic: false,
            }),
            faces: Mutex::new(HashMap::new()),
        }
    }

    /// The typeface used when a request names no family.
    pub fn default_typeface(&self) -> Arc<Typeface> {
        Arc::clone(&self.default_typeface)
    }

    /// Resolve a font request to a shared typeface handle.
    ///
    /// Repeated lookups for the same request return the same handle.
    pub fn typeface(&self, font: &Font) -> Arc<Typeface> {
        let family = font
            .family
            .as_deref()
            .map(str::trim)
            .filter(|family| !family.is_empty());

        let Some(family) = family else {
            if font.weight == FontWeight::Regular && !font.italic {
                return self.default_typeface();
            }
            // Styled variants of the default family are cached like any
            // named family.
            return self.lookup(self.default_typeface.family.clone(), font);
        };

        self.lookup(family.to_string(), font)
    }

    fn lookup(&self, family: String, font: &Font) -> Arc<Typeface> {
        let key = FontKey {
            family,
            weight: font.weight,
            italic: font.italic,
        };

        Arc::clone(
            self.faces
                .lock()
                .unwrap()
                .entry(key.clone())
                .or_insert_with(|| {
                    Arc::new(Typeface {
                        family: key.family,
                        weight: key.weight,
                        italic: key.italic,
                    })
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_family_resolves_to_default() {
        let registry = FontRegistry::new("sans-serif");

        let resolved = registry.typeface(&Font::of_size(10.0));
        assert!(Arc::ptr_eq(&resolved, &registry.default_typeface()));

        let blank = registry.typeface(&Font::named("  ", 10.0));
        assert!(Arc::ptr_eq(&blank, &registry.default_typeface()));
    }

    #[test]
    fn test_named_family_is_not_default() {
        let registry = FontRegistry::new("sans-serif");

        let monospace = registry.typeface(&Font::named("monospace", 10.0));
        assert_ne!(monospace, registry.default_typeface());
        assert_eq!(monospace.family(), "monospace");

        // Unknown families still resolve to their own typeface.
        let dokdo = registry.typeface(&Font::named("Dokdo", 10.0));
        assert_eq!(dokdo.family(), "Dokdo");
        assert_ne!(dokdo, registry.default_typeface());
    }

    #[test]
    fn test_repeated_lookups_share_the_handle() {
        let registry = FontRegistry::new("sans-serif");

        let first = registry.typeface(&Font::named("monospace", 10.0));
        let second = registry.typeface(&Font::named("monospace", 24.0));

        // Size does not participate in identity.
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_styled_variants_are_distinct() {
        let registry = FontRegistry::new("sans-serif");

        let regular = registry.typeface(&Font::named("monospace", 10.0));
        let bold = registry.typeface(&Font::named("monospace", 10.0).bold());
        let bold_default = registry.typeface(&Font::of_size(10.0).bold());

        assert!(!Arc::ptr_eq(&regular, &bold));
        assert_eq!(bold.weight(), FontWeight::Bold);
        assert_eq!(bold_default.family(), "sans-serif");
        assert!(!Arc::ptr_eq(&bold_default, &registry.default_typeface()));
    }

    #[test]
    fn test_global_registry_initializes_once() {
        let config = BindingConfig::default();

        let first = init_font_registry(&config);
        let second = init_font_registry(&config);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(font_registry().is_some());
    }
}
