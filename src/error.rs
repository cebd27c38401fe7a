//! Error types for the binding layer.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.
//!
//! Reconciliation paths never return errors: a missing collection, an
//! out-of-range index, a dead handle, or an empty icon result is a silent
//! no-op. The types here cover the paths that do fail, namely construction
//! of view handlers and configuration loading.

use thiserror::Error;

/// Top-level binding error type.
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("icon error: {0}")]
    Icon(#[from] IconError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fatal construction errors from view handlers.
///
/// These indicate a framework-usage bug, not a runtime race, and are
/// reported eagerly.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("virtual view must be set before creating a native view")]
    MissingVirtualView,

    #[error("native container must be set before mounting content")]
    MissingNativeView,
}

/// Icon decoding and resolution errors.
///
/// Resolvers log these and complete with no image; they never surface from
/// a synchronization operation.
#[derive(Error, Debug)]
pub enum IconError {
    #[error("failed to decode icon bytes: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read icon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("no template registered for icon '{0}'")]
    UnknownName(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("disabled_text_opacity must be within 0.0..=1.0, got {0}")]
    OpacityOutOfRange(f32),

    #[error("default font family must not be empty")]
    EmptyFontFamily,
}
