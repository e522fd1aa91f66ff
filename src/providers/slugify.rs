//! Slug transforms applied to provider output.

use std::fmt;
use std::sync::Arc;

/// How provider values are transformed before substitution.
#[derive(Clone, Default)]
pub enum Slugify {
    /// Leave values untouched.
    #[default]
    Off,
    /// The built-in transform: lowercase, alphanumeric runs kept,
    /// everything else collapsed to a single `-`.
    Default,
    /// A caller-supplied transform.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Slugify {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Slugify::Custom(Arc::new(f))
    }

    /// Apply the configured transform to `value`.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Slugify::Off => value.to_string(),
            Slugify::Default => slug(value),
            Slugify::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Slugify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slugify::Off => f.write_str("Off"),
            Slugify::Default => f.write_str("Default"),
            Slugify::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}

impl From<bool> for Slugify {
    fn from(on: bool) -> Self {
        if on { Slugify::Default } else { Slugify::Off }
    }
}

/// The built-in slug transform.
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut gap = false;
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.extend(ch.to_lowercase());
        } else {
            gap = true;
        }
    }
    out
}
