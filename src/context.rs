//! Per-call context values and provider fragments.
//!
//! A [`Context`] is the data bag available to computed replacements for the
//! duration of one `process`/`run` call. The engine assembles a fresh working
//! context per call (default context, then fragments, then the per-call
//! context, later entries winning) and never retains it afterwards.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

/// A value stored in a [`Context`].
#[derive(Clone, Debug, PartialEq)]
pub enum ContextValue {
    Str(String),
    Date(NaiveDateTime),
}

impl ContextValue {
    /// The string form, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::Str(s) => Some(s),
            ContextValue::Date(_) => None,
        }
    }

    /// The date form, if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            ContextValue::Date(d) => Some(*d),
            ContextValue::Str(_) => None,
        }
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::Str(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::Str(s)
    }
}

impl From<NaiveDateTime> for ContextValue {
    fn from(d: NaiveDateTime) -> Self {
        ContextValue::Date(d)
    }
}

impl From<NaiveDate> for ContextValue {
    fn from(d: NaiveDate) -> Self {
        // Midnight always exists.
        ContextValue::Date(d.and_hms_opt(0, 0, 0).unwrap())
    }
}

/// The per-call data bag read by computed replacements.
///
/// Entries keep insertion order; setting an existing name overwrites its
/// value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Builder form of [`set`](Context::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, overwriting any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ContextValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Shorthand for a string-valued field.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ContextValue::as_str)
    }

    /// Shorthand for a date-valued field.
    pub fn date(&self, name: &str) -> Option<NaiveDateTime> {
        self.get(name).and_then(ContextValue::as_date)
    }

    /// Merge `other` into this context; `other`'s entries win on collision.
    pub fn merge(&mut self, other: &Context) {
        for (name, value) in &other.entries {
            self.set(name.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Output of a context-fragment provider: a ready mapping, or a thunk that
/// is invoked with no arguments when the working context is assembled.
#[derive(Clone)]
pub enum Fragment {
    Map(Context),
    Thunk(Arc<dyn Fn() -> Context + Send + Sync>),
}

impl Fragment {
    /// Wrap a function as a deferred fragment.
    pub fn thunk<F>(f: F) -> Self
    where
        F: Fn() -> Context + Send + Sync + 'static,
    {
        Fragment::Thunk(Arc::new(f))
    }

    /// Resolve to a concrete mapping.
    pub fn resolve(&self) -> Context {
        match self {
            Fragment::Map(ctx) => ctx.clone(),
            Fragment::Thunk(f) => f(),
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Map(ctx) => f.debug_tuple("Map").field(ctx).finish(),
            Fragment::Thunk(_) => f.debug_tuple("Thunk").field(&"<fn>").finish(),
        }
    }
}

impl From<Context> for Fragment {
    fn from(ctx: Context) -> Self {
        Fragment::Map(ctx)
    }
}
