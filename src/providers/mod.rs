//! Context-fragment providers.
//!
//! Providers are simple adapters over one uniform interface: each produces
//! either a parser (a [`RuleInput`](crate::RuleInput) of replacement rules
//! that read context fields) or a context fragment (a
//! [`Fragment`](crate::Fragment) mapping, possibly deferred behind a thunk).
//! They contribute no algorithmic behavior of their own — the engine treats
//! their output exactly like any caller-supplied parser or fragment.
//!
//! - [`paths`] — file-path decomposition (`:basename`, `:filename`, `:ext`,
//!   `:dir`) from the `filepath` context field.
//! - [`urls`] — URL decomposition (`:(protocol)`, `:(host)`, ...) from the
//!   `url` context field.
//! - [`dates`] — the date token vocabulary (`:year`, `:MM`, `:day`, ...)
//!   formatted from the `date` context field.
//! - [`slugify`] — the slug transform option every provider honors.
//!
//! When a provider's source context field is absent, its replacement
//! functions return `None` and the tokens stay visible in the output.

pub mod dates;
pub mod paths;
pub mod slugify;
pub mod urls;

pub use slugify::Slugify;
