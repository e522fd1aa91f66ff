//! Substitution engine.
//!
//! This module is the operational core of the crate. Processing a template is
//! a single synchronous pass with no suspension points:
//!
//! ```text
//! raw parser input  ──┐
//!                     │  normalize            (normalize.rs)
//!                     └──────────┬───────────
//!                                │  Vec<ReplacementRule>  (merged)
//!                                v
//!                         dedupe_last         (dedup.rs)
//!                                │  last rule per pattern survives
//!                                v
//! working context ──────── bind ─┤            (bind.rs)
//!                                │  Vec<BoundRule>
//!                                v
//! template text ─────────── apply             (apply.rs)
//!                                │
//!                                v
//!                          output String
//! ```
//!
//! Each stage is pure with respect to its inputs: normalization never mutates
//! the raw input, binding clones every rule and snapshots the context, and
//! application folds the rule sequence over the template text. Rules are
//! applied in sequence order against the *current* state of the string, so a
//! later rule can match text introduced by an earlier rule's replacement.
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: flattens the polymorphic rule-input forms (bare mapping,
//!   explicit record, nested list) into one canonical ordered sequence.
//! - `dedup.rs`: collapses duplicate patterns in a merged sequence so the
//!   last rule per pattern wins, keeping shadowing order deterministic.
//! - `bind.rs`: pairs computed replacements with a per-call context snapshot
//!   so closures bound for one call can never observe another call's context.
//! - `apply.rs`: performs the ordered replacement fold, literal and regex.
//! - `trace.rs`: per-rule step traces for the verbose entry points.
//!
//! The facade (`crate::api::Strings`) owns name resolution and merging; the
//! engine only ever sees canonical rules and a fully merged context.

#[path = "engine/apply.rs"]
mod apply;
#[path = "engine/bind.rs"]
mod bind;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/trace.rs"]
mod trace;

pub(crate) use apply::{apply, apply_traced};
pub(crate) use bind::bind;
pub(crate) use dedup::dedupe_last;
pub(crate) use normalize::normalize;
pub use trace::StepTrace;
