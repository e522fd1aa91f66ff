//! Context binding.
//!
//! The same named parser may serve many `process` calls, each with its own
//! context. Binding therefore clones every rule and pairs each computed
//! replacement with an `Arc` snapshot of the call's working context, taken
//! once per call. A closure bound here can never observe a later call's
//! context, and the stored rules themselves are never mutated.

use std::sync::Arc;

use crate::{Context, Match, Matcher, Replacement, ReplacementFn, ReplacementRule};

/// A rule whose replacement is ready to evaluate: literal text, or a
/// computed function paired with its context snapshot.
pub(crate) struct BoundRule {
    pub matcher: Matcher,
    replacement: BoundReplacement,
}

enum BoundReplacement {
    Literal(String),
    Computed { func: ReplacementFn, context: Arc<Context> },
}

impl BoundRule {
    /// Evaluate the replacement for one match. `None` means the matched text
    /// must pass through unchanged.
    pub fn evaluate(&self, m: &Match<'_>) -> Option<String> {
        match &self.replacement {
            BoundReplacement::Literal(s) => Some(s.clone()),
            BoundReplacement::Computed { func, context } => func(context, m),
        }
    }
}

/// Bind `rules` to `context`, producing a fresh evaluable sequence.
///
/// The facade always supplies a context (an empty one when the caller gave
/// none), so computed replacements never see an absent context.
pub(crate) fn bind(rules: &[ReplacementRule], context: &Context) -> Vec<BoundRule> {
    let context = Arc::new(context.clone());
    rules
        .iter()
        .map(|rule| BoundRule {
            matcher: rule.pattern.clone(),
            replacement: match &rule.replacement {
                Replacement::Literal(s) => BoundReplacement::Literal(s.clone()),
                Replacement::Computed(func) => BoundReplacement::Computed {
                    func: Arc::clone(func),
                    context: Arc::clone(&context),
                },
            },
        })
        .collect()
}
