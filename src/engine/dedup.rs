//! Last-wins deduplication of merged rule sequences.
//!
//! Several parsers merged for one call may each carry a rule for the same
//! pattern. Without deduplication, a sequential fold would let the *first*
//! such rule consume the token and silently ignore the later ones — the
//! opposite of the documented shadowing order, where later rules shadow
//! earlier ones applied to the same span.
//!
//! Merging therefore keeps exactly one rule per pattern: the last occurrence,
//! at its later position. Rules with distinct patterns are untouched, so a
//! later rule can still match text an earlier replacement introduced.
//!
//! Patterns compare by value: literal tokens by string equality, regexes by
//! source equality.

use crate::ReplacementRule;

/// Collapse duplicate patterns, keeping the last occurrence of each.
pub(crate) fn dedupe_last(rules: Vec<ReplacementRule>) -> Vec<ReplacementRule> {
    let mut out: Vec<ReplacementRule> = Vec::with_capacity(rules.len());
    for rule in rules {
        if let Some(pos) = out.iter().position(|kept| kept.pattern == rule.pattern) {
            out.remove(pos);
        }
        out.push(rule);
    }
    out
}
