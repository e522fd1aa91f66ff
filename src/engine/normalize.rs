//! Pattern normalization.
//!
//! Callers hand the engine replacement rules in several shapes: a bare
//! `token => value` mapping, an explicit pattern/replacement record, or a
//! list mixing both. Everything downstream works on one canonical form, so
//! this module resolves the polymorphism exactly once; the executor never
//! inspects input shapes.

use crate::{Matcher, ReplacementRule, RuleInput};

/// Flatten `input` into a canonical ordered rule sequence.
///
/// Mapping keys expand in insertion order to literal matchers; explicit
/// records pass through unchanged; list elements are expanded one by one and
/// concatenated. Empty input yields an empty sequence, never an error. The
/// input is not mutated.
pub(crate) fn normalize(input: &RuleInput) -> Vec<ReplacementRule> {
    match input {
        RuleInput::Empty => Vec::new(),
        RuleInput::Record(rule) => vec![rule.clone()],
        RuleInput::Map(pairs) => pairs
            .iter()
            .map(|(token, replacement)| ReplacementRule {
                pattern: Matcher::Literal(token.clone()),
                replacement: replacement.clone(),
            })
            .collect(),
        RuleInput::List(inputs) => inputs.iter().flat_map(normalize).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Replacement;

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(normalize(&RuleInput::Empty).is_empty());
        assert!(normalize(&RuleInput::Map(Vec::new())).is_empty());
        assert!(normalize(&RuleInput::List(Vec::new())).is_empty());
    }

    #[test]
    fn mapping_expands_in_insertion_order() {
        let input = rules! { ":basename" => "file", ":ext" => ".html" };
        let rules = normalize(&input);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].pattern, Matcher::Literal(":basename".into()));
        assert_eq!(rules[0].replacement, Replacement::Literal("file".into()));
        assert_eq!(rules[1].pattern, Matcher::Literal(":ext".into()));
    }

    #[test]
    fn record_passes_through_unchanged() {
        let record = ReplacementRule::new(regex!(r":\byear\b"), "2013");
        let rules = normalize(&RuleInput::Record(record.clone()));

        assert_eq!(rules, vec![record]);
    }

    #[test]
    fn mixed_list_concatenates_expansions() {
        let input = RuleInput::List(vec![
            rules! { ":a" => "1" },
            RuleInput::Record(ReplacementRule::new(":b", "2")),
            RuleInput::List(vec![rules! { ":c" => "3", ":d" => "4" }]),
        ]);
        let rules = normalize(&input);

        let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.display()).collect();
        assert_eq!(patterns, vec![":a", ":b", ":c", ":d"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let input = RuleInput::List(vec![
            rules! { ":a" => "1", ":b" => "2" },
            RuleInput::Record(ReplacementRule::new(regex!(r":\bc\b"), "3")),
        ]);

        let once = normalize(&input);
        let rewrapped = RuleInput::List(once.iter().cloned().map(RuleInput::Record).collect());
        let twice = normalize(&rewrapped);

        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_not_consumed() {
        let input = rules! { ":x" => "y" };
        let first = normalize(&input);
        let second = normalize(&input);

        assert_eq!(first, second);
        assert!(matches!(input, RuleInput::Map(ref pairs) if pairs.len() == 1));
    }
}
