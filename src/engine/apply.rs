//! Ordered substitution over the template text.
//!
//! Rules are applied one at a time, each scanning the output of the previous
//! rule rather than the original template. This makes merged parsers behave
//! as one concatenated pass: a later rule can match text introduced by an
//! earlier replacement, and a later rule targeting the same token further
//! transforms whatever the earlier rule left behind.
//!
//! A rule that matches nothing is a no-op; no condition here ever raises.

use regex::Regex;

use super::bind::BoundRule;
use super::trace::StepTrace;
use crate::{Match, Matcher};

/// Apply `rules` in sequence to `template`, producing the final string.
pub(crate) fn apply(template: &str, rules: &[BoundRule]) -> String {
    rules.iter().fold(template.to_owned(), |text, rule| apply_one(&text, rule).0)
}

/// Like [`apply`], additionally recording a per-rule [`StepTrace`].
pub(crate) fn apply_traced(template: &str, rules: &[BoundRule]) -> (String, Vec<StepTrace>) {
    let mut steps = Vec::with_capacity(rules.len());
    let mut text = template.to_owned();
    for rule in rules {
        let (next, matches) = apply_one(&text, rule);
        steps.push(StepTrace::new(rule.matcher.display(), matches, &next));
        text = next;
    }
    (text, steps)
}

fn apply_one(text: &str, rule: &BoundRule) -> (String, usize) {
    let (out, matches) = match &rule.matcher {
        Matcher::Literal(token) => replace_literal(text, token, rule),
        Matcher::Regex(re) => replace_regex(text, re, rule),
    };
    if matches > 0 {
        log::trace!("pattern `{}` matched {} time(s)", rule.matcher.display(), matches);
    }
    (out, matches)
}

/// Verbatim substring replacement of every occurrence. An empty token is a
/// no-op (it would otherwise match everywhere).
fn replace_literal(text: &str, token: &str, rule: &BoundRule) -> (String, usize) {
    if token.is_empty() {
        return (text.to_owned(), 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut matches = 0;
    while let Some(idx) = rest.find(token) {
        matches += 1;
        out.push_str(&rest[..idx]);
        let matched = &rest[idx..idx + token.len()];
        match rule.evaluate(&Match::literal(matched)) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(matched),
        }
        rest = &rest[idx + token.len()..];
    }
    out.push_str(rest);
    (out, matches)
}

/// Replace every regex match. Replacement text is substituted verbatim (no
/// `$n` expansion); capture groups are passed positionally to computed
/// replacements.
fn replace_regex(text: &str, re: &Regex, rule: &BoundRule) -> (String, usize) {
    let mut matches = 0;
    let out = re.replace_all(text, |caps: &regex::Captures<'_>| {
        matches += 1;
        let m = Match::from_captures(caps);
        rule.evaluate(&m).unwrap_or_else(|| m.full().to_owned())
    });
    (out.into_owned(), matches)
}

#[cfg(test)]
mod tests {
    use super::super::bind::bind;
    use super::*;
    use crate::{Context, Replacement, ReplacementRule};

    fn bound(rules: Vec<ReplacementRule>, ctx: &Context) -> Vec<BoundRule> {
        bind(&rules, ctx)
    }

    #[test]
    fn literal_replaces_every_occurrence() {
        let rules = bound(vec![ReplacementRule::new(":x", "V")], &Context::new());
        assert_eq!(apply(":x/:x", &rules), "V/V");
    }

    #[test]
    fn unmatched_rule_is_a_noop() {
        let rules = bound(vec![ReplacementRule::new(":missing", "V")], &Context::new());
        assert_eq!(apply(":a/:b", &rules), ":a/:b");
    }

    #[test]
    fn computed_none_leaves_match_in_place() {
        let rules = bound(
            vec![
                ReplacementRule::new(":dirname", Replacement::computed(|_, _| None)),
                ReplacementRule::new(":base", "out"),
            ],
            &Context::new(),
        );
        assert_eq!(apply(":dirname/:base", &rules), ":dirname/out");
    }

    #[test]
    fn regex_replaces_all_matches_with_groups() {
        let rules = bound(
            vec![ReplacementRule::new(
                regex!(r":(\w+)"),
                Replacement::computed(|ctx, m| ctx.str(m.group(0)?).map(str::to_owned)),
            )],
            &context! { "a" => "1", "c" => "3" },
        );
        assert_eq!(apply(":a/:b/:c", &rules), "1/:b/3");
    }

    #[test]
    fn replacement_text_is_verbatim() {
        // `$1` in the replacement must not be expanded as a group reference.
        let rules = bound(vec![ReplacementRule::new(regex!(r":(\w+)"), "$1")], &Context::new());
        assert_eq!(apply(":a", &rules), "$1");
    }

    #[test]
    fn later_rules_scan_earlier_output() {
        // Single concatenated pass: the second rule matches text the first
        // rule introduced.
        let rules = bound(
            vec![ReplacementRule::new(":stage", ":next"), ReplacementRule::new(":next", "done")],
            &Context::new(),
        );
        assert_eq!(apply(":stage", &rules), "done");
    }

    #[test]
    fn executor_folds_without_deduplicating() {
        // The executor applies exactly what it is given: the first rule
        // consumes the token and the duplicate becomes a no-op. Last-wins
        // shadowing happens upstream, at merge time (see dedup.rs).
        let rules = bound(
            vec![ReplacementRule::new(":a", "first"), ReplacementRule::new(":a", "second")],
            &Context::new(),
        );
        assert_eq!(apply(":a", &rules), "first");

        // A second rule matching the *replacement* text transforms it.
        let rules = bound(
            vec![ReplacementRule::new(":a", "first"), ReplacementRule::new("first", "second")],
            &Context::new(),
        );
        assert_eq!(apply(":a", &rules), "second");
    }

    #[test]
    fn empty_token_is_ignored() {
        let rules = bound(vec![ReplacementRule::new("", "boom")], &Context::new());
        assert_eq!(apply("abc", &rules), "abc");
    }

    #[test]
    fn traced_apply_counts_matches() {
        let rules = bound(
            vec![ReplacementRule::new(":x", "V"), ReplacementRule::new(":missing", "W")],
            &Context::new(),
        );
        let (out, steps) = apply_traced(":x/:x", &rules);

        assert_eq!(out, "V/V");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].matches, 2);
        assert_eq!(steps[0].pattern, ":x");
        assert_eq!(steps[1].matches, 0);
    }
}
