extern crate self as propstring;

use std::fmt;
use std::sync::Arc;

use regex::Regex;

#[macro_use]
mod macros;

mod api;
mod context;
mod engine;
mod error;
mod registry;
pub mod providers;

pub use api::{ProcessDetails, Strings, Template};
pub use context::{Context, ContextValue, Fragment};
pub use engine::StepTrace;
pub use error::Error;
pub use registry::Category;

// --- Core data model --------------------------------------------------------

/// The pattern half of a replacement rule.
///
/// A literal token is matched verbatim and every occurrence is replaced. A
/// regular expression replaces every match (global semantics, regardless of
/// how the regex was constructed).
#[derive(Clone, Debug)]
pub enum Matcher {
    Literal(String),
    Regex(Regex),
}

impl Matcher {
    /// Printable form of the pattern, used in traces and logs.
    pub fn display(&self) -> &str {
        match self {
            Matcher::Literal(token) => token,
            Matcher::Regex(re) => re.as_str(),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Literal(a), Matcher::Literal(b)) => a == b,
            (Matcher::Regex(a), Matcher::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<&str> for Matcher {
    fn from(token: &str) -> Self {
        Matcher::Literal(token.to_string())
    }
}

impl From<String> for Matcher {
    fn from(token: String) -> Self {
        Matcher::Literal(token)
    }
}

impl From<Regex> for Matcher {
    fn from(re: Regex) -> Self {
        Matcher::Regex(re)
    }
}

impl From<&Regex> for Matcher {
    fn from(re: &Regex) -> Self {
        Matcher::Regex(re.clone())
    }
}

/// Text consumed by a single match, handed to computed replacements.
///
/// For regex matchers, `group(i)` exposes positional capture groups (0-based,
/// excluding the full match). Literal matchers carry no groups.
#[derive(Debug)]
pub struct Match<'t> {
    full: &'t str,
    groups: Vec<Option<&'t str>>,
}

impl<'t> Match<'t> {
    pub(crate) fn literal(full: &'t str) -> Self {
        Match { full, groups: Vec::new() }
    }

    pub(crate) fn from_captures(caps: &regex::Captures<'t>) -> Self {
        Match {
            full: caps.get(0).map(|m| m.as_str()).unwrap_or(""),
            groups: caps.iter().skip(1).map(|g| g.map(|m| m.as_str())).collect(),
        }
    }

    /// The full matched text.
    pub fn full(&self) -> &'t str {
        self.full
    }

    /// Positional capture group, if it participated in the match.
    pub fn group(&self, index: usize) -> Option<&'t str> {
        self.groups.get(index).copied().flatten()
    }

    /// Number of capture groups the pattern declared.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Signature of a computed replacement.
///
/// The bound context is passed explicitly as the first argument (there is no
/// implicit receiver); the second argument describes the match. Returning
/// `None` means "no resolvable value": the matched text is left in place
/// unchanged, so unresolved tokens stay visible in the output.
pub type ReplacementFn = Arc<dyn Fn(&Context, &Match<'_>) -> Option<String> + Send + Sync>;

/// The replacement half of a rule: a literal string or a computed value.
#[derive(Clone)]
pub enum Replacement {
    Literal(String),
    Computed(ReplacementFn),
}

impl Replacement {
    /// Wrap a function as a computed replacement.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Context, &Match<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Replacement::Computed(Arc::new(f))
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Replacement::Computed(_) => f.debug_tuple("Computed").field(&"<fn>").finish(),
        }
    }
}

impl PartialEq for Replacement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Replacement::Literal(a), Replacement::Literal(b)) => a == b,
            (Replacement::Computed(a), Replacement::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Replacement {
    fn from(s: &str) -> Self {
        Replacement::Literal(s.to_string())
    }
}

impl From<String> for Replacement {
    fn from(s: String) -> Self {
        Replacement::Literal(s)
    }
}

/// A canonical replacement rule: what to match and what to substitute.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplacementRule {
    pub pattern: Matcher,
    pub replacement: Replacement,
}

impl ReplacementRule {
    pub fn new(pattern: impl Into<Matcher>, replacement: impl Into<Replacement>) -> Self {
        ReplacementRule { pattern: pattern.into(), replacement: replacement.into() }
    }
}

/// Replacement-rule input before normalization.
///
/// Callers may hand the engine a bare token→value mapping, an explicit
/// pattern/replacement record, or a list mixing both; the pattern normalizer
/// flattens any of these into a canonical `ReplacementRule` sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RuleInput {
    /// No rules at all; normalizes to an empty sequence.
    #[default]
    Empty,
    /// A bare mapping. Keys become literal matchers, in insertion order.
    Map(Vec<(String, Replacement)>),
    /// An already-canonical record; passed through unchanged.
    Record(ReplacementRule),
    /// A list mixing any of the above; expansions are concatenated.
    List(Vec<RuleInput>),
}

impl From<ReplacementRule> for RuleInput {
    fn from(rule: ReplacementRule) -> Self {
        RuleInput::Record(rule)
    }
}

impl From<Vec<ReplacementRule>> for RuleInput {
    fn from(rules: Vec<ReplacementRule>) -> Self {
        RuleInput::List(rules.into_iter().map(RuleInput::Record).collect())
    }
}

impl From<Vec<(String, Replacement)>> for RuleInput {
    fn from(pairs: Vec<(String, Replacement)>) -> Self {
        RuleInput::Map(pairs)
    }
}

impl From<Vec<RuleInput>> for RuleInput {
    fn from(inputs: Vec<RuleInput>) -> Self {
        RuleInput::List(inputs)
    }
}

/// How a call names the parsers to apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ParserRef {
    /// Every registered parser, merged in registration order.
    #[default]
    All,
    /// One named parser. An unknown name contributes no rules.
    Named(String),
    /// An ad-hoc parser, normalized directly without a registry lookup.
    Inline(RuleInput),
    /// Several references merged in request order; later rules shadow
    /// earlier ones applied to the same span.
    List(Vec<ParserRef>),
}

impl ParserRef {
    pub fn named(name: impl Into<String>) -> Self {
        ParserRef::Named(name.into())
    }
}

impl From<&str> for ParserRef {
    fn from(name: &str) -> Self {
        ParserRef::Named(name.to_string())
    }
}

impl From<String> for ParserRef {
    fn from(name: String) -> Self {
        ParserRef::Named(name)
    }
}

impl From<RuleInput> for ParserRef {
    fn from(input: RuleInput) -> Self {
        ParserRef::Inline(input)
    }
}

impl From<ReplacementRule> for ParserRef {
    fn from(rule: ReplacementRule) -> Self {
        ParserRef::Inline(RuleInput::Record(rule))
    }
}

impl From<Vec<ParserRef>> for ParserRef {
    fn from(refs: Vec<ParserRef>) -> Self {
        ParserRef::List(refs)
    }
}
