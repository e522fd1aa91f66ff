//! Date-formatting provider.
//!
//! [`parser`] yields one rule per token in a fixed vocabulary (`:date`,
//! `:year`, `:MM`, `:dddd`, ...), each formatting the `date` context field.
//! Tokens are matched with word-boundary regexes so short names never clip
//! longer ones (`:m` leaves `:minute` alone). Without a date in the context
//! every token stays literal.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::providers::slugify::Slugify;
use crate::{Matcher, Replacement, ReplacementRule, RuleInput};

/// Options for the dates provider.
#[derive(Clone, Debug, Default)]
pub struct DateOptions {
    /// Transform applied to every produced value.
    pub slugify: Slugify,
}

type Formatter = fn(&NaiveDateTime) -> String;

/// The token vocabulary. Grouped like the calendar: full dates, years,
/// months, days, weekdays, then clock fields.
static DATE_TOKENS: &[(&str, Formatter)] = &[
    ("date", |d| d.format("%Y/%m/%d").to_string()),
    ("L", |d| d.format("%m/%d/%Y").to_string()),
    ("1", |d| d.format("%-m/%-d/%Y").to_string()),
    ("year", |d| d.format("%Y").to_string()),
    ("YYYY", |d| d.format("%Y").to_string()),
    ("YY", |d| d.format("%y").to_string()),
    ("monthname", |d| d.format("%B").to_string()),
    ("MMMM", |d| d.format("%B").to_string()),
    ("MMM", |d| d.format("%b").to_string()),
    ("month", |d| d.format("%m").to_string()),
    ("MM", |d| d.format("%m").to_string()),
    ("mo", |d| d.format("%m").to_string()),
    ("M", |d| d.format("%-m").to_string()),
    ("DDDD", |d| d.format("%j").to_string()),
    ("DDD", |d| d.format("%-j").to_string()),
    ("day", |d| d.format("%d").to_string()),
    ("DD", |d| d.format("%d").to_string()),
    ("D", |d| d.format("%-d").to_string()),
    ("dddd", |d| d.format("%A").to_string()),
    ("ddd", |d| d.format("%a").to_string()),
    ("dd", |d| d.format("%a").to_string().chars().take(2).collect()),
    ("d", |d| d.format("%w").to_string()),
    ("hour", |d| d.format("%H").to_string()),
    ("HH", |d| d.format("%H").to_string()),
    ("H", |d| d.format("%-H").to_string()),
    ("hh", |d| d.format("%I").to_string()),
    ("h", |d| d.format("%-I").to_string()),
    ("minute", |d| d.format("%M").to_string()),
    ("min", |d| d.format("%M").to_string()),
    ("mm", |d| d.format("%M").to_string()),
    ("m", |d| d.format("%-M").to_string()),
    ("second", |d| d.format("%S").to_string()),
    ("sec", |d| d.format("%S").to_string()),
    ("ss", |d| d.format("%S").to_string()),
    ("s", |d| d.format("%-S").to_string()),
    ("A", |d| d.format("%p").to_string()),
    ("a", |d| d.format("%P").to_string()),
];

/// Token patterns, compiled once. Tokens are alphanumeric crate constants,
/// so every pattern compiles.
static DATE_RULES: Lazy<Vec<(Regex, Formatter)>> = Lazy::new(|| {
    DATE_TOKENS
        .iter()
        .map(|&(token, format)| (Regex::new(&format!(r":\b{token}\b")).unwrap(), format))
        .collect()
});

/// Parser over the date tokens, reading the `date` context field.
pub fn parser(options: DateOptions) -> RuleInput {
    RuleInput::List(
        DATE_RULES
            .iter()
            .map(|(pattern, format)| {
                let options = options.clone();
                let format = *format;
                RuleInput::Record(ReplacementRule {
                    pattern: Matcher::Regex(pattern.clone()),
                    replacement: Replacement::computed(move |ctx, _| {
                        ctx.date("date").map(|d| options.slugify.apply(&format(&d)))
                    }),
                })
            })
            .collect(),
    )
}
