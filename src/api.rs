//! Public engine facade.
//!
//! [`Strings`] owns the named stores (propstrings, patterns, replacements,
//! parsers, templates) and orchestrates the pipeline: resolve names, merge
//! parsers into one canonical rule sequence, bind the working context, and
//! apply the rules to the template text.
//!
//! Construct one engine and keep it; every instance has its own isolated
//! registry. Setters take `&mut self` and chain; processing takes `&self`.
//! The engine does no locking — an embedder sharing one instance across
//! threads must serialize mutation against concurrent reads.

use std::time::{Duration, Instant};

use crate::engine::{self, StepTrace};
use crate::registry::{Category, Store};
use crate::{
    Context, Error, Fragment, Matcher, ParserRef, Replacement, ReplacementRule, RuleInput,
};

/// A stored template: literal propstring text plus a parser reference,
/// replayable by name via [`Strings::run`].
///
/// The propstring reference is resolved to literal text at registration
/// time, not at run time.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub propstring: String,
    pub parsers: ParserRef,
}

/// Result of [`Strings::process_verbose`].
#[derive(Clone, Debug)]
pub struct ProcessDetails {
    /// The fully substituted string (identical to what
    /// [`Strings::process`] returns).
    pub output: String,
    /// Total elapsed time for the call.
    pub elapsed: Duration,
    /// One entry per applied rule, in application order.
    pub steps: Vec<StepTrace>,
}

/// The substitution engine.
///
/// # Example
/// ```
/// use propstring::{rules, Strings};
///
/// let mut strings = Strings::new();
/// strings.propstring("pretty", ":basename/index:ext");
///
/// let out = strings
///     .process("pretty", Some(rules! { ":basename" => "file", ":ext" => ".html" }.into()), None)
///     .unwrap();
/// assert_eq!(out, "file/index.html");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Strings {
    context: Context,
    middleware: Vec<Fragment>,
    propstrings: Store<String>,
    patterns: Store<Matcher>,
    replacements: Store<Replacement>,
    parsers: Store<RuleInput>,
    templates: Store<Template>,
    strict: bool,
}

impl Strings {
    pub fn new() -> Self {
        Strings::default()
    }

    /// Create an engine with a default context, merged under every call's
    /// own context.
    pub fn with_context(context: Context) -> Self {
        Strings { context, ..Strings::default() }
    }

    /// Toggle strict propstring lookups.
    ///
    /// By default an unregistered propstring name is treated as literal
    /// template text — a deliberate ergonomic shortcut that lets callers
    /// process ad-hoc templates without registering them first. In strict
    /// mode the same lookup is an unresolved sentinel and `process`/`run`
    /// return [`Error::UnknownPropstring`] instead.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    // --- Named stores -------------------------------------------------------

    /// Store a propstring (raw template text) under `name`, overwriting any
    /// existing entry.
    pub fn propstring(&mut self, name: &str, template: &str) -> &mut Self {
        self.propstrings.set(name, template.to_string());
        self
    }

    pub fn get_propstring(&self, name: &str) -> Option<&str> {
        self.propstrings.get(name).map(String::as_str)
    }

    /// Store a named pattern (literal token or regex).
    pub fn pattern(&mut self, name: &str, pattern: impl Into<Matcher>) -> &mut Self {
        self.patterns.set(name, pattern.into());
        self
    }

    pub fn get_pattern(&self, name: &str) -> Option<&Matcher> {
        self.patterns.get(name)
    }

    /// Store a named replacement (literal string or computed function).
    pub fn replacement(&mut self, name: &str, replacement: impl Into<Replacement>) -> &mut Self {
        self.replacements.set(name, replacement.into());
        self
    }

    pub fn get_replacement(&self, name: &str) -> Option<&Replacement> {
        self.replacements.get(name)
    }

    /// Compose a stored pattern and a stored replacement into a canonical
    /// rule. `None` if either name is unknown.
    pub fn rule(&self, pattern: &str, replacement: &str) -> Option<ReplacementRule> {
        Some(ReplacementRule {
            pattern: self.patterns.get(pattern)?.clone(),
            replacement: self.replacements.get(replacement)?.clone(),
        })
    }

    /// Store a named parser: a raw replacement-rule collection, kept
    /// pre-normalization exactly as given.
    pub fn parser(&mut self, name: &str, rules: impl Into<RuleInput>) -> &mut Self {
        self.parsers.set(name, rules.into());
        self
    }

    pub fn get_parser(&self, name: &str) -> Option<&RuleInput> {
        self.parsers.get(name)
    }

    /// Register a context fragment (a provider's mapping or thunk). Thunks
    /// are invoked when each call's working context is assembled.
    pub fn use_fragment(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.middleware.push(fragment.into());
        self
    }

    /// All stored names in `category`, in insertion order.
    pub fn names(&self, category: Category) -> Vec<String> {
        match category {
            Category::Propstrings => self.propstrings.names(),
            Category::Patterns => self.patterns.names(),
            Category::Replacements => self.replacements.names(),
            Category::Parsers => self.parsers.names(),
            Category::Templates => self.templates.names(),
        }
    }

    // --- Parser resolution --------------------------------------------------

    /// Resolve a parser reference into one merged canonical rule sequence.
    ///
    /// Merging concatenates in request order and then keeps the *last* rule
    /// per pattern, so later rules shadow earlier ones targeting the same
    /// placeholder. An unknown parser name contributes no rules, never an
    /// error.
    pub fn parsers(&self, parsers: &ParserRef) -> Vec<ReplacementRule> {
        engine::dedupe_last(self.collect_rules(parsers))
    }

    fn collect_rules(&self, parsers: &ParserRef) -> Vec<ReplacementRule> {
        match parsers {
            ParserRef::All => {
                self.parsers.iter().flat_map(|(_, input)| engine::normalize(input)).collect()
            }
            ParserRef::Named(name) => match self.parsers.get(name) {
                Some(input) => engine::normalize(input),
                None => {
                    log::debug!("parser `{name}` is not registered; contributing no rules");
                    Vec::new()
                }
            },
            ParserRef::Inline(input) => engine::normalize(input),
            ParserRef::List(refs) => refs.iter().flat_map(|r| self.collect_rules(r)).collect(),
        }
    }

    // --- Processing ---------------------------------------------------------

    /// Process a propstring (by name, falling back to literal text) with the
    /// given parsers and context.
    ///
    /// `parsers` is required: `None` models the omitted argument of a
    /// one-argument call and fails with [`Error::MissingParsers`], since a
    /// bare template reference cannot distinguish "fetch the stored text"
    /// from "process with no parsers". Pass [`ParserRef::All`] to use every
    /// registered parser.
    pub fn process(
        &self,
        propstring: &str,
        parsers: Option<ParserRef>,
        context: Option<&Context>,
    ) -> Result<String, Error> {
        let parsers = parsers.ok_or(Error::MissingParsers)?;
        let text = self.resolve_propstring(propstring)?;
        Ok(self.process_text(text, &parsers, context))
    }

    /// Like [`process`](Strings::process), additionally returning the
    /// per-rule trace and elapsed time. The default path allocates none of
    /// this.
    pub fn process_verbose(
        &self,
        propstring: &str,
        parsers: Option<ParserRef>,
        context: Option<&Context>,
    ) -> Result<ProcessDetails, Error> {
        let start = Instant::now();
        let parsers = parsers.ok_or(Error::MissingParsers)?;
        let text = self.resolve_propstring(propstring)?;

        let rules = self.parsers(&parsers);
        let bound = engine::bind(&rules, &self.working_context(context));
        let (output, steps) = engine::apply_traced(text, &bound);

        Ok(ProcessDetails { output, elapsed: start.elapsed(), steps })
    }

    /// Register a named template: a propstring reference plus a parser
    /// reference, replayable via [`run`](Strings::run).
    ///
    /// The propstring reference is resolved immediately, at registration
    /// time. `parsers` is required: registering a template from a bare
    /// string with no parser reference is ambiguous with direct template
    /// text and fails with [`Error::TemplateWithoutParsers`].
    pub fn template(
        &mut self,
        name: &str,
        propstring: &str,
        parsers: Option<ParserRef>,
    ) -> Result<&mut Self, Error> {
        let Some(parsers) = parsers else {
            return Err(Error::TemplateWithoutParsers { name: name.to_string() });
        };
        let text = self.resolve_propstring(propstring)?.to_string();
        self.templates.set(name, Template { propstring: text, parsers });
        Ok(self)
    }

    /// Store a prebuilt template pairing under `name`. The pairing's
    /// propstring reference is resolved immediately, like
    /// [`template`](Strings::template).
    pub fn set_template(&mut self, name: &str, template: Template) -> Result<&mut Self, Error> {
        let text = self.resolve_propstring(&template.propstring)?.to_string();
        self.templates.set(name, Template { propstring: text, parsers: template.parsers });
        Ok(self)
    }

    pub fn get_template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Process the named template with its stored propstring text and parser
    /// reference.
    ///
    /// An unknown template name is not fatal: the name falls through to
    /// [`process`](Strings::process) with every registered parser, where the
    /// propstring fallback policy applies.
    pub fn run(&self, name: &str, context: Option<&Context>) -> Result<String, Error> {
        match self.templates.get(name) {
            Some(template) => Ok(self.process_text(&template.propstring, &template.parsers, context)),
            None => {
                log::debug!("template `{name}` is not registered; processing as propstring");
                self.process(name, Some(ParserRef::All), context)
            }
        }
    }

    // --- Internals ----------------------------------------------------------

    /// Propstring fallback policy: stored text, else the name itself as
    /// literal template text, else (strict mode) an error.
    fn resolve_propstring<'a>(&'a self, name: &'a str) -> Result<&'a str, Error> {
        match self.propstrings.get(name) {
            Some(text) => Ok(text),
            None if self.strict => Err(Error::UnknownPropstring { name: name.to_string() }),
            None => Ok(name),
        }
    }

    fn process_text(&self, text: &str, parsers: &ParserRef, context: Option<&Context>) -> String {
        let rules = self.parsers(parsers);
        log::debug!("processing {} byte(s) with {} rule(s)", text.len(), rules.len());
        let bound = engine::bind(&rules, &self.working_context(context));
        engine::apply(text, &bound)
    }

    /// Assemble the working context for one call: engine default, then
    /// fragments in `use_fragment` order, then the per-call context; later
    /// entries win.
    fn working_context(&self, call: Option<&Context>) -> Context {
        let mut ctx = self.context.clone();
        for fragment in &self.middleware {
            ctx.merge(&fragment.resolve());
        }
        if let Some(call) = call {
            ctx.merge(call);
        }
        ctx
    }
}
