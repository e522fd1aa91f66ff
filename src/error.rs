use thiserror::Error;

/// Errors raised by the engine.
///
/// Only API-misuse conditions are fatal. Unknown names and unresolved
/// placeholders degrade to documented fallbacks instead of erroring, so in
/// the default configuration the substitution pipeline always produces a
/// string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `process` was called without a parser reference. Pass
    /// [`ParserRef::All`](crate::ParserRef::All) to use every registered
    /// parser explicitly.
    #[error("process requires a parser reference (use ParserRef::All for every registered parser)")]
    MissingParsers,

    /// A template was registered with a propstring reference but no parser
    /// reference, which is ambiguous with direct template text.
    #[error("template `{name}` registered without a parser reference")]
    TemplateWithoutParsers { name: String },

    /// Strict-mode lookup of a propstring name that was never registered.
    #[error("unknown propstring `{name}`")]
    UnknownPropstring { name: String },
}
