#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`RuleInput`](crate::RuleInput) mapping from `token => replacement`
/// entries. Values may be string literals or prebuilt
/// [`Replacement`](crate::Replacement)s.
#[macro_export]
macro_rules! rules {
    () => {
        $crate::RuleInput::Empty
    };
    ( $($token:expr => $replacement:expr),+ $(,)? ) => {
        $crate::RuleInput::Map(vec![
            $( (::std::string::String::from($token), $crate::Replacement::from($replacement)) ),+
        ])
    };
}

/// Build a [`Context`](crate::Context) from `name => value` entries.
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ( $($name:expr => $value:expr),+ $(,)? ) => {{
        let mut ctx = $crate::Context::new();
        $( ctx.set($name, $value); )+
        ctx
    }};
}
