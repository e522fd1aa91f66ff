//! File-path decomposition provider.
//!
//! Two forms, matching the uniform provider interface:
//!
//! - [`parser`] yields rules for `:basename`, `:filename`, `:ext` and
//!   `:dir`, computed per call from the `filepath` context field (falling
//!   back to [`PathOptions::filepath`]).
//! - [`fragment`] decomposes one concrete path up front and yields the
//!   `basename`/`filename`/`ext`/`dir` mapping behind a thunk.

use std::path::Path;

use crate::providers::slugify::Slugify;
use crate::{Context, Fragment, Replacement, RuleInput};

/// Options for the paths provider.
#[derive(Clone, Debug, Default)]
pub struct PathOptions {
    /// Fallback path used when the context has no `filepath` field.
    pub filepath: Option<String>,
    /// Transform applied to every produced value.
    pub slugify: Slugify,
}

#[derive(Clone, Copy)]
enum Part {
    Basename,
    Filename,
    Ext,
    Dir,
}

impl Part {
    fn token(self) -> &'static str {
        match self {
            Part::Basename => ":basename",
            Part::Filename => ":filename",
            Part::Ext => ":ext",
            Part::Dir => ":dir",
        }
    }

    fn key(self) -> &'static str {
        // Fragment keys drop the token sigil.
        &self.token()[1..]
    }

    fn extract(self, filepath: &str) -> String {
        let path = Path::new(filepath);
        match self {
            Part::Basename => {
                path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
            }
            Part::Filename => {
                path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
            }
            Part::Ext => match path.extension() {
                Some(ext) => format!(".{}", ext.to_string_lossy()),
                None => String::new(),
            },
            Part::Dir => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    parent.to_string_lossy().into_owned()
                }
                // Bare filenames live in the current directory.
                _ => ".".to_string(),
            },
        }
    }
}

const PARTS: [Part; 4] = [Part::Basename, Part::Filename, Part::Ext, Part::Dir];

/// Parser over the path tokens, reading the `filepath` context field.
pub fn parser(options: PathOptions) -> RuleInput {
    RuleInput::Map(
        PARTS
            .iter()
            .map(|&part| {
                let options = options.clone();
                let replacement = Replacement::computed(move |ctx, _| {
                    let filepath =
                        ctx.str("filepath").map(str::to_owned).or_else(|| options.filepath.clone())?;
                    Some(options.slugify.apply(&part.extract(&filepath)))
                });
                (part.token().to_string(), replacement)
            })
            .collect(),
    )
}

/// Context fragment decomposing one concrete path.
pub fn fragment(filepath: &str, options: PathOptions) -> Fragment {
    let filepath = filepath.to_string();
    Fragment::thunk(move || {
        let mut ctx = Context::new();
        for part in PARTS {
            ctx.set(part.key(), options.slugify.apply(&part.extract(&filepath)));
        }
        ctx
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strings;

    #[test]
    fn parser_replaces_path_tokens() {
        let mut strings = Strings::new();
        strings.parser("path", parser(PathOptions::default()));

        let ctx = context! { "filepath" => "/path/to/foo.html" };
        let case = |template: &str| {
            strings.process(template, Some("path".into()), Some(&ctx)).unwrap()
        };

        assert_eq!(case(":basename"), "foo");
        assert_eq!(case(":filename"), "foo.html");
        assert_eq!(case(":ext"), ".html");
        assert_eq!(case(":dir"), "/path/to");
    }

    #[test]
    fn parser_falls_back_to_option_filepath() {
        let mut strings = Strings::new();
        let options = PathOptions { filepath: Some("a/b.html".into()), ..Default::default() };
        strings.parser("path", parser(options));

        assert_eq!(
            strings.process(":basename/index:ext", Some("path".into()), None).unwrap(),
            "b/index.html"
        );
    }

    #[test]
    fn tokens_stay_literal_without_a_filepath() {
        let mut strings = Strings::new();
        strings.parser("path", parser(PathOptions::default()));

        assert_eq!(strings.process(":basename", Some("path".into()), None).unwrap(), ":basename");
    }

    #[test]
    fn bare_filename_edges() {
        assert_eq!(Part::Dir.extract("foo.html"), ".");
        assert_eq!(Part::Ext.extract("foo"), "");
        assert_eq!(Part::Basename.extract("foo"), "foo");
    }

    #[test]
    fn fragment_produces_slugified_mapping() {
        let fragment = fragment("/path/to/My File.html", PathOptions {
            filepath: None,
            slugify: Slugify::Default,
        });
        let ctx = fragment.resolve();

        assert_eq!(ctx.str("basename"), Some("my-file"));
        assert_eq!(ctx.str("filename"), Some("my-file-html"));
        assert_eq!(ctx.str("ext"), Some("html"));
        assert_eq!(ctx.str("dir"), Some("path-to"));
    }
}
