//! URL decomposition provider.
//!
//! Tokens use the `:(segment)` form of the original vocabulary, e.g.
//! `:(protocol)` or `:(pathname)`. The [`parser`] form reads the `url`
//! context field per call (falling back to [`UrlOptions::url`]); the
//! [`fragment`] form decomposes one concrete URL up front. Segments absent
//! from a URL (no port, no query, ...) resolve to `None`, leaving their
//! tokens visible.

use url::Url;

use crate::providers::slugify::Slugify;
use crate::{Context, Fragment, Replacement, RuleInput};

/// Options for the urls provider.
#[derive(Clone, Debug, Default)]
pub struct UrlOptions {
    /// Fallback URL used when the context has no `url` field.
    pub url: Option<String>,
    /// Transform applied to every produced value.
    pub slugify: Slugify,
}

/// Supported URL segments, mirroring the components of a parsed URL.
const SEGMENTS: [&str; 11] = [
    "protocol", "auth", "host", "hostname", "port", "pathname", "path", "search", "query", "hash",
    "href",
];

fn component(url: &Url, segment: &str) -> Option<String> {
    match segment {
        "protocol" => Some(format!("{}:", url.scheme())),
        "auth" => {
            if url.username().is_empty() && url.password().is_none() {
                None
            } else {
                Some(match url.password() {
                    Some(password) => format!("{}:{}", url.username(), password),
                    None => url.username().to_string(),
                })
            }
        }
        "host" => url.host_str().map(|host| match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }),
        "hostname" => url.host_str().map(str::to_string),
        "port" => url.port().map(|port| port.to_string()),
        "pathname" => Some(url.path().to_string()),
        "path" => Some(match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }),
        "search" => url.query().map(|query| format!("?{query}")),
        "query" => url.query().map(str::to_string),
        "hash" => url.fragment().map(|fragment| format!("#{fragment}")),
        "href" => Some(url.as_str().to_string()),
        _ => None,
    }
}

/// Parser over the URL tokens, reading the `url` context field.
pub fn parser(options: UrlOptions) -> RuleInput {
    RuleInput::Map(
        SEGMENTS
            .iter()
            .map(|&segment| {
                let options = options.clone();
                let replacement = Replacement::computed(move |ctx, _| {
                    let raw = ctx.str("url").map(str::to_owned).or_else(|| options.url.clone())?;
                    let url = Url::parse(&raw).ok()?;
                    component(&url, segment).map(|value| options.slugify.apply(&value))
                });
                (format!(":({segment})"), replacement)
            })
            .collect(),
    )
}

/// Context fragment decomposing one concrete URL. Unparsable input yields an
/// empty mapping.
pub fn fragment(url: &str, options: UrlOptions) -> Fragment {
    let url = url.to_string();
    Fragment::thunk(move || {
        let mut ctx = Context::new();
        if let Ok(parsed) = Url::parse(&url) {
            for segment in SEGMENTS {
                if let Some(value) = component(&parsed, segment) {
                    ctx.set(segment, options.slugify.apply(&value));
                }
            }
        }
        ctx
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strings;

    const URL: &str = "https://user:pw@example.com:8080/docs/page.html?a=1#top";

    #[test]
    fn parser_replaces_url_tokens() {
        let mut strings = Strings::new();
        strings.parser("url", parser(UrlOptions::default()));

        let ctx = context! { "url" => URL };
        let case = |template: &str| {
            strings.process(template, Some("url".into()), Some(&ctx)).unwrap()
        };

        assert_eq!(case(":(protocol)"), "https:");
        assert_eq!(case(":(auth)"), "user:pw");
        assert_eq!(case(":(host)"), "example.com:8080");
        assert_eq!(case(":(hostname)"), "example.com");
        assert_eq!(case(":(port)"), "8080");
        assert_eq!(case(":(pathname)"), "/docs/page.html");
        assert_eq!(case(":(path)"), "/docs/page.html?a=1");
        assert_eq!(case(":(search)"), "?a=1");
        assert_eq!(case(":(query)"), "a=1");
        assert_eq!(case(":(hash)"), "#top");
    }

    #[test]
    fn absent_segments_stay_literal() {
        let mut strings = Strings::new();
        strings.parser("url", parser(UrlOptions::default()));

        let ctx = context! { "url" => "https://example.com/" };
        let out = strings
            .process(":(hostname)/:(port)/:(query)", Some("url".into()), Some(&ctx))
            .unwrap();
        assert_eq!(out, "example.com/:(port)/:(query)");
    }

    #[test]
    fn option_url_is_the_fallback() {
        let mut strings = Strings::new();
        let options = UrlOptions { url: Some("http://fallback.dev/x".into()), ..Default::default() };
        strings.parser("url", parser(options));

        assert_eq!(
            strings.process(":(hostname)", Some("url".into()), None).unwrap(),
            "fallback.dev"
        );
    }

    #[test]
    fn fragment_maps_present_components() {
        let ctx = fragment(URL, UrlOptions::default()).resolve();

        assert_eq!(ctx.str("protocol"), Some("https:"));
        assert_eq!(ctx.str("hostname"), Some("example.com"));
        assert_eq!(ctx.str("hash"), Some("#top"));

        let empty = fragment("not a url", UrlOptions::default()).resolve();
        assert!(empty.is_empty());
    }
}
