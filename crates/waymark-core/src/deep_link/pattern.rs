//! Template-based deep-link handler
//!
//! A [`RoutePattern`] such as `myapp://orders/{order_id}/items/{item}` matches
//! URIs with the same scheme and segment count, capturing `{...}` segments.
//! Query parameters are captured too; path captures win on name clashes.

use super::manager::DeepLinkHandler;
use crate::types::NavigationCommand;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parameters captured while matching a URI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: BTreeMap<String, String>,
}

impl RouteParams {
    /// Get a captured value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterate over all captures in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parsed `scheme://segment/{param}` template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    scheme: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a template. A template without `://` matches any scheme-less URI.
    pub fn parse(template: &str) -> Self {
        let (scheme, rest) = split_scheme(template);
        let segments = split_path(rest)
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(segment.to_string()),
                }
            })
            .collect();
        Self {
            scheme: scheme.to_ascii_lowercase(),
            segments,
        }
    }

    /// Match `uri`, returning its captures.
    pub fn captures(&self, uri: &str) -> Option<RouteParams> {
        let (without_fragment, _) = uri.split_once('#').unwrap_or((uri, ""));
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        let (scheme, rest) = split_scheme(path);
        if !scheme.eq_ignore_ascii_case(&self.scheme) {
            return None;
        }

        let parts: Vec<&str> = split_path(rest).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut values = BTreeMap::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values.insert(percent_decode(key, true), percent_decode(value, true));
        }

        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    values.insert(name.clone(), percent_decode(part, false));
                }
            }
        }

        Some(RouteParams { values })
    }
}

fn split_scheme(uri: &str) -> (&str, &str) {
    uri.split_once("://").unwrap_or(("", uri))
}

fn split_path(rest: &str) -> impl Iterator<Item = &str> {
    rest.split('/').filter(|segment| !segment.is_empty())
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim.
///
/// `+` means a space only in form-encoded query strings; in a path it is a
/// literal `+`.
fn percent_decode(raw: &str, plus_as_space: bool) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

type CommandBuilder = dyn Fn(&RouteParams) -> Vec<NavigationCommand> + Send + Sync;

/// Deep-link handler backed by a [`RoutePattern`].
#[derive(Clone)]
pub struct PatternHandler {
    pattern: RoutePattern,
    build: Arc<CommandBuilder>,
}

impl PatternHandler {
    /// Handle URIs matching `template`, building commands from the captures.
    pub fn new<F>(template: &str, build: F) -> Self
    where
        F: Fn(&RouteParams) -> Vec<NavigationCommand> + Send + Sync + 'static,
    {
        Self {
            pattern: RoutePattern::parse(template),
            build: Arc::new(build),
        }
    }

    /// The parsed template
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }
}

impl fmt::Debug for PatternHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternHandler")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl DeepLinkHandler for PatternHandler {
    fn matches(&self, uri: &str) -> bool {
        self.pattern.captures(uri).is_some()
    }

    fn resolve(&self, uri: &str) -> Vec<NavigationCommand> {
        match self.pattern.captures(uri) {
            Some(params) => (self.build)(&params),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BackStackEntry;

    #[test]
    fn test_literal_match() {
        let pattern = RoutePattern::parse("myapp://settings");
        assert!(pattern.captures("myapp://settings").is_some());
        assert!(pattern.captures("MYAPP://settings/").is_some());
        assert!(pattern.captures("myapp://profile").is_none());
        assert!(pattern.captures("other://settings").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = RoutePattern::parse("myapp://orders/{order}/items/{item}");
        let params = pattern.captures("myapp://orders/42/items/a%20b").unwrap();
        assert_eq!(params.get("order"), Some("42"));
        assert_eq!(params.get("item"), Some("a b"));
        assert!(pattern.captures("myapp://orders/42").is_none());
    }

    #[test]
    fn test_plus_is_literal_in_path() {
        let pattern = RoutePattern::parse("myapp://tag/{name}");
        let params = pattern.captures("myapp://tag/c++?q=a+b").unwrap();
        assert_eq!(params.get("name"), Some("c++"));
        assert_eq!(params.get("q"), Some("a b"));
    }

    #[test]
    fn test_query_params() {
        let pattern = RoutePattern::parse("myapp://search");
        let params = pattern.captures("myapp://search?q=rust+nav&page=2#top").unwrap();
        assert_eq!(params.get("q"), Some("rust nav"));
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_path_capture_wins_over_query() {
        let pattern = RoutePattern::parse("myapp://user/{id}");
        let params = pattern.captures("myapp://user/7?id=9").unwrap();
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_malformed_escape_kept() {
        assert_eq!(percent_decode("100%", false), "100%");
        assert_eq!(percent_decode("%zz", false), "%zz");
        assert_eq!(percent_decode("%41", false), "A");
    }

    #[test]
    fn test_handler_builds_commands() {
        let handler = PatternHandler::new("myapp://details/{id}", |params| {
            let args = format!("{{\"id\":\"{}\"}}", params.get("id").unwrap_or_default());
            vec![
                NavigationCommand::replace_root(BackStackEntry::shared("home")),
                NavigationCommand::navigate(BackStackEntry::new("details").with_args(args)),
            ]
        });

        assert!(handler.matches("myapp://details/5"));
        let commands = handler.resolve("myapp://details/5");
        assert_eq!(commands.len(), 2);
        match &commands[1] {
            NavigationCommand::Navigate { entry, .. } => {
                assert_eq!(entry.args.as_deref(), Some("{\"id\":\"5\"}"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
