//! Route template compilation and path matching.

use crate::error::{PatternError, Result};

/// A piece of a compiled route template.
///
/// Templates are tokenized into literal text (matched exactly, slashes
/// included) and named parameters (each capturing one or more non-slash
/// characters, shortest capture first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, matched exactly.
    Literal(String),
    /// A named parameter (e.g. `{id}`).
    Param(String),
}

/// Parameters extracted from a matched path.
///
/// Preserves the order in which placeholders appear in the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Gets a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no parameters were extracted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates parameters in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

/// Outcome of matching one path against one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The path does not match the pattern.
    NoMatch,
    /// The path matches a pattern with no placeholders.
    Matched,
    /// The path matches and placeholder values were extracted.
    MatchedParams(Params),
}

/// A compiled, immutable route template.
///
/// Two patterns are equal when their template strings are equal; equality
/// is table identity, not match equivalence.
///
/// # Example
///
/// ```
/// use rill_router::{MatchOutcome, RoutePattern};
///
/// let pattern = RoutePattern::compile("/posts/{id}/comments/{comment_id}").unwrap();
/// match pattern.matches("/posts/123/comments/456") {
///     MatchOutcome::MatchedParams(params) => {
///         assert_eq!(params.get("id"), Some("123"));
///         assert_eq!(params.get("comment_id"), Some("456"));
///     }
///     outcome => panic!("unexpected outcome: {outcome:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
    param_names: Vec<String>,
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for RoutePattern {}

impl std::hash::Hash for RoutePattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.template.hash(state);
    }
}

impl RoutePattern {
    /// Compiles a route template.
    ///
    /// Template syntax: literal path text with zero or more `{name}`
    /// placeholders, each matching one non-empty run of non-slash
    /// characters. Placeholder names must be non-empty and unique within
    /// the template.
    pub fn compile(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut param_names: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(ch) = chars.next() {
            if ch != '{' {
                literal.push(ch);
                continue;
            }

            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if !closed {
                return Err(PatternError::UnterminatedParam {
                    template: template.to_string(),
                });
            }
            if name.is_empty() {
                return Err(PatternError::EmptyParam {
                    template: template.to_string(),
                });
            }
            if param_names.contains(&name) {
                return Err(PatternError::DuplicateParam {
                    template: template.to_string(),
                    name,
                });
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            param_names.push(name.clone());
            segments.push(Segment::Param(name));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
            param_names,
        })
    }

    /// Returns the original template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the placeholder names in template order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns the compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matches a concrete path against this pattern.
    ///
    /// Matching is anchored at both ends: the whole path must be consumed.
    pub fn matches(&self, path: &str) -> MatchOutcome {
        let mut params = Params::new();
        if !match_segments(&self.segments, path, &mut params) {
            return MatchOutcome::NoMatch;
        }
        if params.is_empty() {
            MatchOutcome::Matched
        } else {
            MatchOutcome::MatchedParams(params)
        }
    }
}

/// Walks template segments against the remaining path.
///
/// Parameters capture the shortest run of one or more non-slash characters
/// that lets the rest of the template match, backtracking as needed.
fn match_segments(segments: &[Segment], path: &str, params: &mut Params) -> bool {
    match segments.split_first() {
        None => path.is_empty(),
        Some((Segment::Literal(lit), rest)) => match path.strip_prefix(lit.as_str()) {
            Some(remainder) => match_segments(rest, remainder, params),
            None => false,
        },
        Some((Segment::Param(name), rest)) => {
            let limit = path.find('/').unwrap_or(path.len());
            let checkpoint = params.len();
            for (idx, ch) in path[..limit].char_indices() {
                let end = idx + ch.len_utf8();
                params.insert(name.clone(), &path[..end]);
                if match_segments(rest, &path[end..], params) {
                    return true;
                }
                params.truncate(checkpoint);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_path() {
        let pattern = RoutePattern::compile("/users").unwrap();
        assert_eq!(pattern.matches("/users"), MatchOutcome::Matched);
        assert_eq!(pattern.matches("/users/"), MatchOutcome::NoMatch);
        assert_eq!(pattern.matches("/posts"), MatchOutcome::NoMatch);
    }

    #[test]
    fn single_param() {
        let pattern = RoutePattern::compile("/users/{id}").unwrap();
        match pattern.matches("/users/123") {
            MatchOutcome::MatchedParams(params) => {
                assert_eq!(params.get("id"), Some("123"));
                assert_eq!(params.len(), 1);
            }
            outcome => panic!("unexpected outcome: {outcome:?}"),
        }
    }

    #[test]
    fn multiple_params() {
        let pattern = RoutePattern::compile("/repo/{idx}/issues/{label}").unwrap();
        match pattern.matches("/repo/42/issues/bug") {
            MatchOutcome::MatchedParams(params) => {
                assert_eq!(params.get("idx"), Some("42"));
                assert_eq!(params.get("label"), Some("bug"));
                let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
                assert_eq!(names, ["idx", "label"]);
            }
            outcome => panic!("unexpected outcome: {outcome:?}"),
        }
    }

    #[test]
    fn param_does_not_span_slashes() {
        let pattern = RoutePattern::compile("/users/{id}").unwrap();
        assert_eq!(pattern.matches("/users/1/posts"), MatchOutcome::NoMatch);
    }

    #[test]
    fn param_must_be_non_empty() {
        let pattern = RoutePattern::compile("/users/{id}").unwrap();
        assert_eq!(pattern.matches("/users/"), MatchOutcome::NoMatch);
    }

    #[test]
    fn match_is_anchored() {
        let pattern = RoutePattern::compile("/users/{id}").unwrap();
        assert_eq!(pattern.matches("/prefix/users/1"), MatchOutcome::NoMatch);
        assert_eq!(pattern.matches("/users/1/"), MatchOutcome::NoMatch);
    }

    #[test]
    fn literal_text_is_not_pattern_syntax() {
        // Characters that are regex metacharacters must match literally.
        let pattern = RoutePattern::compile("/v1.0/items+all/{id}").unwrap();
        assert!(matches!(
            pattern.matches("/v1.0/items+all/7"),
            MatchOutcome::MatchedParams(_)
        ));
        assert_eq!(pattern.matches("/v1X0/items+all/7"), MatchOutcome::NoMatch);
    }

    #[test]
    fn two_params_in_one_path_segment() {
        // Shortest capture first: {x} takes the minimal run.
        let pattern = RoutePattern::compile("/a/{x}-{y}").unwrap();
        match pattern.matches("/a/b-c-d") {
            MatchOutcome::MatchedParams(params) => {
                assert_eq!(params.get("x"), Some("b"));
                assert_eq!(params.get("y"), Some("c-d"));
            }
            outcome => panic!("unexpected outcome: {outcome:?}"),
        }
    }

    #[test]
    fn empty_param_name_rejected() {
        assert_eq!(
            RoutePattern::compile("/users/{}"),
            Err(PatternError::EmptyParam {
                template: "/users/{}".to_string()
            })
        );
    }

    #[test]
    fn duplicate_param_name_rejected() {
        assert_eq!(
            RoutePattern::compile("/{id}/copy/{id}"),
            Err(PatternError::DuplicateParam {
                template: "/{id}/copy/{id}".to_string(),
                name: "id".to_string()
            })
        );
    }

    #[test]
    fn unterminated_param_rejected() {
        assert_eq!(
            RoutePattern::compile("/users/{id"),
            Err(PatternError::UnterminatedParam {
                template: "/users/{id".to_string()
            })
        );
    }

    #[test]
    fn pattern_identity_is_the_template_string() {
        let a = RoutePattern::compile("/users/{id}").unwrap();
        let b = RoutePattern::compile("/users/{id}").unwrap();
        let c = RoutePattern::compile("/users/{name}").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unicode_param_values() {
        let pattern = RoutePattern::compile("/hello/{name}").unwrap();
        match pattern.matches("/hello/día") {
            MatchOutcome::MatchedParams(params) => {
                assert_eq!(params.get("name"), Some("día"));
            }
            outcome => panic!("unexpected outcome: {outcome:?}"),
        }
    }
}
