//! Route path patterns and extracted path variables.
//!
//! A pattern such as `/api/user/{id}` is split on `/` into literal and
//! variable segments. A request path matches when it has the same number of
//! segments, every literal is equal, and every variable binds one non-empty
//! segment.

use std::fmt;

/// Errors raised while parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("route pattern `{pattern}` must start with `/`")]
    MissingLeadingSlash { pattern: String },
    #[error("route pattern `{pattern}` has an unnamed variable segment")]
    EmptyVariableName { pattern: String },
    #[error("route pattern `{pattern}` has a malformed segment `{segment}`")]
    MalformedSegment { pattern: String, segment: String },
    #[error("route pattern `{pattern}` binds `{name}` more than once")]
    DuplicateVariable { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// Parsed route pattern.
///
/// # Examples
/// ```
/// use user_service::inbound::http::path::PathPattern;
///
/// let pattern = PathPattern::parse("/api/user/{id}").expect("valid pattern");
/// let params = pattern.matches("/api/user/abc123").expect("path matches");
/// assert_eq!(params.get("id"), Some("abc123"));
/// assert!(pattern.matches("/api/user/").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse `pattern`.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the pattern does not start with `/`, or
    /// when a segment contains stray braces, an empty `{}` or a repeated
    /// variable name.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash {
                pattern: pattern.to_owned(),
            });
        };

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            let parsed = parse_segment(pattern, segment)?;
            if let Segment::Variable(name) = &parsed {
                let repeated = segments
                    .iter()
                    .any(|seen| matches!(seen, Segment::Variable(other) if other == name));
                if repeated {
                    return Err(PatternError::DuplicateVariable {
                        pattern: pattern.to_owned(),
                        name: name.clone(),
                    });
                }
            }
            segments.push(parsed);
        }

        Ok(Self {
            raw: pattern.to_owned(),
            segments,
        })
    }

    /// Match `path`, returning the bound variables on success.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;
        let mut params = PathParams::default();
        let mut parts = rest.split('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable(_) if part.is_empty() => return None,
                Segment::Variable(name) => params.push(name.clone(), part.to_owned()),
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// True when both patterns match exactly the same set of paths.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Variable(_), Segment::Variable(_)) => true,
                    _ => false,
                })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(pattern: &str, segment: &str) -> Result<Segment, PatternError> {
    let malformed = || PatternError::MalformedSegment {
        pattern: pattern.to_owned(),
        segment: segment.to_owned(),
    };

    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some("") => Err(PatternError::EmptyVariableName {
            pattern: pattern.to_owned(),
        }),
        Some(name) if name.contains(['{', '}']) => Err(malformed()),
        Some(name) => Ok(Segment::Variable(name.to_owned())),
        None if segment.contains(['{', '}']) => Err(malformed()),
        None => Ok(Segment::Literal(segment.to_owned())),
    }
}

/// Path variables bound by a successful match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    fn push(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }

    /// Value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/user/{id}", "/api/user/abc123", Some(vec![("id", "abc123")]))]
    #[case("/api/user/{id}", "/api/user/", None)]
    #[case("/api/user/{id}", "/api/user", None)]
    #[case("/api/user/{id}", "/api/user/abc/extra", None)]
    #[case("/api/user", "/api/user", Some(vec![]))]
    #[case("/api/user", "/api/users", None)]
    #[case("/", "/", Some(vec![]))]
    #[case("/", "/hello", None)]
    #[case("/hello", "/hello/", None)]
    #[case("/a/{x}/b/{y}", "/a/1/b/2", Some(vec![("x", "1"), ("y", "2")]))]
    fn matching(
        #[case] pattern: &str,
        #[case] path: &str,
        #[case] expected: Option<Vec<(&str, &str)>>,
    ) {
        let pattern = PathPattern::parse(pattern).expect("valid pattern");
        let bound = pattern.matches(path).map(|params| {
            params
                .iter()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect::<Vec<_>>()
        });
        let expected = expected.map(|pairs| {
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect::<Vec<_>>()
        });
        assert_eq!(bound, expected);
    }

    #[rstest]
    fn rejects_missing_leading_slash() {
        assert!(matches!(
            PathPattern::parse("api/user"),
            Err(PatternError::MissingLeadingSlash { .. })
        ));
    }

    #[rstest]
    fn rejects_empty_variable_name() {
        assert!(matches!(
            PathPattern::parse("/api/{}"),
            Err(PatternError::EmptyVariableName { .. })
        ));
    }

    #[rstest]
    #[case("/api/{id")]
    #[case("/api/id}")]
    #[case("/api/{{id}}")]
    #[case("/api/x{id}")]
    fn rejects_malformed_segments(#[case] pattern: &str) {
        assert!(matches!(
            PathPattern::parse(pattern),
            Err(PatternError::MalformedSegment { .. })
        ));
    }

    #[rstest]
    fn rejects_repeated_variables() {
        assert!(matches!(
            PathPattern::parse("/{id}/{id}"),
            Err(PatternError::DuplicateVariable { name, .. }) if name == "id"
        ));
    }

    #[rstest]
    #[case("/api/user/{id}", "/api/user/{key}", true)]
    #[case("/api/user/{id}", "/api/user/me", false)]
    #[case("/api/user", "/api/user/{id}", false)]
    fn same_shape(#[case] left: &str, #[case] right: &str, #[case] expected: bool) {
        let left = PathPattern::parse(left).expect("valid pattern");
        let right = PathPattern::parse(right).expect("valid pattern");
        assert_eq!(left.same_shape(&right), expected);
    }
}
