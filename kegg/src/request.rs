//! Request URL construction.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Base URL of the public KEGG REST service.
pub const KEGG_BASE_URL: &str = "http://rest.kegg.jp/";

/// A KEGG REST action (the first path component of every request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Info,
    List,
    Find,
    Get,
    Conv,
    Link,
}

impl Action {
    /// Every action accepted by the service, in canonical order.
    pub const ALL: [Action; 6] = [
        Action::Info,
        Action::List,
        Action::Find,
        Action::Get,
        Action::Conv,
        Action::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Info => "info",
            Action::List => "list",
            Action::Find => "find",
            Action::Get => "get",
            Action::Conv => "conv",
            Action::Link => "link",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::InvalidAction {
                action: s.to_string(),
                valid: Action::ALL
                    .iter()
                    .map(Action::as_str)
                    .collect::<Vec<_>>()
                    .join("; "),
            })
    }
}

/// One path component of a request.
///
/// `Many` holds several database entries or search terms; they are sent
/// joined with `+`, which is how KEGG batches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    One(String),
    Many(Vec<String>),
}

impl Segment {
    /// Render the segment as it appears in the URL path.
    pub fn render(&self) -> String {
        match self {
            Segment::One(value) => value.clone(),
            Segment::Many(values) => values.join("+"),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::One(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::One(value)
    }
}

impl From<&String> for Segment {
    fn from(value: &String) -> Self {
        Segment::One(value.clone())
    }
}

impl From<Vec<String>> for Segment {
    fn from(values: Vec<String>) -> Self {
        Segment::Many(values)
    }
}

impl From<Vec<&str>> for Segment {
    fn from(values: Vec<&str>) -> Self {
        Segment::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Segment {
    fn from(values: &[&str]) -> Self {
        Segment::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Segment {
    fn from(values: [&str; N]) -> Self {
        Segment::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// A validated request: an action followed by its path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub action: Action,
    pub segments: Vec<Segment>,
}

impl Request {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            segments: Vec::new(),
        }
    }

    /// Append a path segment.
    pub fn segment(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a path segment only when one is given.
    pub fn optional(self, segment: Option<impl Into<Segment>>) -> Self {
        match segment {
            Some(segment) => self.segment(segment),
            None => self,
        }
    }

    /// The URL of this request against the public KEGG service.
    pub fn url(&self) -> String {
        self.url_with_base(KEGG_BASE_URL)
    }

    /// The URL of this request against another base (a mirror or a test server).
    pub fn url_with_base(&self, base: &str) -> String {
        let mut url = base.trim_end_matches('/').to_string();
        url.push('/');
        url.push_str(self.action.as_str());
        for segment in &self.segments {
            url.push('/');
            url.push_str(&segment.render());
        }
        url
    }
}

/// Validate `action` and join it with `segments` into a KEGG REST URL.
///
/// Segments are inserted literally, so an empty segment produces an empty
/// path component.
pub fn build_url(action: &str, segments: &[Segment]) -> Result<String> {
    let action: Action = action.parse()?;
    let request = Request {
        action,
        segments: segments.to_vec(),
    };
    Ok(request.url())
}
