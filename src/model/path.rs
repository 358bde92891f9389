//! Dotted paths into configuration trees.

use serde::{Serialize, Serializer};
use std::fmt;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// A location inside a configuration tree, written as keys joined by `.`.
///
/// For example `resources.JDBCSystemResource.Generic2.JdbcResource`.
///
/// Segments are stored as-is, so a key that itself contains `.` (such as
/// `oracle.net.CONNECT_TIMEOUT`) stays a single segment. Only the rendered
/// form joins them.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    /// Creates a single-segment path.
    #[must_use]
    pub fn root(key: &str) -> Self {
        Self {
            segments: vec![key.to_string()],
        }
    }

    /// Returns a new path extended by one key.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.to_string());
        Self { segments }
    }

    /// Iterates the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment of the path (the top-level section).
    #[must_use]
    pub fn section(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// Returns true if the path lies inside the given top-level section.
    #[must_use]
    pub fn in_section(&self, section: &str) -> bool {
        self.section() == section
    }
}

/// Parses a rendered path, splitting on every `.`.
///
/// Keys containing `.` cannot be expressed this way; build such paths with
/// [`DottedPath::root`] and [`DottedPath::child`].
impl From<&str> for DottedPath {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Self::default();
        }
        Self {
            segments: s.split(SEPARATOR).map(str::to_string).collect(),
        }
    }
}

impl From<String> for DottedPath {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Serialize for DottedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_joins_with_dot() {
        let path = DottedPath::root("resources").child("JDBCSystemResource").child("Generic2");
        assert_eq!(path.to_string(), "resources.JDBCSystemResource.Generic2");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_segments() {
        let path = DottedPath::from("topology.Server.s1");
        let segments: Vec<&str> = path.segments().collect();
        assert_eq!(segments, vec!["topology", "Server", "s1"]);
    }

    #[test]
    fn test_dotted_key_stays_one_segment() {
        let path = DottedPath::root("resources")
            .child("Properties")
            .child("oracle.net.CONNECT_TIMEOUT")
            .child("Value");
        let segments: Vec<&str> = path.segments().collect();
        assert_eq!(segments, vec!["resources", "Properties", "oracle.net.CONNECT_TIMEOUT", "Value"]);
        assert_eq!(path.depth(), 4);
        assert_eq!(path.to_string(), "resources.Properties.oracle.net.CONNECT_TIMEOUT.Value");
    }

    #[test]
    fn test_serializes_as_joined_string() {
        let path = DottedPath::root("topology").child("Server");
        assert_eq!(serde_json::to_string(&path).expect("serialize"), "\"topology.Server\"");
    }

    #[test]
    fn test_empty_path() {
        let path = DottedPath::from("");
        assert!(path.is_empty());
        assert_eq!(path.section(), "");
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_section_matching() {
        assert!(DottedPath::from("topology.Cluster.c1").in_section("topology"));
        assert!(DottedPath::from("topology").in_section("topology"));
        assert!(!DottedPath::from("topologyExtra.x").in_section("topology"));
        assert!(!DottedPath::from("resources.topology").in_section("topology"));
        assert!(!DottedPath::root("topology.x").in_section("topology"));
    }
}
