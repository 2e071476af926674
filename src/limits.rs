//! Limits and constraints for schema document parsing
//!
//! The parser is a plain recursive descent, so nesting depth is bounded here
//! rather than by the call stack. The other limits bound per-element work
//! and the size of documents handed to the loader.

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth the parser descends into
    pub max_xml_depth: usize,

    /// Maximum XML document size in bytes
    pub max_xml_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of namespace declarations per element
    pub max_namespaces: usize,
}

const MIB: usize = 1024 * 1024;

impl Default for Limits {
    /// Sized for schema documents parsed on a 2 MiB thread stack
    fn default() -> Self {
        Self {
            max_xml_depth: 256,
            max_xml_size: 100 * MIB,
            max_attributes: 1000,
            max_namespaces: 1000,
        }
    }
}

impl Limits {
    /// Default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighter limits for schema documents from untrusted sources
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 64,
            max_xml_size: 10 * MIB,
            max_attributes: 100,
            max_namespaces: 100,
        }
    }

    /// Looser limits for generated schemas
    ///
    /// Deep documents need a correspondingly large thread stack.
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 4096,
            max_xml_size: 1024 * MIB,
            max_attributes: 10_000,
            max_namespaces: 10_000,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_xml_depth = depth;
        self
    }

    /// Fail if an element `depth` levels below the document root is too deep
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        within(depth, self.max_xml_depth, "element nesting depth")
    }

    /// Fail if a schema document of `size` bytes is too large to load
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        within(size, self.max_xml_size, "schema document size in bytes")
    }

    /// Fail if one element carries too many attributes
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        within(count, self.max_attributes, "attributes on one element")
    }

    /// Fail if one element declares too many namespace prefixes
    pub fn check_namespaces(&self, count: usize) -> Result<()> {
        within(count, self.max_namespaces, "namespace declarations on one element")
    }
}

fn within(value: usize, limit: usize, what: &str) -> Result<()> {
    if value <= limit {
        return Ok(());
    }
    Err(Error::LimitExceeded(format!("{what}: {value} (limit {limit})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_xml_depth, 256);
        assert!(limits.check_xml_depth(200).is_ok());
        assert!(limits.check_xml_depth(300).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_xml_depth < Limits::default().max_xml_depth);
        assert!(limits.check_xml_depth(150).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.max_xml_depth > Limits::default().max_xml_depth);
        assert!(limits.check_xml_depth(1000).is_ok());
    }

    #[test]
    fn test_check_xml_size() {
        let limits = Limits::default();
        assert!(limits.check_xml_size(1024).is_ok());
        assert!(limits.check_xml_size(200 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_limit_message() {
        let error = Limits::strict().check_attributes(101).unwrap_err();
        assert_eq!(
            error.to_string(),
            "limit exceeded: attributes on one element: 101 (limit 100)"
        );
    }

    #[test]
    fn test_with_max_depth() {
        let limits = Limits::new().with_max_depth(3);
        assert!(limits.check_xml_depth(3).is_ok());
        assert!(matches!(
            limits.check_xml_depth(4),
            Err(Error::LimitExceeded(_))
        ));
    }
}
