//! `xml:lang` values

use std::fmt;

use serde::{Serialize, Serializer};

use super::ValueError;
use crate::names::trim_xml_whitespace;

/// A language tag: a 1-8 letter primary subtag followed by any number of
/// hyphen-separated 1-8 character alphanumeric subtags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    primary: String,
    subtags: Vec<String>,
}

impl Language {
    /// Parse an `xml:lang` value, trimming surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let value = trim_xml_whitespace(raw);
        let mut parts = value.split('-');

        let primary = parts.next().unwrap_or_default();
        if !is_subtag(primary, |c| c.is_ascii_alphabetic()) {
            return Err(ValueError::invalid(format!(
                "primary subtag '{}' must be 1 to 8 letters",
                primary
            )));
        }

        let subtags = parts
            .map(|subtag| {
                if is_subtag(subtag, |c| c.is_ascii_alphanumeric()) {
                    Ok(subtag.to_string())
                } else {
                    Err(ValueError::invalid(format!(
                        "subtag '{}' must be 1 to 8 letters or digits",
                        subtag
                    )))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            primary: primary.to_string(),
            subtags,
        })
    }

    /// The primary language subtag
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Subtags after the primary one, in order
    pub fn subtags(&self) -> &[String] {
        &self.subtags
    }
}

fn is_subtag(s: &str, allowed: impl Fn(char) -> bool) -> bool {
    (1..=8).contains(&s.len()) && s.chars().all(allowed)
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        for subtag in &self.subtags {
            write!(f, "-{}", subtag)?;
        }
        Ok(())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
