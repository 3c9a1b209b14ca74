//! Topic filter parse errors

use std::fmt;

/// Errors that can occur while parsing a topic filter or subscription target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Multi-level wildcard (#) used other than as the sole final level
    InvalidWildcardPosition,
    /// Filter yielded no levels
    EmptyFilter,
    /// $share/ prefix without both a group name and an underlying filter
    MissingShareGroup,
    /// Share group name containing /, + or #
    InvalidShareGroup,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWildcardPosition => {
                write!(f, "multi-level wildcard must be the last level")
            }
            Self::EmptyFilter => write!(f, "topic filter has no levels"),
            Self::MissingShareGroup => {
                write!(f, "shared subscription requires a group name and a filter")
            }
            Self::InvalidShareGroup => {
                write!(f, "share group name cannot contain /, + or #")
            }
        }
    }
}

impl std::error::Error for ParseError {}
