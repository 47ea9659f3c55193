//! Identity segments of an object path.

use std::fmt;

/// One component of an object path: absent, textual, or numeric.
///
/// Two segments are equal when their forms match and their contents are
/// equal; a text segment never equals an integer segment, even when the
/// text spells the same number.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdSeg {
    /// No segment content.
    #[default]
    Null,
    /// A textual identifier.
    Text(String),
    /// A numeric enumeration.
    Int(i64),
}

impl IdSeg {
    /// Returns true for the null form.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content, if this is a text segment.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is an integer segment.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for IdSeg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for IdSeg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for IdSeg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl fmt::Display for IdSeg {
    /// The null form renders as nothing, text verbatim, integers in
    /// signed decimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}
