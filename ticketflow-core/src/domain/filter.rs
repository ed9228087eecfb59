//! Status filter shared by both ticket contexts

use std::fmt;
use std::str::FromStr;

use super::result::Error;

/// Either every ticket or only those in one status
///
/// Parsed from `"all"` or from the status names of the context `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self::All
    }
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn matches(&self, status: &S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Keep the items whose status matches, preserving insertion order
    pub fn apply<T: Clone>(&self, items: &[T], status_of: impl Fn(&T) -> &S) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.matches(status_of(item)))
            .cloned()
            .collect()
    }
}

impl<S> FromStr for StatusFilter<S>
where
    S: FromStr<Err = Error>,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl<S: fmt::Display> fmt::Display for StatusFilter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => status.fmt(f),
        }
    }
}
