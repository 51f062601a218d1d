use std::path::PathBuf;

use thiserror::Error;

use crate::domain::IdnaError;

/// A single PSL rule could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule is empty")]
    Empty,
    #[error("rule contains an empty label")]
    EmptyLabel,
    #[error("wildcard is only allowed as the leftmost label")]
    MisplacedWildcard,
    #[error("exception rule needs at least two labels")]
    ShortException,
    #[error("label is not a valid IDNA label: {source}")]
    InvalidLabel {
        #[source]
        source: IdnaError,
    },
}

/// Errors raised while loading a Public Suffix List snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read public suffix list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid rule '{rule}': {source}")]
    Rule {
        line: usize,
        rule: String,
        #[source]
        source: RuleError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn rule(line: usize, rule: impl Into<String>, source: RuleError) -> Self {
        Self::Rule {
            line,
            rule: rule.into(),
            source,
        }
    }
}
