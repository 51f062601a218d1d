//! Domain-name parsing: label splitting, IDNA normalisation and syntax checks.
//!
//! The entry point is [`Domain::parse`]. A [`Domain`] always holds canonical
//! ASCII labels, so two values compare equal when their ASCII forms do.

mod error;
pub mod idn;

pub use error::{DomainError, IdnaError, IdnaErrorKind, SyntaxError};

use std::fmt;
use std::str::FromStr;

/// Max octets per label (RFC 1035).
pub const MAX_LABEL_LEN: usize = 63;
/// Max length of the dotted ASCII form.
pub const MAX_DOMAIN_LEN: usize = 253;
/// Label matching any single label in suffix rules.
pub const WILDCARD_LABEL: &str = "*";

/// U+002E plus the full-width/ideographic stops UTS-46 maps onto it.
pub(crate) const DELIMITERS: &[char] = &['.', '\u{3002}', '\u{FF0E}', '\u{FF61}'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain {
    // leftmost label first, canonical ASCII
    labels: Vec<String>,
}

impl Domain {
    /// Parses and normalises `input`.
    ///
    /// Rejects empty input, leading or trailing delimiters, empty labels,
    /// labels refused by IDNA, and anything over the RFC 1035 lengths.
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        if input.is_empty() {
            return Err(SyntaxError::Empty);
        }
        if input.starts_with(DELIMITERS) {
            return Err(SyntaxError::LeadingDelimiter(input.to_string()));
        }
        if input.ends_with(DELIMITERS) {
            return Err(SyntaxError::TrailingDelimiter(input.to_string()));
        }

        let mut labels = Vec::new();
        for raw in input.split(DELIMITERS) {
            if raw.is_empty() {
                return Err(SyntaxError::EmptyLabel(input.to_string()));
            }
            let ascii = idn::normalize(raw).map_err(SyntaxError::idna)?;
            if ascii.is_empty() {
                return Err(SyntaxError::EmptyLabel(input.to_string()));
            }
            check_label(&ascii)?;
            labels.push(ascii);
        }

        let domain = Self { labels };
        let len = domain.ascii_len();
        if len > MAX_DOMAIN_LEN {
            return Err(SyntaxError::length_exceeded(
                domain.to_ascii(),
                len,
                MAX_DOMAIN_LEN,
            ));
        }
        Ok(domain)
    }

    /// Builds a domain from labels that were already validated.
    pub(crate) fn from_labels(labels: Vec<String>) -> Self {
        debug_assert!(!labels.is_empty());
        Self { labels }
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Label addressed right-to-left: `label(0)` is the top-level label.
    pub fn label(&self, index: usize) -> Option<&str> {
        let count = self.labels.len();
        if index >= count {
            return None;
        }
        Some(self.labels[count - 1 - index].as_str())
    }

    /// Labels from left to right, as written.
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.labels.iter().map(String::as_str)
    }

    /// The `count` rightmost labels (the whole domain if it is shorter).
    pub fn rightmost(&self, count: usize) -> Domain {
        let count = count.clamp(1, self.labels.len());
        let start = self.labels.len() - count;
        Self::from_labels(self.labels[start..].to_vec())
    }

    /// `true` when `other` is a right-aligned run of this domain's labels.
    pub fn ends_with(&self, other: &Domain) -> bool {
        self.labels.ends_with(&other.labels)
    }

    pub fn has_wildcard(&self) -> bool {
        self.labels.iter().any(|l| l == WILDCARD_LABEL)
    }

    pub fn to_ascii(&self) -> String {
        self.labels.join(".")
    }

    pub fn to_unicode(&self) -> String {
        idn::to_unicode(&self.to_ascii())
    }

    fn ascii_len(&self) -> usize {
        let dots = self.labels.len() - 1;
        self.labels.iter().map(String::len).sum::<usize>() + dots
    }
}

/// Checks an ASCII label: `a-z 0-9 - _`, no hyphen at either end; a lone `*`
/// is accepted as a wildcard label.
fn check_label(label: &str) -> Result<(), SyntaxError> {
    if label.len() > MAX_LABEL_LEN {
        return Err(SyntaxError::length_exceeded(
            label,
            label.len(),
            MAX_LABEL_LEN,
        ));
    }
    if label == WILDCARD_LABEL {
        return Ok(());
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(SyntaxError::malformed(label));
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        return Err(SyntaxError::malformed(label));
    }
    Ok(())
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}

impl FromStr for Domain {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "with-serde")]
impl serde::Serialize for Domain {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_ascii())
    }
}

#[cfg(feature = "with-serde")]
impl<'de> serde::Deserialize<'de> for Domain {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
