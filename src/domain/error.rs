use std::fmt;

use thiserror::Error;

/// Why IDNA processing refused a label.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdnaErrorKind {
    /// UTS-46 mapping/validation rejected the label.
    Uts46,
    /// The `xn--` payload is not valid punycode.
    PunycodeDecode,
    /// The decoded form does not encode back to the same ASCII label.
    RoundTrip,
    /// Whole-domain conversion to Unicode reported errors.
    Decode,
}

impl IdnaErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uts46 => "UTS-46 processing failed",
            Self::PunycodeDecode => "punycode decoding failed",
            Self::RoundTrip => "punycode round-trip mismatch",
            Self::Decode => "conversion to Unicode failed",
        }
    }
}

impl fmt::Display for IdnaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("IDNA error in '{label}': {kind}")]
pub struct IdnaError {
    pub label: String,
    pub kind: IdnaErrorKind,
}

impl IdnaError {
    pub(crate) fn new(label: impl Into<String>, kind: IdnaErrorKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// Malformed domain-name input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("domain is empty")]
    Empty,
    #[error("domain '{0}' starts with a label delimiter")]
    LeadingDelimiter(String),
    #[error("domain '{0}' ends with a label delimiter")]
    TrailingDelimiter(String),
    #[error("domain '{0}' contains an empty label")]
    EmptyLabel(String),
    #[error("malformed label '{label}'")]
    MalformedLabel {
        label: String,
        #[source]
        source: Option<IdnaError>,
    },
    #[error("'{subject}' length {len} > {max}")]
    LengthExceeded {
        subject: String,
        len: usize,
        max: usize,
    },
}

impl SyntaxError {
    pub(crate) fn malformed(label: impl Into<String>) -> Self {
        Self::MalformedLabel {
            label: label.into(),
            source: None,
        }
    }

    pub(crate) fn idna(source: IdnaError) -> Self {
        Self::MalformedLabel {
            label: source.label.clone(),
            source: Some(source),
        }
    }

    pub(crate) fn length_exceeded(subject: impl Into<String>, len: usize, max: usize) -> Self {
        Self::LengthExceeded {
            subject: subject.into(),
            len,
            max,
        }
    }
}

/// Any reason a value could not be turned into a resolvable [`Domain`](super::Domain).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Idna(#[from] IdnaError),
}
