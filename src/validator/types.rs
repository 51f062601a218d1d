use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::domain::{Domain, DomainError};

/// Sub-path used by the suffix-related violations.
pub const SUFFIX_PATH: &str = "suffix";

/// Stable violation identifiers.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    InvalidSyntax,
    NotRegistrable,
    RegistrableLengthExceeded,
    PrivateSuffix,
    UnknownSuffix,
    ReservedTldUsed,
    IcannUnknown,
}

impl ViolationCode {
    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidSyntax => "INVALID_SYNTAX",
            Self::NotRegistrable => "NOT_REGISTRABLE",
            Self::RegistrableLengthExceeded => "REGISTRABLE_LENGTH_EXCEEDED",
            Self::PrivateSuffix => "PRIVATE_SUFFIX",
            Self::UnknownSuffix => "UNKNOWN_SUFFIX",
            Self::ReservedTldUsed => "RESERVED_TLD_USED",
            Self::IcannUnknown => "ICANN_UNKNOWN",
        }
    }

    /// UUID identifier, identical across releases.
    pub fn uuid(self) -> &'static str {
        match self {
            Self::InvalidSyntax => "97e31849-cda5-4ec0-8a4f-8066e24a6aae",
            Self::NotRegistrable => "02247e1c-ed21-420a-829d-0b9a0b3d3c45",
            Self::RegistrableLengthExceeded => "d539cb2a-7800-4b44-a4ba-cd926f6ebe91",
            Self::PrivateSuffix => "5c21a871-bbd9-43e0-b048-cdc8ad7bd7c6",
            Self::UnknownSuffix => "c5bd436b-2bb4-4868-bbfb-3f4a4e6fcaf6",
            Self::ReservedTldUsed => "a77c7fb3-0c3a-4859-bdc3-233371a1aebe",
            Self::IcannUnknown => "1d913ca2-029d-4b2b-be25-6ad22a70cee1",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Données brutes d'une violation; les messages restent côté appelant.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub code: ViolationCode,
    pub path: Option<String>,
    pub invalid_value: String,
    pub params: BTreeMap<String, String>,
    #[cfg_attr(feature = "with-serde", serde(skip))]
    pub cause: Option<DomainError>,
}

impl Violation {
    pub fn new(code: ViolationCode, invalid_value: impl Into<String>) -> Self {
        Self {
            code,
            path: None,
            invalid_value: invalid_value.into(),
            params: BTreeMap::new(),
            cause: None,
        }
    }

    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<DomainError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "status", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Violation(Violation),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Valid => None,
            Self::Violation(v) => Some(v),
        }
    }

    pub fn code(&self) -> Option<ViolationCode> {
        self.violation().map(|v| v.code)
    }
}

impl From<Violation> for ValidationOutcome {
    fn from(violation: Violation) -> Self {
        Self::Violation(violation)
    }
}

/// Options de la règle « registrable ».
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrableOptions {
    pub allow_private: bool,
}

impl RegistrableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_private(mut self, value: bool) -> Self {
        self.allow_private = value;
        self
    }
}

/// Options de la règle « suffixe ». ICANN requis par défaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixOptions {
    pub require_icann: bool,
}

impl SuffixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_require_icann(mut self, value: bool) -> Self {
        self.require_icann = value;
        self
    }
}

impl Default for SuffixOptions {
    fn default() -> Self {
        Self {
            require_icann: true,
        }
    }
}

/// Value handed to the validators: raw text or an already-parsed domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainInput {
    Absent,
    Text(String),
    Parsed(Domain),
}

impl DomainInput {
    /// Absent or empty values are not validated at all.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.is_empty(),
            Self::Parsed(_) => false,
        }
    }

    /// Textual form reported as the invalid value.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Absent => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Parsed(domain) => Cow::Owned(domain.to_ascii()),
        }
    }
}

impl From<&str> for DomainInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DomainInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for DomainInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Domain> for DomainInput {
    fn from(value: Domain) -> Self {
        Self::Parsed(value)
    }
}

impl From<&Domain> for DomainInput {
    fn from(value: &Domain) -> Self {
        Self::Parsed(value.clone())
    }
}

impl<T: Into<DomainInput>> From<Option<T>> for DomainInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// The value is neither scalar nor a [`Domain`]: a caller bug, not bad data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a string or a Domain, found {found}")]
pub struct UnexpectedValueError {
    pub found: &'static str,
}

#[cfg(feature = "with-serde")]
impl TryFrom<&serde_json::Value> for DomainInput {
    type Error = UnexpectedValueError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(text) => Ok(Self::Text(text.clone())),
            // scalaires : même conversion que la forme texte usuelle
            Value::Bool(true) => Ok(Self::Text("1".to_string())),
            Value::Bool(false) => Ok(Self::Text(String::new())),
            Value::Number(n) => Ok(Self::Text(n.to_string())),
            Value::Array(_) => Err(UnexpectedValueError { found: "array" }),
            Value::Object(_) => Err(UnexpectedValueError { found: "object" }),
        }
    }
}
