use std::fmt;

use super::error::RuleError;
use crate::domain::{Domain, WILDCARD_LABEL, idn};

/// PSL partition a rule was listed in.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSection {
    Icann,
    Private,
}

/// Classification of a resolved suffix.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    Icann,
    Private,
    Unknown,
}

impl SuffixKind {
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icann => "icann",
            Self::Private => "private",
            Self::Unknown => "unknown",
        }
    }
}

impl From<RuleSection> for SuffixKind {
    fn from(section: RuleSection) -> Self {
        match section {
            RuleSection::Icann => Self::Icann,
            RuleSection::Private => Self::Private,
        }
    }
}

impl fmt::Display for SuffixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One PSL rule. Labels are kept as written (leftmost first) in canonical
/// ASCII; a wildcard rule keeps its leading `*` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    labels: Vec<String>,
    section: RuleSection,
    wildcard: bool,
    exception: bool,
}

impl Rule {
    /// Parses rule text in PSL notation (`co.uk`, `*.ck`, `!www.ck`).
    pub fn parse(text: &str, section: RuleSection) -> Result<Self, RuleError> {
        let text = text.trim();
        let (exception, body) = match text.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if body.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut labels = Vec::new();
        for (idx, raw) in body.split('.').enumerate() {
            if raw.is_empty() {
                return Err(RuleError::EmptyLabel);
            }
            if raw == WILDCARD_LABEL {
                if idx != 0 || exception {
                    return Err(RuleError::MisplacedWildcard);
                }
                labels.push(WILDCARD_LABEL.to_string());
                continue;
            }
            let ascii =
                idn::normalize(raw).map_err(|source| RuleError::InvalidLabel { source })?;
            labels.push(ascii);
        }

        let wildcard = labels.first().is_some_and(|l| l == WILDCARD_LABEL);
        if wildcard && labels.len() < 2 {
            // bare "*" is the implicit default rule, not something a list may declare
            return Err(RuleError::MisplacedWildcard);
        }
        if exception && labels.len() < 2 {
            return Err(RuleError::ShortException);
        }

        Ok(Self {
            labels,
            section,
            wildcard,
            exception,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn section(&self) -> RuleSection {
        self.section
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn is_exception(&self) -> bool {
        self.exception
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exception {
            f.write_str("!")?;
        }
        f.write_str(&self.labels.join("."))
    }
}

/// The public suffix part of a resolved domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suffix {
    domain: Domain,
    kind: SuffixKind,
}

impl Suffix {
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn kind(&self) -> SuffixKind {
        self.kind
    }

    pub fn label_count(&self) -> usize {
        self.domain.label_count()
    }

    pub fn is_known(&self) -> bool {
        self.kind.is_known()
    }

    pub fn is_icann(&self) -> bool {
        self.kind == SuffixKind::Icann
    }

    pub fn is_private(&self) -> bool {
        self.kind == SuffixKind::Private
    }
}

/// A [`Domain`] split into suffix and registrable part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDomain {
    domain: Domain,
    suffix: Suffix,
    registrable: Domain,
}

impl ResolvedDomain {
    /// `suffix_len` is clamped to `1..=label_count`; the registrable part is
    /// one label longer than the suffix when the domain allows it.
    pub(crate) fn new(domain: Domain, suffix_len: usize, kind: SuffixKind) -> Self {
        let count = domain.label_count();
        let suffix_len = suffix_len.clamp(1, count);
        let suffix = Suffix {
            domain: domain.rightmost(suffix_len),
            kind,
        };
        let registrable = domain.rightmost(suffix_len + 1);
        Self {
            domain,
            suffix,
            registrable,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn suffix(&self) -> &Suffix {
        &self.suffix
    }

    pub fn registrable_domain(&self) -> &Domain {
        &self.registrable
    }

    /// Labels left of the registrable domain, if any.
    pub fn subdomain(&self) -> Option<Domain> {
        let extra = self.domain.label_count() - self.registrable.label_count();
        if extra == 0 {
            return None;
        }
        let labels = self.domain.labels().take(extra).map(str::to_string).collect();
        Some(Domain::from_labels(labels))
    }
}
