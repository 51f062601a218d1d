//! Public Suffix List resolution.
//!
//! A [`PublicSuffixTable`] is a read-only snapshot built once (from rules or
//! from the publicsuffix.org text format) and then shared by every
//! resolution. [`PublicSuffixTable::resolve`] never fails: a domain without
//! a matching rule gets its rightmost label as an unknown suffix.

mod error;
mod loader;
mod table;
mod types;

pub use error::{LoadError, RuleError};
pub use table::{PublicSuffixTable, PublicSuffixTableBuilder};
pub use types::{ResolvedDomain, Rule, RuleSection, Suffix, SuffixKind};

use crate::domain::{Domain, SyntaxError};

impl PublicSuffixTable {
    /// Parses `input` then resolves it.
    pub fn resolve_str(&self, input: &str) -> Result<ResolvedDomain, SyntaxError> {
        let domain = Domain::parse(input)?;
        Ok(self.resolve(&domain))
    }
}

#[cfg(test)]
mod tests;
