use std::path::Path;

use super::error::LoadError;
use super::table::{PublicSuffixTable, PublicSuffixTableBuilder};
use super::types::{Rule, RuleSection};

const COMMENT: &str = "//";
const ICANN_BEGIN: &str = "===BEGIN ICANN DOMAINS===";
const PRIVATE_BEGIN: &str = "===BEGIN PRIVATE DOMAINS===";
const VERSION_PREFIX: &str = "VERSION:";

impl PublicSuffixTable {
    /// Parses a list in the publicsuffix.org text format.
    ///
    /// Rules are read up to the first whitespace of each line. Section
    /// markers switch between the ICANN and PRIVATE partitions; rules found
    /// before any marker are treated as ICANN.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut builder = PublicSuffixTableBuilder::default();
        let mut section = RuleSection::Icann;

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_start_matches('\u{feff}').trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix(COMMENT) {
                read_comment(comment.trim(), &mut section, &mut builder);
                continue;
            }

            let rule_text = line.split_whitespace().next().unwrap_or(line);
            let rule = Rule::parse(rule_text, section)
                .map_err(|source| LoadError::rule(idx + 1, rule_text, source))?;
            builder.insert(rule);
        }

        let table = builder.build();

        #[cfg(feature = "with-tracing")]
        tracing::debug!(
            rules = table.rule_count(),
            version = table.version().unwrap_or("-"),
            "public suffix list loaded"
        );

        Ok(table)
    }

    /// Reads and parses a PSL snapshot from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| LoadError::io(path, err))?;
        Self::parse(&text)
    }
}

fn read_comment(comment: &str, section: &mut RuleSection, builder: &mut PublicSuffixTableBuilder) {
    if comment.starts_with(ICANN_BEGIN) {
        *section = RuleSection::Icann;
    } else if comment.starts_with(PRIVATE_BEGIN) {
        *section = RuleSection::Private;
    } else if let Some(version) = comment.strip_prefix(VERSION_PREFIX) {
        builder.set_version(version);
    }
}
