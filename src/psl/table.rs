use std::collections::HashMap;

use super::types::{ResolvedDomain, Rule, RuleSection, SuffixKind};
use crate::domain::{Domain, WILDCARD_LABEL};

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Terminal {
    section: RuleSection,
    exception: bool,
}

/// Trie node; children are arena indices.
#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<Box<str>, usize>,
    wildcard: Option<usize>,
    terminal: Option<Terminal>,
}

/// Immutable snapshot of Public Suffix List rules.
///
/// Rules live in an arena-indexed trie keyed by labels from right to left,
/// so a lookup costs one step per domain label. The table is never mutated
/// once built and can be shared across threads by reference.
#[derive(Debug, Clone)]
pub struct PublicSuffixTable {
    nodes: Vec<Node>,
    rule_count: usize,
    version: Option<String>,
}

impl PublicSuffixTable {
    pub fn builder() -> PublicSuffixTableBuilder {
        PublicSuffixTableBuilder::default()
    }

    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut builder = Self::builder();
        for rule in rules {
            builder.insert(rule);
        }
        builder.build()
    }

    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Snapshot version (`// VERSION:` header of the list), when known.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Finds the prevailing rule for `domain`.
    ///
    /// Exception rules win over everything else and give up their leftmost
    /// label; otherwise the longest match wins, wildcard before exact on a
    /// tie. Without any match the rightmost label is an unknown suffix.
    pub fn resolve(&self, domain: &Domain) -> ResolvedDomain {
        let labels: Vec<&str> = domain.labels().rev().collect();
        let mut candidates = Candidates::default();
        self.walk(ROOT, &labels, 0, false, &mut candidates);

        let (len, kind) = candidates
            .prevailing()
            .unwrap_or((1, SuffixKind::Unknown));

        #[cfg(feature = "with-tracing")]
        tracing::trace!(domain = %domain, suffix_len = len, kind = %kind, "resolved");

        ResolvedDomain::new(domain.clone(), len, kind)
    }

    // `labels` is rightmost first; `node` has matched `labels[..depth]`.
    fn walk(
        &self,
        node: usize,
        labels: &[&str],
        depth: usize,
        via_wildcard: bool,
        candidates: &mut Candidates,
    ) {
        let current = &self.nodes[node];
        if let Some(terminal) = current.terminal {
            candidates.offer(depth, terminal, via_wildcard);
        }
        let Some(label) = labels.get(depth) else {
            return;
        };
        if let Some(&child) = current.children.get(*label) {
            self.walk(child, labels, depth + 1, false, candidates);
        }
        if let Some(child) = current.wildcard {
            self.walk(child, labels, depth + 1, true, candidates);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    len: usize,
    section: RuleSection,
    wildcard: bool,
}

#[derive(Debug, Default)]
struct Candidates {
    exception: Option<(usize, RuleSection)>,
    rule: Option<Candidate>,
}

impl Candidates {
    fn offer(&mut self, len: usize, terminal: Terminal, wildcard: bool) {
        if terminal.exception {
            if self.exception.is_none_or(|(best, _)| len > best) {
                self.exception = Some((len, terminal.section));
            }
            return;
        }
        let better = match self.rule {
            None => true,
            Some(best) => len > best.len || (len == best.len && wildcard && !best.wildcard),
        };
        if better {
            self.rule = Some(Candidate {
                len,
                section: terminal.section,
                wildcard,
            });
        }
    }

    fn prevailing(&self) -> Option<(usize, SuffixKind)> {
        if let Some((len, section)) = self.exception {
            return Some((len - 1, section.into()));
        }
        self.rule.map(|c| (c.len, c.section.into()))
    }
}

/// Accumulates rules into a [`PublicSuffixTable`].
#[derive(Debug)]
pub struct PublicSuffixTableBuilder {
    nodes: Vec<Node>,
    rule_count: usize,
    version: Option<String>,
}

impl Default for PublicSuffixTableBuilder {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
            rule_count: 0,
            version: None,
        }
    }
}

impl PublicSuffixTableBuilder {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.set_version(version);
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.insert(rule);
        self
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        let trimmed = version.trim();
        self.version = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Adds `rule`; returns `false` when the same rule was already present
    /// (the first occurrence is kept).
    pub fn insert(&mut self, rule: Rule) -> bool {
        let mut node = ROOT;
        for label in rule.labels().iter().rev() {
            node = self.child(node, label);
        }
        let slot = &mut self.nodes[node].terminal;
        if slot.is_some() {
            return false;
        }
        *slot = Some(Terminal {
            section: rule.section(),
            exception: rule.is_exception(),
        });
        self.rule_count += 1;
        true
    }

    pub fn build(self) -> PublicSuffixTable {
        PublicSuffixTable {
            nodes: self.nodes,
            rule_count: self.rule_count,
            version: self.version,
        }
    }

    fn child(&mut self, parent: usize, label: &str) -> usize {
        if label == WILDCARD_LABEL {
            if let Some(idx) = self.nodes[parent].wildcard {
                return idx;
            }
            let idx = self.push_node();
            self.nodes[parent].wildcard = Some(idx);
            return idx;
        }
        if let Some(&idx) = self.nodes[parent].children.get(label) {
            return idx;
        }
        let idx = self.push_node();
        self.nodes[parent].children.insert(label.into(), idx);
        idx
    }

    fn push_node(&mut self) -> usize {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }
}
