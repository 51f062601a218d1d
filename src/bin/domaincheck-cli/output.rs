#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::{CheckSelection, Cli};
use domaincheck_lib::{
    PublicSuffixTable, ResolvedDomain, SuffixKind, ValidationOutcome, Violation, ViolationCode,
    validate_registrable, validate_suffix,
};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Resolution {
    pub ascii: String,
    pub unicode: String,
    pub suffix: String,
    pub suffix_kind: SuffixKind,
    pub registrable: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub subdomain: Option<String>,
}

impl From<&ResolvedDomain> for Resolution {
    fn from(resolved: &ResolvedDomain) -> Self {
        Self {
            ascii: resolved.domain().to_ascii(),
            unicode: resolved.domain().to_unicode(),
            suffix: resolved.suffix().domain().to_unicode(),
            suffix_kind: resolved.suffix().kind(),
            registrable: resolved.registrable_domain().to_unicode(),
            subdomain: resolved.subdomain().map(|d| d.to_unicode()),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub check: &'static str,
    pub outcome: ValidationOutcome,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct OutputRow {
    pub input: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub resolution: Option<Resolution>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub checks: Vec<CheckReport>,
}

impl OutputRow {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            resolution: None,
            error: None,
            checks: Vec::new(),
        }
    }

    /// A validated row is valid when every check passed; a resolve-only row
    /// when the value parsed.
    pub fn is_valid(&self) -> bool {
        if self.checks.is_empty() {
            self.error.is_none()
        } else {
            self.checks.iter().all(|c| c.outcome.is_valid())
        }
    }

    fn reasons(&self) -> Vec<String> {
        let mut reasons: Vec<String> = self
            .checks
            .iter()
            .filter_map(|c| {
                c.outcome
                    .violation()
                    .map(|v| format!("{}: {} ({})", c.check, v.code, message(v)))
            })
            .collect();
        if self.checks.is_empty() {
            reasons.extend(self.error.clone());
        }
        reasons
    }
}

pub fn resolve_row(table: &PublicSuffixTable, input: &str) -> OutputRow {
    let mut row = OutputRow::new(input);
    match table.resolve_str(input) {
        Ok(resolved) => row.resolution = Some(Resolution::from(&resolved)),
        Err(err) => row.error = Some(err.to_string()),
    }
    row
}

pub fn validate_row(
    table: &PublicSuffixTable,
    input: &str,
    cli: &Cli,
    checks: CheckSelection,
) -> OutputRow {
    // une valeur vide n'est pas validée : pas de résolution à afficher
    let mut row = if input.is_empty() {
        OutputRow::new(input)
    } else {
        resolve_row(table, input)
    };

    if checks.registrable() {
        row.checks.push(CheckReport {
            check: "registrable",
            outcome: validate_registrable(table, input, &cli.registrable_options()),
        });
    }
    if checks.suffix() {
        row.checks.push(CheckReport {
            check: "suffix",
            outcome: validate_suffix(table, input, &cli.suffix_options()),
        });
    }
    row
}

/// English presentation of a violation; `{{ name }}` placeholders are
/// replaced by the violation parameters.
pub fn message(violation: &Violation) -> String {
    let template = match violation.code {
        ViolationCode::InvalidSyntax => "This value is not a valid domain-name.",
        ViolationCode::NotRegistrable => "This value is not a registrable domain name.",
        ViolationCode::RegistrableLengthExceeded => {
            "This value exceeds the registrable \"{{ registrable }}\" part of the domain-name."
        }
        ViolationCode::PrivateSuffix => {
            "This value contains a domain-name suffix that is not publicly registrable."
        }
        ViolationCode::UnknownSuffix | ViolationCode::ReservedTldUsed => {
            "This value does not contain a valid domain-name suffix."
        }
        ViolationCode::IcannUnknown => {
            "This value does not contain a domain-name suffix that is supported by ICANN."
        }
    };

    let mut text = template.to_string();
    for (name, value) in &violation.params {
        text = text.replace(&format!("{{{{ {name} }}}}"), value);
    }
    text
}

pub fn any_invalid(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.is_valid())
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

fn write_human(rows: &[OutputRow]) -> Result<()> {
    for row in rows {
        if row.is_valid() {
            println!("[OK]    {}", row.input);
        } else {
            println!("[INVALID] {} :: {}", row.input, row.reasons().join("; "));
        }
        if let Some(res) = &row.resolution {
            println!("        psl: {}", resolution_summary(res));
        }
    }
    Ok(())
}

fn resolution_summary(res: &Resolution) -> String {
    let mut parts = vec![
        format!("suffix={} ({})", res.suffix, res.suffix_kind),
        format!("registrable={}", res.registrable),
    ];
    if let Some(sub) = &res.subdomain {
        parts.push(format!("subdomain={sub}"));
    }
    if res.ascii != res.unicode {
        parts.push(format!("ascii={}", res.ascii));
    }
    parts.join(", ")
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.write_record(&csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        for row in rows {
            wtr.write_record(&csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> Vec<String> {
    let (ascii, suffix, kind, registrable) = match &row.resolution {
        Some(res) => (
            res.ascii.clone(),
            res.suffix.clone(),
            res.suffix_kind.to_string(),
            res.registrable.clone(),
        ),
        None => (String::new(), String::new(), String::new(), String::new()),
    };
    let codes = row
        .checks
        .iter()
        .filter_map(|c| c.outcome.code().map(|code| format!("{}:{code}", c.check)))
        .collect::<Vec<_>>()
        .join("|");

    vec![
        row.input.clone(),
        ascii,
        suffix,
        kind,
        registrable,
        if row.is_valid() {
            "true".to_string()
        } else {
            "false".to_string()
        },
        codes,
        row.error.clone().unwrap_or_default(),
    ]
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
