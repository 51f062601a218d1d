use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use domaincheck_lib::{RegistrableOptions, SuffixOptions};

#[derive(Parser)]
#[command(name = "domaincheck-cli")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// fichier Public Suffix List (format publicsuffix.org)
    #[arg(long)]
    pub psl: PathBuf,

    /// lit des domaines depuis stdin (un par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// règles: registrable|suffix|both
    #[arg(long, default_value = "both")]
    pub check: String,

    /// accepte les suffixes privés (règle registrable)
    #[arg(long)]
    pub allow_private: bool,

    /// n'exige pas un suffixe ICANN (règle suffix)
    #[arg(long)]
    pub allow_non_icann: bool,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// valide un domaine
    Validate { domain: String },
    /// affiche suffixe / domaine enregistrable sans appliquer de règle
    Resolve { domain: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckSelection {
    Registrable,
    Suffix,
    Both,
}

impl CheckSelection {
    pub fn registrable(self) -> bool {
        matches!(self, Self::Registrable | Self::Both)
    }

    pub fn suffix(self) -> bool {
        matches!(self, Self::Suffix | Self::Both)
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn checks(&self) -> Result<CheckSelection> {
        check_selection_from_str(&self.check)
    }

    pub fn registrable_options(&self) -> RegistrableOptions {
        RegistrableOptions::new().with_allow_private(self.allow_private)
    }

    pub fn suffix_options(&self) -> SuffixOptions {
        SuffixOptions::new().with_require_icann(!self.allow_non_icann)
    }
}

pub fn check_selection_from_str(s: &str) -> Result<CheckSelection> {
    match s {
        "registrable" => Ok(CheckSelection::Registrable),
        "suffix" => Ok(CheckSelection::Suffix),
        "both" => Ok(CheckSelection::Both),
        other => bail!("unknown --check '{other}', use: registrable|suffix|both"),
    }
}
