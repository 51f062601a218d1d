#![forbid(unsafe_code)]
//! domaincheck_lib — validation de noms de domaine (IDNA2008 + Public Suffix List)

pub mod domain;
pub mod psl;
pub mod validator;

pub use domain::{Domain, DomainError, IdnaError, IdnaErrorKind, SyntaxError};
pub use psl::{
    LoadError, PublicSuffixTable, PublicSuffixTableBuilder, ResolvedDomain, Rule, RuleError,
    RuleSection, Suffix, SuffixKind,
};
pub use validator::{
    DomainInput, RegistrableOptions, SuffixOptions, UnexpectedValueError, ValidationOutcome,
    Violation, ViolationCode, check_registrable, check_suffix, validate_registrable,
    validate_suffix,
};
