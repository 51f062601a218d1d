mod domain;
mod rules;
mod types;

pub use rules::{check_registrable, check_suffix, is_reserved_tld};
pub use types::{
    DomainInput, RegistrableOptions, SUFFIX_PATH, SuffixOptions, UnexpectedValueError,
    ValidationOutcome, Violation, ViolationCode,
};

use domain::resolve_input;

use crate::domain::DomainError;
use crate::psl::PublicSuffixTable;

/// Valide qu'une valeur est un nom de domaine enregistrable.
///
/// Absent or empty values are valid. Parse and IDNA failures become
/// `INVALID_SYNTAX` with the error kept as the violation cause.
pub fn validate_registrable(
    table: &PublicSuffixTable,
    input: impl Into<DomainInput>,
    options: &RegistrableOptions,
) -> ValidationOutcome {
    let input = input.into();
    if input.is_blank() {
        return ValidationOutcome::Valid;
    }
    let raw = input.as_text();

    let outcome = match resolve_input(table, &input) {
        Ok(resolved) => check_registrable(&raw, &resolved, options.allow_private),
        Err(err) => invalid_syntax(&raw, err),
    };
    log_outcome("registrable", &raw, &outcome);
    outcome
}

/// Valide le suffixe public d'une valeur (connu, non réservé, ICANN si requis).
pub fn validate_suffix(
    table: &PublicSuffixTable,
    input: impl Into<DomainInput>,
    options: &SuffixOptions,
) -> ValidationOutcome {
    let input = input.into();
    if input.is_blank() {
        return ValidationOutcome::Valid;
    }
    let raw = input.as_text();

    let outcome = match resolve_input(table, &input) {
        Ok(resolved) => check_suffix(&raw, &resolved, options.require_icann),
        Err(err) => invalid_syntax(&raw, err),
    };
    log_outcome("suffix", &raw, &outcome);
    outcome
}

fn invalid_syntax(raw: &str, err: DomainError) -> ValidationOutcome {
    Violation::new(ViolationCode::InvalidSyntax, raw)
        .with_cause(err)
        .into()
}

#[cfg(feature = "with-tracing")]
fn log_outcome(rule: &str, raw: &str, outcome: &ValidationOutcome) {
    match outcome.code() {
        Some(code) => tracing::debug!(rule, value = raw, %code, "domain rejected"),
        None => tracing::trace!(rule, value = raw, "domain accepted"),
    }
}

#[cfg(not(feature = "with-tracing"))]
fn log_outcome(_rule: &str, _raw: &str, _outcome: &ValidationOutcome) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    const FIXTURE: &str = include_str!("../../tests/fixtures/public_suffix_list.dat");

    fn table() -> PublicSuffixTable {
        PublicSuffixTable::parse(FIXTURE).unwrap()
    }

    fn registrable(name: &str, allow_private: bool) -> ValidationOutcome {
        let options = RegistrableOptions::new().with_allow_private(allow_private);
        validate_registrable(&table(), name, &options)
    }

    fn suffix(name: &str, require_icann: bool) -> ValidationOutcome {
        let options = SuffixOptions::new().with_require_icann(require_icann);
        validate_suffix(&table(), name, &options)
    }

    #[test]
    fn accepts_registrable_names() {
        for name in ["example.com", "example.net", "example.co.uk", "faß.de", "xn--fa-hia.de"] {
            assert!(registrable(name, false).is_valid(), "{name}");
            let parsed = Domain::parse(name).unwrap();
            let outcome =
                validate_registrable(&table(), parsed, &RegistrableOptions::default());
            assert!(outcome.is_valid(), "parsed {name}");
        }
    }

    #[test]
    fn accepts_private_when_allowed() {
        for name in ["example.github.io", "github.com", "faß.de"] {
            assert!(registrable(name, true).is_valid(), "{name}");
        }
    }

    #[test]
    fn rejects_private_suffix() {
        let outcome = registrable("example.github.io", false);
        let v = outcome.violation().expect("violation");
        assert_eq!(v.code, ViolationCode::PrivateSuffix);
        assert_eq!(v.path.as_deref(), Some("suffix"));
        assert_eq!(v.invalid_value, "example.github.io");
    }

    #[test]
    fn rejects_wildcard() {
        let outcome = registrable("*.example.com", false);
        assert_eq!(outcome.code(), Some(ViolationCode::NotRegistrable));
    }

    #[test]
    fn rejects_names_longer_than_registrable() {
        let cases = [
            ("example.no.co.uk", "no.co.uk"),
            ("test.example.github.io", "example.github.io"),
            ("dev2.rollerscapes.net", "rollerscapes.net"),
            ("www.faß.de", "faß.de"),
        ];
        for (name, expected) in cases {
            let outcome = registrable(name, true);
            let v = outcome.violation().expect("violation");
            assert_eq!(v.code, ViolationCode::RegistrableLengthExceeded, "{name}");
            assert_eq!(v.param("registrable"), Some(expected), "{name}");
        }
    }

    #[test]
    fn parse_failures_are_invalid_syntax() {
        for name in ["xn--94823482.nl", "nope.", ".nope"] {
            let outcome = registrable(name, false);
            let v = outcome.violation().expect("violation");
            assert_eq!(v.code, ViolationCode::InvalidSyntax, "{name}");
            assert!(v.cause.is_some());
            assert_eq!(v.invalid_value, name);

            assert_eq!(suffix(name, true).code(), Some(ViolationCode::InvalidSyntax));
        }
    }

    #[test]
    fn blank_input_is_valid() {
        for flag in [true, false] {
            assert!(registrable("", flag).is_valid());
            assert!(suffix("", flag).is_valid());
            let none: Option<&str> = None;
            let options = RegistrableOptions::new().with_allow_private(flag);
            assert!(validate_registrable(&table(), none, &options).is_valid());
            let options = SuffixOptions::new().with_require_icann(flag);
            assert!(validate_suffix(&table(), DomainInput::Absent, &options).is_valid());
        }
    }

    #[test]
    fn accepts_known_suffixes() {
        for name in ["example.com", "*.example.com", "example.net", "example.co.uk", "faß.de", "xn--fa-hia.de"] {
            assert!(suffix(name, true).is_valid(), "{name}");
            assert!(suffix(name, false).is_valid(), "{name}");
        }
        assert!(suffix("example.github.io", false).is_valid());
    }

    #[test]
    fn rejects_unknown_and_reserved_suffixes() {
        let cases = [
            ("example.cong", ViolationCode::UnknownSuffix),
            ("example.co.urk", ViolationCode::UnknownSuffix),
            ("example.example", ViolationCode::ReservedTldUsed),
            ("example.localhost", ViolationCode::ReservedTldUsed),
            ("example.test", ViolationCode::ReservedTldUsed),
        ];
        for (name, code) in cases {
            for require_icann in [true, false] {
                let outcome = suffix(name, require_icann);
                let v = outcome.violation().expect("violation");
                assert_eq!(v.code, code, "{name}");
                assert_eq!(v.path.as_deref(), Some(SUFFIX_PATH));
            }
        }
    }

    #[test]
    fn rejects_non_icann_when_required() {
        assert_eq!(
            suffix("example.github.io", true).code(),
            Some(ViolationCode::IcannUnknown)
        );
    }

    #[test]
    fn default_options_follow_constraints() {
        assert!(!RegistrableOptions::default().allow_private);
        assert!(SuffixOptions::default().require_icann);
    }

    #[test]
    fn unicode_and_punycode_validate_identically() {
        let table = table();
        let a = table.resolve_str("faß.de").unwrap();
        let b = table.resolve_str("xn--fa-hia.de").unwrap();
        assert_eq!(a, b);
        for allow in [true, false] {
            assert_eq!(
                registrable("faß.de", allow).is_valid(),
                registrable("xn--fa-hia.de", allow).is_valid()
            );
            assert_eq!(suffix("faß.de", allow).code(), suffix("xn--fa-hia.de", allow).code());
        }
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ViolationCode::InvalidSyntax.name(), "INVALID_SYNTAX");
        assert_eq!(
            ViolationCode::InvalidSyntax.uuid(),
            "97e31849-cda5-4ec0-8a4f-8066e24a6aae"
        );
        assert_eq!(ViolationCode::IcannUnknown.to_string(), "ICANN_UNKNOWN");
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_values_convert_to_input() {
        use serde_json::json;

        assert_eq!(DomainInput::try_from(&json!(null)), Ok(DomainInput::Absent));
        assert_eq!(
            DomainInput::try_from(&json!("example.com")),
            Ok(DomainInput::Text("example.com".to_string()))
        );
        assert_eq!(
            DomainInput::try_from(&json!(false)),
            Ok(DomainInput::Text(String::new()))
        );
        let err = DomainInput::try_from(&json!(["example.com"])).expect_err("array");
        assert_eq!(err.found, "array");
    }
}
