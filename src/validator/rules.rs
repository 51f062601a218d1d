use phf::phf_set;

use super::types::{SUFFIX_PATH, ValidationOutcome, Violation, ViolationCode};
use crate::psl::ResolvedDomain;

/// RFC 2606 test/documentation TLDs. Only label 0 is compared.
const RESERVED_TLDS: phf::Set<&'static str> = phf_set! {
    "example",
    "invalid",
    "localhost",
    "test",
};

pub fn is_reserved_tld(label: &str) -> bool {
    RESERVED_TLDS.contains(label)
}

/// Le domaine doit être exactement sa forme enregistrable.
///
/// `raw` is the value as received; a `*` anywhere in it makes the value
/// non-registrable before any other rule is considered.
///
/// A bare public suffix (`com`, `co.uk`) has no label left of its suffix,
/// so its registrable part is the whole domain and it passes this rule
/// (unless the suffix is private).
pub fn check_registrable(
    raw: &str,
    resolved: &ResolvedDomain,
    allow_private: bool,
) -> ValidationOutcome {
    if raw.contains('*') {
        return Violation::new(ViolationCode::NotRegistrable, raw).into();
    }

    let registrable = resolved.registrable_domain();
    if registrable != resolved.domain() {
        return Violation::new(ViolationCode::RegistrableLengthExceeded, raw)
            .with_param("registrable", registrable.to_unicode())
            .into();
    }

    if !allow_private && resolved.suffix().is_private() {
        return Violation::new(ViolationCode::PrivateSuffix, raw)
            .at_path(SUFFIX_PATH)
            .into();
    }

    ValidationOutcome::Valid
}

/// Le suffixe doit être connu de la PSL (et ICANN si demandé).
pub fn check_suffix(raw: &str, resolved: &ResolvedDomain, require_icann: bool) -> ValidationOutcome {
    let reserved = resolved
        .domain()
        .label(0)
        .is_some_and(is_reserved_tld);

    if reserved || !resolved.suffix().is_known() {
        let code = if reserved {
            ViolationCode::ReservedTldUsed
        } else {
            ViolationCode::UnknownSuffix
        };
        return Violation::new(code, raw).at_path(SUFFIX_PATH).into();
    }

    if require_icann && !resolved.suffix().is_icann() {
        return Violation::new(ViolationCode::IcannUnknown, raw)
            .at_path(SUFFIX_PATH)
            .into();
    }

    ValidationOutcome::Valid
}
