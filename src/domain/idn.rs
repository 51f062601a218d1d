//! IDNA2008 / UTS-46 helpers (non-transitional processing).
//!
//! Labels are normalised one at a time with [`normalize`]; labels already in
//! ACE form (`xn--…`) are decoded and re-encoded so that only canonical
//! punycode survives.

use super::error::{IdnaError, IdnaErrorKind};

/// ASCII-compatible encoding prefix.
pub const ACE_PREFIX: &str = "xn--";

/// Normalise a single label to its canonical ASCII form (lowercase, punycode
/// for non-ASCII input).
pub fn normalize(label: &str) -> Result<String, IdnaError> {
    let ascii = idna::domain_to_ascii(label)
        .map_err(|_| IdnaError::new(label, IdnaErrorKind::Uts46))?;

    if has_ace_prefix(&ascii) {
        check_round_trip(&ascii)?;
    }
    Ok(ascii)
}

/// Converts an ASCII domain (or label) to its Unicode presentation.
///
/// Labels that fail to decode are kept as-is, which never happens for values
/// produced by [`normalize`].
pub fn to_unicode(ascii: &str) -> String {
    let (unicode, _) = idna::domain_to_unicode(ascii);
    unicode
}

/// Explicit decode check over the raw input.
///
/// Only runs when the input carries the literal `xn--` marker; any other
/// input is accepted untouched and left to the label parser.
pub fn validate_idn(input: &str) -> Result<(), IdnaError> {
    if !input.contains(ACE_PREFIX) {
        return Ok(());
    }
    let (_, result) = idna::domain_to_unicode(input);
    result.map_err(|_| IdnaError::new(input, IdnaErrorKind::Decode))
}

pub(crate) fn has_ace_prefix(label: &str) -> bool {
    label
        .get(..ACE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ACE_PREFIX))
}

fn check_round_trip(ascii: &str) -> Result<(), IdnaError> {
    let payload = &ascii[ACE_PREFIX.len()..];
    let decoded = idna::punycode::decode_to_string(payload)
        .ok_or_else(|| IdnaError::new(ascii, IdnaErrorKind::PunycodeDecode))?;

    let reencoded = idna::domain_to_ascii(&decoded)
        .map_err(|_| IdnaError::new(ascii, IdnaErrorKind::RoundTrip))?;
    if reencoded != ascii {
        return Err(IdnaError::new(ascii, IdnaErrorKind::RoundTrip));
    }
    Ok(())
}
