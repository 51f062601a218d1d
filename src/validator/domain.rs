use super::types::DomainInput;
use crate::domain::{Domain, DomainError, SyntaxError, idn};
use crate::psl::{PublicSuffixTable, ResolvedDomain};

/// Prépare la valeur : parse (ou reprise telle quelle d'un `Domain`),
/// contrôle IDN explicite si la valeur contient `xn--`, puis résolution PSL.
pub(crate) fn resolve_input(
    table: &PublicSuffixTable,
    input: &DomainInput,
) -> Result<ResolvedDomain, DomainError> {
    let domain = match input {
        DomainInput::Parsed(domain) => domain.clone(),
        DomainInput::Text(text) => Domain::parse(text)?,
        DomainInput::Absent => return Err(SyntaxError::Empty.into()),
    };

    idn::validate_idn(&input.as_text())?;

    Ok(table.resolve(&domain))
}
