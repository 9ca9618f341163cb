//! Maps a user-entered site string to the verified properties it refers to.
//!
//! Matching is by equality of normalized forms only. There is no fallback to
//! an arbitrary property: an input that matches nothing yields an empty
//! candidate list.
//!
//! Every function takes the verified set as an explicit argument and returns
//! references into it, so a candidate can only ever be a verified property.

use thiserror::Error;

use crate::property::{normalize_site, site_host, Property, PropertyKind, Scheme};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no Search Console properties are connected; verify a property and reconnect")]
    NoVerifiedProperties,

    #[error(
        "no verified property matches '{input}'; available properties: {}",
        .available.join(", ")
    )]
    NoMatchFound {
        input: String,
        available: Vec<String>,
    },
}

/// Returns `true` when `property_identifier` and `user_input` name the same
/// site after normalization (see [`normalize_site`]).
///
/// Blank inputs never match.
#[must_use]
pub fn matches_domain(property_identifier: &str, user_input: &str) -> bool {
    let wanted = normalize_site(user_input);
    !wanted.is_empty() && normalize_site(property_identifier) == wanted
}

/// Builds the ordered candidate list for `user_input`.
///
/// 1. Verified properties whose normalized form equals the input's: domain
///    properties first, then URL-prefix properties in listing order, except
///    that an `https` prefix moves ahead of an `http` prefix that differs
///    from it only by scheme.
/// 2. The canonical variations of the input's host (`sc-domain:<host>`,
///    `https://www.<host>/`, `https://<host>/`, `http://www.<host>/`,
///    `http://<host>/`), each only if a verified property has that shape.
///
/// Properties differing only in case or trailing slashes appear once.
#[must_use]
pub fn generate_candidates<'a>(user_input: &str, verified: &'a [Property]) -> Vec<&'a Property> {
    let mut candidates: Vec<&Property> = Vec::new();

    let (domain_matches, url_matches): (Vec<&Property>, Vec<&Property>) = verified
        .iter()
        .filter(|p| matches_domain(p.as_str(), user_input))
        .partition(|p| p.is_domain());

    if domain_matches.len() + url_matches.len() > 1 {
        tracing::debug!(
            input = user_input,
            domain_matches = domain_matches.len(),
            url_matches = url_matches.len(),
            "several verified properties match; domain property takes priority"
        );
    }

    for property in domain_matches {
        push_unique(&mut candidates, property);
    }
    for property in url_matches.iter().copied() {
        if let Some(twin) = https_twin(property) {
            if let Some(https) = url_matches.iter().copied().find(|p| p.kind() == &twin) {
                push_unique(&mut candidates, https);
            }
        }
        push_unique(&mut candidates, property);
    }

    let host = site_host(user_input);
    if !host.is_empty() {
        for variation in synthesized_variations(&host) {
            if let Some(property) = verified.iter().find(|p| p.kind() == &variation) {
                push_unique(&mut candidates, property);
            }
        }
    }

    candidates
}

/// Resolves `user_input` against the verified set.
///
/// # Errors
///
/// - [`ResolveError::NoVerifiedProperties`] when `verified` is empty.
/// - [`ResolveError::NoMatchFound`] when no verified property matches; the
///   error lists what is available so the user can pick one directly.
pub fn resolve<'a>(
    user_input: &str,
    verified: &'a [Property],
) -> Result<Vec<&'a Property>, ResolveError> {
    if verified.is_empty() {
        return Err(ResolveError::NoVerifiedProperties);
    }

    let candidates = generate_candidates(user_input, verified);
    if candidates.is_empty() {
        return Err(ResolveError::NoMatchFound {
            input: user_input.trim().to_owned(),
            available: verified.iter().map(|p| p.as_str().to_owned()).collect(),
        });
    }

    tracing::debug!(
        input = user_input,
        first = candidates[0].as_str(),
        count = candidates.len(),
        "resolved candidate properties"
    );
    Ok(candidates)
}

fn synthesized_variations(host: &str) -> [PropertyKind; 5] {
    [
        PropertyKind::domain(host),
        PropertyKind::url_root(Scheme::Https, true, host),
        PropertyKind::url_root(Scheme::Https, false, host),
        PropertyKind::url_root(Scheme::Http, true, host),
        PropertyKind::url_root(Scheme::Http, false, host),
    ]
}

/// The `https` counterpart of an `http` URL-prefix property.
fn https_twin(property: &Property) -> Option<PropertyKind> {
    match property.kind() {
        PropertyKind::Url {
            scheme: Scheme::Http,
            www,
            host,
            path,
        } => Some(PropertyKind::Url {
            scheme: Scheme::Https,
            www: *www,
            host: host.clone(),
            path: path.clone(),
        }),
        _ => None,
    }
}

fn push_unique<'a>(candidates: &mut Vec<&'a Property>, property: &'a Property) {
    if !candidates.iter().any(|c| c.kind() == property.kind()) {
        candidates.push(property);
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
