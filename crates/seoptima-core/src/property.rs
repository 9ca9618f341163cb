//! Search Console property identifiers.
//!
//! The account listing returns identifiers as plain strings in one of two
//! shapes: `sc-domain:example.com` (domain property) or
//! `https://www.example.com/` (URL-prefix property). [`Property`] keeps the
//! raw string for querying and a parsed [`PropertyKind`] for comparison.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const DOMAIN_PREFIX: &str = "sc-domain:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyParseError {
    #[error("property identifier is empty")]
    Empty,

    #[error("property identifier \"{0}\" has no host")]
    MissingHost(String),

    #[error("property identifier \"{0}\" is neither a sc-domain: nor an http(s) URL prefix")]
    UnrecognizedShape(String),
}

/// URL scheme of a URL-prefix property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Https,
    Http,
}

/// Parsed shape of a property identifier.
///
/// Hosts and paths are lower-cased and paths carry no trailing slash, so
/// two identifiers that differ only in case or trailing slashes compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    Domain {
        domain: String,
    },
    Url {
        scheme: Scheme,
        www: bool,
        host: String,
        /// Empty for a site root, otherwise `/segment[/segment...]`.
        path: String,
    },
}

impl PropertyKind {
    /// Domain property covering `host`.
    #[must_use]
    pub fn domain(host: &str) -> Self {
        PropertyKind::Domain {
            domain: host.to_lowercase(),
        }
    }

    /// Root URL-prefix property for `host`.
    #[must_use]
    pub fn url_root(scheme: Scheme, www: bool, host: &str) -> Self {
        PropertyKind::Url {
            scheme,
            www,
            host: host.to_lowercase(),
            path: String::new(),
        }
    }
}

/// A verified Search Console property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    raw: String,
    kind: PropertyKind,
}

impl Property {
    /// Parses a property identifier as returned by the account listing.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyParseError`] when the identifier is blank, has no
    /// host, or is neither a `sc-domain:` nor an `http(s)://` identifier.
    pub fn parse(raw: &str) -> Result<Self, PropertyParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PropertyParseError::Empty);
        }

        let lower = trimmed.to_lowercase();
        let kind = if let Some(rest) = lower.strip_prefix(DOMAIN_PREFIX) {
            let domain = rest.trim().trim_end_matches('/');
            if domain.is_empty() || domain.contains('/') || domain.contains(char::is_whitespace)
            {
                return Err(PropertyParseError::MissingHost(trimmed.to_owned()));
            }
            PropertyKind::Domain {
                domain: domain.to_owned(),
            }
        } else if let Some((scheme, rest)) = split_scheme(&lower) {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            if authority.is_empty() || authority.contains(char::is_whitespace) {
                return Err(PropertyParseError::MissingHost(trimmed.to_owned()));
            }
            let (www, host) = match authority.strip_prefix("www.") {
                Some(host) if !host.is_empty() => (true, host),
                _ => (false, authority),
            };
            let path = path.trim_end_matches('/');
            PropertyKind::Url {
                scheme,
                www,
                host: host.to_owned(),
                path: if path.is_empty() {
                    String::new()
                } else {
                    format!("/{path}")
                },
            }
        } else {
            return Err(PropertyParseError::UnrecognizedShape(trimmed.to_owned()));
        };

        Ok(Self {
            raw: trimmed.to_owned(),
            kind,
        })
    }

    /// The identifier exactly as the account listing returned it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self.kind, PropertyKind::Domain { .. })
    }

    #[must_use]
    pub fn scheme(&self) -> Option<Scheme> {
        match self.kind {
            PropertyKind::Url { scheme, .. } => Some(scheme),
            PropertyKind::Domain { .. } => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn split_scheme(lower: &str) -> Option<(Scheme, &str)> {
    if let Some(rest) = lower.strip_prefix("https://") {
        Some((Scheme::Https, rest))
    } else {
        lower.strip_prefix("http://").map(|rest| (Scheme::Http, rest))
    }
}

/// Normalizes a site string for comparison.
///
/// Lower-cases, then strips a `sc-domain:` prefix, an `http://`/`https://`
/// scheme, a leading `www.` and any trailing slashes. Never fails: garbage
/// in yields a (possibly empty) normalized string out.
#[must_use]
pub fn normalize_site(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let mut s = lower.as_str();
    s = s.strip_prefix(DOMAIN_PREFIX).map_or(s, str::trim);
    s = split_scheme(s).map_or(s, |(_, rest)| rest);
    s = s.strip_prefix("www.").unwrap_or(s);
    s.trim_end_matches('/').to_owned()
}

/// Host portion of a normalized site string, without path, query or fragment.
#[must_use]
pub fn site_host(input: &str) -> String {
    let normalized = normalize_site(input);
    let end = normalized
        .find(['/', '?', '#'])
        .unwrap_or(normalized.len());
    normalized[..end].to_owned()
}

/// The set of properties the connected account has verified.
///
/// Order follows the account listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifiedProperties(Vec<Property>);

impl VerifiedProperties {
    /// Builds a verified set from raw identifiers, skipping any that do not
    /// parse.
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let properties = identifiers
            .into_iter()
            .filter_map(|raw| match Property::parse(raw.as_ref()) {
                Ok(property) => Some(property),
                Err(e) => {
                    tracing::warn!(
                        identifier = raw.as_ref(),
                        error = %e,
                        "skipping unparseable property identifier"
                    );
                    None
                }
            })
            .collect();
        Self(properties)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Property] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        self.0.iter().map(Property::as_str).collect()
    }
}
