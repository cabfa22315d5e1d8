use std::fmt;

use log::debug;
use url::Url;

use crate::core::errors::ResolveError;

const SCHEME_SEPARATOR: &str = "://";

/// Bare IP-or-domain string derived from raw target input.
///
/// Only used to gate submission; the request keeps the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalHost(pub(crate) String);

impl CanonicalHost {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts the host to scan from whatever the user typed.
pub struct TargetResolver;

impl TargetResolver {
    /// Resolves raw input into a canonical host.
    ///
    /// - `https://example.com/path?x=1` → `example.com`
    /// - `example.com/path` → `example.com`
    /// - `10.0.0.1` → `10.0.0.1`
    ///
    /// Input containing `://` must parse as a URL with a non-empty host,
    /// otherwise `MalformedUrl` is returned.
    pub fn resolve(raw: &str) -> Result<CanonicalHost, ResolveError> {
        let trimmed = raw.trim_matches(is_trimmable);
        if trimmed.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        let host = if trimmed.contains(SCHEME_SEPARATOR) {
            let parsed = Url::parse(trimmed)
                .map_err(|e| ResolveError::MalformedUrl(e.to_string()))?;
            match parsed.host_str() {
                Some(h) if !h.is_empty() => h.to_string(),
                _ => return Err(ResolveError::MalformedUrl("URL has no host".to_string())),
            }
        } else if let Some((before, _)) = trimmed.split_once('/') {
            before.to_string()
        } else {
            trimmed.to_string()
        };

        debug!("Resolved target '{}' to host '{}'", trimmed, host);
        Ok(CanonicalHost(host))
    }
}

/// Whitespace plus U+FEFF, which pasted text often carries as a BOM.
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}
