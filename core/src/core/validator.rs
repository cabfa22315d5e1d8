use log::debug;
use regex::Regex;

use crate::core::errors::ValidationError;
use crate::core::resolver::CanonicalHost;

/// Longest domain name accepted, in characters.
pub const MAX_DOMAIN_LEN: usize = 253;

const IPV4_PATTERN: &str =
    r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

const DOMAIN_PATTERN: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)*$";

/// Classification of a canonical host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Ipv4,
    Domain,
    Invalid,
}

impl std::fmt::Display for HostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostKind::Ipv4 => write!(f, "IPv4"),
            HostKind::Domain => write!(f, "Domain"),
            HostKind::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Grammar checks for canonical hosts.
///
/// The patterns are compiled once per validator and live as long as it does.
pub struct TargetValidator {
    ipv4: Regex,
    domain: Regex,
}

impl TargetValidator {
    pub fn new() -> Self {
        Self {
            ipv4: Regex::new(IPV4_PATTERN).expect("IPv4 pattern is valid"),
            domain: Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"),
        }
    }

    pub fn is_ipv4(&self, host: &str) -> bool {
        self.ipv4.is_match(host)
    }

    /// Label grammar plus the two-part rule: a single label is not a domain.
    pub fn is_domain(&self, host: &str) -> bool {
        self.domain.is_match(host) && host.contains('.')
    }

    /// Classifies a host. Over-long domains come back as `Invalid`.
    pub fn classify(&self, host: &CanonicalHost) -> HostKind {
        match self.check(host) {
            Ok(kind) => kind,
            Err(_) => HostKind::Invalid,
        }
    }

    /// Like [`classify`](Self::classify), but reports why a host was rejected.
    ///
    /// IPv4 literals skip the domain rule and the length limit.
    pub fn check(&self, host: &CanonicalHost) -> Result<HostKind, ValidationError> {
        let host = host.as_str();

        if self.is_ipv4(host) {
            debug!("Host '{}' classified as IPv4", host);
            return Ok(HostKind::Ipv4);
        }

        if !self.is_domain(host) {
            debug!("Host '{}' rejected: not an IPv4 address or domain", host);
            return Err(ValidationError::InvalidHostGrammar);
        }

        if host.chars().count() > MAX_DOMAIN_LEN {
            debug!("Host rejected: domain is {} characters long", host.len());
            return Err(ValidationError::DomainTooLong);
        }

        debug!("Host '{}' classified as domain", host);
        Ok(HostKind::Domain)
    }
}

impl Default for TargetValidator {
    fn default() -> Self {
        Self::new()
    }
}
