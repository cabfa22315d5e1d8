use thiserror::Error;

/// User-correctable problems with the `target` field.
///
/// The `Display` text is the inline message shown next to the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Target is required")]
    EmptyTarget,

    #[error("Invalid URL format")]
    MalformedUrl,

    #[error("Please enter a valid IP address, domain name, or URL")]
    InvalidHostGrammar,

    #[error("Domain name is too long")]
    DomainTooLong,
}

/// Failure to extract a host from raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("input is empty")]
    EmptyInput,

    #[error("malformed URL: {0}")]
    MalformedUrl(String),
}

impl From<ResolveError> for ValidationError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EmptyInput => ValidationError::EmptyTarget,
            ResolveError::MalformedUrl(_) => ValidationError::MalformedUrl,
        }
    }
}

/// Errors from driving the form itself, as opposed to bad field content.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("a scan is already starting; wait for it to finish")]
    Busy,

    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("unknown scan type '{0}'")]
    UnknownScanType(String),

    #[error("form has {0} validation error(s)")]
    Invalid(usize),

    #[error("scan launcher rejected the request: {0}")]
    Launch(#[source] anyhow::Error),
}
