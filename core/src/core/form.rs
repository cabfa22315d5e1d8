use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use crate::core::errors::{FormError, ValidationError};
use crate::core::resolver::TargetResolver;
use crate::core::validator::TargetValidator;
use crate::{ScanLauncher, ScanRequest, ScanType};

/// Longest target accepted from the input box, in characters.
pub const MAX_TARGET_LEN: usize = 2048;
/// Longest description accepted from the input box, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Editable fields, keyed the way the renderer names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Target,
    ScanType,
    Description,
}

impl FormField {
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Target => "target",
            FormField::ScanType => "scanType",
            FormField::Description => "description",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "target" => Ok(FormField::Target),
            "scanType" => Ok(FormField::ScanType),
            "description" => Ok(FormField::Description),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Per-field error messages. Empty means the form may be submitted.
pub type ValidationErrors = BTreeMap<FormField, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// In-progress scan request plus its error bookkeeping.
///
/// Edits clear only the edited field's error. The full error map is
/// recomputed on the next [`validate`](Self::validate) or
/// [`submit`](Self::submit), so a field can look clean while the last
/// validation pass still flagged it.
pub struct FormState {
    request: ScanRequest,
    errors: ValidationErrors,
    loading: bool,
    validator: TargetValidator,
}

impl FormState {
    pub fn new() -> Self {
        Self::with_request(ScanRequest::default())
    }

    /// Starts from a pre-filled request, e.g. one loaded from a file.
    /// Field caps are applied as if the values had been typed.
    pub fn with_request(request: ScanRequest) -> Self {
        Self {
            request: ScanRequest {
                target: cap_chars(&request.target, MAX_TARGET_LEN),
                scan_type: request.scan_type,
                description: cap_chars(&request.description, MAX_DESCRIPTION_LEN),
            },
            errors: ValidationErrors::new(),
            loading: false,
            validator: TargetValidator::new(),
        }
    }

    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> FormPhase {
        if self.loading { FormPhase::Submitting } else { FormPhase::Editing }
    }

    /// True when nothing blocks a submit attempt right now.
    pub fn can_submit(&self) -> bool {
        !self.loading && self.errors.is_empty()
    }

    /// Applies an input event using the renderer's field key.
    pub fn handle_input(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let field: FormField = field.parse()?;
        self.set_field(field, value)
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }

        match field {
            FormField::Target => self.request.target = cap_chars(value, MAX_TARGET_LEN),
            FormField::ScanType => self.request.scan_type = value.parse()?,
            FormField::Description => {
                self.request.description = cap_chars(value, MAX_DESCRIPTION_LEN)
            }
        }

        if self.errors.remove(&field).is_some() {
            debug!("Cleared error on '{}' after edit", field);
        }
        Ok(())
    }

    pub fn select_scan_type(&mut self, scan_type: ScanType) -> Result<(), FormError> {
        self.set_field(FormField::ScanType, scan_type.key())
    }

    /// Runs a full validation pass and replaces the error map with its result.
    /// Returns `true` when the form is submittable.
    pub fn validate(&mut self) -> bool {
        let mut errors = ValidationErrors::new();

        if let Err(e) = self.check_target() {
            errors.insert(FormField::Target, e);
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    fn check_target(&self) -> Result<(), ValidationError> {
        let host = TargetResolver::resolve(&self.request.target)?;
        self.validator.check(&host)?;
        Ok(())
    }

    /// Validates and, if clean, hands the raw request to `launcher`.
    ///
    /// On success the form stays in `Submitting` until the caller reports
    /// completion with [`finish_submission`](Self::finish_submission).
    pub fn submit(&mut self, launcher: &dyn ScanLauncher) -> Result<(), FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }

        if !self.validate() {
            debug!("Submit blocked by {} validation error(s)", self.errors.len());
            return Err(FormError::Invalid(self.errors.len()));
        }

        self.loading = true;
        info!(
            "Starting {} scan for target '{}'",
            self.request.scan_type, self.request.target
        );

        if let Err(e) = launcher.start_scan(&self.request) {
            self.loading = false;
            return Err(FormError::Launch(e));
        }
        Ok(())
    }

    /// Externally driven loading flag, mirroring the scan call's in-flight state.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns to `Editing` once the launch call has completed. Fields are kept.
    pub fn finish_submission(&mut self) {
        self.loading = false;
    }

    /// Empties every field and error. Only the caller decides when to do this.
    pub fn reset(&mut self) {
        self.request = ScanRequest::default();
        self.errors.clear();
        self.loading = false;
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

fn cap_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}
