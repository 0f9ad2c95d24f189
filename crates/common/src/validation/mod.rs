// Validation Module - field-level checks run before any request leaves the client
use std::fmt;

mod validators;

pub use validators::{FieldValidator, IdentifierValidator};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Error code attached to a missing required value
pub const CODE_REQUIRED: &str = "required";

/// Error code attached to a malformed value
pub const CODE_INVALID: &str = "invalid";

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create with a single "required" field error
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{field} is required");
        Self { errors: vec![FieldError::new(field, message, CODE_REQUIRED)] }
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [only] => write!(f, "Validation failed: {}", only.message),
            errors => {
                write!(f, "Validation failed with {} errors: ", errors.len())?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `vcs_repo.identifier`
    pub field: String,
    pub message: String,
    /// [`CODE_REQUIRED`] or [`CODE_INVALID`]
    pub code: &'static str,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        Self { field: field.into(), message: message.into(), code }
    }
}

/// Collects field errors for one input value.
///
/// Field names are prefixed with the current nesting path, so a missing
/// token inside `vcs_repo` reports as `vcs_repo.oauth_token_id`.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
    path: Vec<String>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, field: &str, message: String, code: &'static str) {
        let field = if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path.join("."), field)
        };
        self.errors.push(FieldError::new(field, message, code));
    }

    /// Validate a field with a specific validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V)
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if let Err(msg) = validator.validate(value) {
            self.add(field, format!("{field}: {msg}"), CODE_INVALID);
        }
    }

    /// Validate string is not empty
    pub fn validate_not_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{field} is required"), CODE_REQUIRED);
        }
    }

    /// Validate a value that becomes one URL path segment.
    ///
    /// Besides being non-empty, it must not be `.`, `..` or any other
    /// dots-only string: URL resolution would treat those as relative
    /// references and address a different resource.
    pub fn validate_path_segment(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{field} is required"), CODE_REQUIRED);
        } else if value.chars().all(|c| c == '.') {
            let message = format!("{field}: '{value}' is not a valid path segment");
            self.add(field, message, CODE_INVALID);
        }
    }

    /// Validate an optional value is present, returning it for nested checks
    pub fn validate_present<'a, T>(
        &mut self,
        field: &str,
        value: &'a Option<T>,
    ) -> Option<&'a T> {
        if value.is_none() {
            self.add(field, format!("{field} is required"), CODE_REQUIRED);
        }
        value.as_ref()
    }

    /// Validate with nested context
    pub fn validate_nested<F>(&mut self, field: &str, f: F)
    where
        F: FnOnce(&mut Validator),
    {
        self.path.push(field.to_string());
        f(self);
        self.path.pop();
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors: self.errors })
        }
    }
}
