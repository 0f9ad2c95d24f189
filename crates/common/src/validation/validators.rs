// Field Validators - Reusable validation components
use once_cell::sync::Lazy;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

// Characters allowed in identifiers that end up as URL path segments.
#[allow(clippy::expect_used)]
static IDENTIFIER_REGEX: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^[a-zA-Z0-9\-._]+$").expect("Invalid identifier regex"));

/// Validator for resource identifiers such as organization names.
///
/// Accepts ASCII letters, digits, `-`, `.` and `_`, as long as the value is
/// not made of dots alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierValidator;

impl FieldValidator<str> for IdentifierValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Value cannot be empty".to_string());
        }
        if !IDENTIFIER_REGEX.is_match(value) || value.chars().all(|c| c == '.') {
            return Err(format!("'{}' is not a valid identifier", value));
        }
        Ok(())
    }
}
