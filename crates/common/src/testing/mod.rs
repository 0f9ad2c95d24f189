//! Testing utilities and helpers
//!
//! - **[`assertions`]**: assertion macros and functions shared by the
//!   workspace test suites
//!
//! ## Usage
//!
//! ```rust
//! let result: Result<(), String> = Err("organization is required".to_string());
//! tfe_common::assert_error_contains!(result, "required");
//! ```

pub mod assertions;

// Re-export assertion functions (macros are exported at the crate root)
pub use assertions::assert_sorted_by_key;
