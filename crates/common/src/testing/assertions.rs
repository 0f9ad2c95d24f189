//! Custom assertions for testing
//!
//! Provides assertion macros and functions for common testing scenarios.

// These assertions are designed to panic on failure
#![allow(clippy::missing_panics_doc)]

use std::fmt::Debug;

/// Assert that an error contains a specific substring
///
/// # Examples
///
/// ```
/// let result: Result<(), String> = Err("Connection timeout occurred".to_string());
/// tfe_common::assert_error_contains!(result, "timeout");
/// ```
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $substring:expr) => {
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let error_msg = format!("{}", e);
                assert!(
                    error_msg.contains($substring),
                    "Error message '{}' does not contain '{}'",
                    error_msg,
                    $substring
                );
            }
        }
    };
}

/// Assert that an error is of a specific kind, using an accessor that
/// returns the kind
///
/// # Examples
///
/// ```
/// #[derive(Debug)]
/// struct CustomError {
///     kind: CustomKind,
/// }
///
/// #[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// enum CustomKind {
///     Foo,
///     Bar,
/// }
///
/// let result: Result<(), CustomError> = Err(CustomError { kind: CustomKind::Foo });
/// tfe_common::assert_error_kind!(result, CustomKind::Foo, |err: &CustomError| err.kind);
/// ```
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $expected_kind:expr, $kind_accessor:expr $(,)?) => {{
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let actual_kind = $kind_accessor(e);
                let expected_kind = $expected_kind;
                assert_eq!(
                    std::mem::discriminant(&actual_kind),
                    std::mem::discriminant(&expected_kind),
                    "Error kind mismatch: expected {:?}, got {:?}",
                    expected_kind,
                    actual_kind
                );
            }
        }
    }};
}

/// Assert that a collection is sorted by the key returned from `key`
///
/// # Examples
///
/// ```
/// use tfe_common::testing::assertions::assert_sorted_by_key;
///
/// let names = vec![("a", 3), ("b", 1)];
/// assert_sorted_by_key(&names, |(name, _)| *name);
/// ```
pub fn assert_sorted_by_key<T, K, F>(items: &[T], key: F)
where
    T: Debug,
    K: Ord + Debug,
    F: Fn(&T) -> K,
{
    for window in items.windows(2) {
        let (a, b) = (key(&window[0]), key(&window[1]));
        assert!(
            a <= b,
            "Items not sorted: {:?} > {:?} ({:?} before {:?})",
            a,
            b,
            window[0],
            window[1]
        );
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::assertions.
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum CustomKind {
        Foo,
        Bar,
    }

    #[derive(Debug)]
    struct CustomError {
        kind: CustomKind,
    }

    #[test]
    fn assert_error_contains_passes_on_substring() {
        let result: Result<(), String> = Err("Token is required".into());
        crate::assert_error_contains!(result, "required");
    }

    #[test]
    #[should_panic(expected = "Expected error but got Ok")]
    fn assert_error_contains_panics_on_ok() {
        let result: Result<(), String> = Ok(());
        crate::assert_error_contains!(result, "anything");
    }

    #[test]
    fn assert_error_kind_with_accessor() {
        let result: Result<(), CustomError> = Err(CustomError { kind: CustomKind::Bar });
        crate::assert_error_kind!(result, CustomKind::Bar, |err: &CustomError| err.kind);
    }

    #[test]
    fn assert_sorted_by_key_accepts_equal_keys() {
        let items = vec![("acme", 2), ("acme", 1), ("zeta", 0)];
        assert_sorted_by_key(&items, |(name, _)| *name);
    }

    #[test]
    #[should_panic(expected = "Items not sorted")]
    fn assert_sorted_by_key_detects_disorder() {
        assert_sorted_by_key(&["b", "a"], |name| *name);
    }
}
