//! Macro for implementing Display and FromStr for setting enums
//!
//! Settings such as [`NotFoundPolicy`](crate::NotFoundPolicy) are read from
//! environment variables and config files, so each one needs a stable
//! lowercase spelling and case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use tfe_domain::impl_setting_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Verbosity {
//!     Quiet,
//!     Loud,
//! }
//!
//! impl_setting_conversions!(Verbosity {
//!     Quiet => "quiet",
//!     Loud => "loud",
//! });
//!
//! assert_eq!("LOUD".parse::<Verbosity>(), Ok(Verbosity::Loud));
//! ```

/// Implements Display and FromStr traits for setting enums
///
/// - Display writes the given lowercase spelling
/// - FromStr parses case-insensitively and names the enum in its error
#[macro_export]
macro_rules! impl_setting_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
