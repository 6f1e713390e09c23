//! Work with dates written as integers, floats or strings (`20220110`,
//! `20220110.0`, `"20220110"`), or batches of them, as if they were dates.
//!
//! The format of a value is detected from a small ordered set of candidate
//! patterns, the value is parsed, shifted or inspected, and results come back
//! in the same representation they arrived in.
//!
//! ```
//! use dateint::{DateLike, months};
//!
//! assert_eq!(dateint::add(20220131, 0, 1, 0)?, DateLike::Int(20220228));
//! assert_eq!((DateLike::from("20200131") + months(1))?, DateLike::from("20200229"));
//! # Ok::<(), dateint::Error>(())
//! ```

mod consts;
mod convert;
mod detect;
mod interval;
mod ops;
mod pattern;
mod prelude;
mod registry;
mod value;

pub use consts::*;
pub use convert::{parse, parse_literal, render};
pub use interval::{Interval, days, months, offset, timedelta, years};
pub use pattern::{Fields, Pattern, PatternError};
pub use registry::{Candidate, ConfigError, Registry, RegistryConfig};
pub use value::{Batch, DateLike, Kind, Representation, Values};

use std::sync::LazyLock;

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::default);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A float holding a date had a non-zero fractional part.
    #[error("Float values with a non-zero decimal part are not accepted ({value:?})")]
    FloatFormat { value: f64 },

    /// No candidate format matched the value.
    #[error(
        "First value \"{value}\" does not match any of configured formats: {candidates:?}. \
         Hint: to prevent ambiguity issues, if no format is fixed by configuration, all values \
         (year, month, day, ...) must be zero-padded."
    )]
    UnknownFormat {
        value:      String,
        candidates: Vec<String>,
    },

    /// A literal did not match the pattern it was parsed with.
    #[error("Value \"{literal}\" does not match format {pattern}")]
    Parse {
        literal: String,
        pattern: Pattern,
        #[source]
        source:  chrono::ParseError,
    },

    /// A literal parsed only after chrono skipped whitespace or read a
    /// short field, so it does not render back to itself.
    #[error("Value \"{literal}\" does not exactly match format {pattern}")]
    Inexact { literal: String, pattern: Pattern },

    /// A calendar value was rendered into a representation of another shape.
    #[error("Expected a {expected} value, found a {found}")]
    InvalidType {
        expected: Representation,
        found:    &'static str,
    },

    /// Rendered text is not a valid value of the requested kind.
    #[error("Rendered value \"{text}\" is not a valid {kind}")]
    Coercion { text: String, kind: Kind },

    #[error("Cannot detect the format of an empty batch")]
    EmptyBatch,

    /// Calendar arithmetic left the supported range.
    #[error("Date offset out of range")]
    OutOfRange,

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The registry built from [`DEFAULT_FORMAT`] and [`DEFAULT_CANDIDATES`],
/// shared by the free functions and the [`Interval`] operators.
pub fn registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Today's local date as an integer, e.g. `20220110`.
///
/// # Errors
/// See [`Registry::today`].
pub fn today() -> Result<i64, Error> {
    registry().today()
}

/// Monday=0 through Sunday=6.
///
/// # Errors
/// See [`Registry::weekday`].
pub fn weekday(value: impl Into<DateLike>) -> Result<Values<u32>, Error> {
    registry().weekday(&value.into())
}

/// Monday=1 through Sunday=7.
///
/// # Errors
/// See [`Registry::isoweekday`].
pub fn isoweekday(value: impl Into<DateLike>) -> Result<Values<u32>, Error> {
    registry().isoweekday(&value.into())
}

/// # Errors
/// See [`Registry::add`].
pub fn add(
    value: impl Into<DateLike>,
    years: i32,
    months: i32,
    days: i64,
) -> Result<DateLike, Error> {
    registry().add(&value.into(), timedelta(years, months, days))
}

/// # Errors
/// See [`Registry::sub`].
pub fn sub(
    value: impl Into<DateLike>,
    years: i32,
    months: i32,
    days: i64,
) -> Result<DateLike, Error> {
    registry().sub(&value.into(), timedelta(years, months, days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_use_default_registry() {
        assert_eq!(add(20220131, 0, 1, 0).unwrap(), DateLike::Int(20220228));
        assert_eq!(sub(20220228, 0, 1, 0).unwrap(), DateLike::Int(20220128));
        assert_eq!(weekday(20220707).unwrap(), Values::Scalar(3));
        assert_eq!(isoweekday(20220707).unwrap(), Values::Scalar(4));
        assert!(today().is_ok());
        assert_eq!(registry(), &Registry::default());
    }

    #[test]
    fn test_error_messages() {
        let err = weekday(20220707.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Float values with a non-zero decimal part are not accepted (20220707.5)"
        );

        let err = weekday("asdasd").unwrap_err();
        assert!(err.to_string().starts_with(
            "First value \"asdasd\" does not match any of configured formats: [\"%Y%m%d\", \"%Y%m\""
        ));

        let err = Registry::new(RegistryConfig {
            candidates: Vec::new(),
            ..RegistryConfig::default()
        })
        .map_err(Error::from)
        .unwrap_err();
        assert_eq!(err.to_string(), "No candidate formats configured");
    }

    #[test]
    fn test_parse_error_has_source() {
        use std::error::Error as _;

        let pattern = Pattern::new("%Y%m%d").unwrap();
        let err = parse_literal("2022", &pattern).unwrap_err();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_interval_operators() {
        let value = DateLike::from(20220131);
        assert_eq!((&value + months(1)).unwrap(), DateLike::Int(20220228));
        assert_eq!((months(1) + &value).unwrap(), DateLike::Int(20220228));
        assert_eq!((value.clone() - days(31)).unwrap(), DateLike::Int(20211231));
        assert_eq!((years(1) + value).unwrap(), DateLike::Int(20230131));
    }

    #[test]
    fn test_interval_with_unknown_format() {
        let result = DateLike::from(2022071) + days(1);
        assert!(matches!(result, Err(Error::UnknownFormat { .. })));
    }
}
