use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::NaiveDateTime;
use chrono::format::{Item, Numeric, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A strftime-style pattern restricted to numeric calendar fields
/// (`%Y %y %m %d %H %M %S`), literal text and whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Cow<'static, str>);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PatternError {
    #[display(fmt = "Empty format pattern")]
    Empty,
    #[display(fmt = "Invalid format pattern: {_0}")]
    Invalid(String),
    #[display(fmt = "Unsupported specifier {item} in format pattern {pattern}")]
    Unsupported { pattern: String, item: String },
    #[display(fmt = "Format pattern has no year field: {_0}")]
    MissingYear(String),
}

impl std::error::Error for PatternError {}

/// Calendar fields present in a pattern
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fields {
    pub year: bool,
    pub month: bool,
    pub day: bool,
    pub hour: bool,
    pub minute: bool,
    pub second: bool,
}

impl Pattern {
    /// Wraps a static pattern without validating it.
    ///
    /// Used for built-in constants; the registry validates every pattern it
    /// is constructed with.
    pub const fn from_static(pattern: &'static str) -> Self {
        Self(Cow::Borrowed(pattern))
    }

    /// Creates a validated pattern
    ///
    /// # Errors
    /// Returns `PatternError` if the pattern is empty, malformed, uses a
    /// specifier other than the numeric calendar fields, or has no year.
    pub fn new(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let pattern = Self(Cow::Owned(pattern.into()));
        pattern.fields()?;
        Ok(pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scans the pattern and reports which calendar fields it carries.
    ///
    /// # Errors
    /// Same conditions as [`Pattern::new`].
    pub fn fields(&self) -> Result<Fields, PatternError> {
        if self.0.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut fields = Fields::default();
        for item in StrftimeItems::new(&self.0) {
            match item {
                Item::Literal(_)
                | Item::OwnedLiteral(_)
                | Item::Space(_)
                | Item::OwnedSpace(_) => {}
                Item::Numeric(Numeric::Year | Numeric::YearMod100, _) => fields.year = true,
                Item::Numeric(Numeric::Month, _) => fields.month = true,
                Item::Numeric(Numeric::Day, _) => fields.day = true,
                Item::Numeric(Numeric::Hour, _) => fields.hour = true,
                Item::Numeric(Numeric::Minute, _) => fields.minute = true,
                Item::Numeric(Numeric::Second, _) => fields.second = true,
                Item::Error => return Err(PatternError::Invalid(self.0.to_string())),
                other => {
                    return Err(PatternError::Unsupported {
                        pattern: self.0.to_string(),
                        item: format!("{other:?}"),
                    });
                }
            }
        }

        if !fields.year {
            return Err(PatternError::MissingYear(self.0.to_string()));
        }
        Ok(fields)
    }

    /// Renders a calendar value as text.
    ///
    /// # Errors
    /// Returns `PatternError` if the pattern is not valid.
    pub fn format(&self, at: &NaiveDateTime) -> Result<String, PatternError> {
        self.fields()?;
        self.format_checked(at)
    }

    /// Renders without re-scanning the pattern; callers have already
    /// validated it with [`Pattern::fields`].
    pub(crate) fn format_checked(&self, at: &NaiveDateTime) -> Result<String, PatternError> {
        let mut out = String::new();
        write!(out, "{}", at.format(&self.0))
            .map_err(|_| PatternError::Invalid(self.0.to_string()))?;
        Ok(out)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.0.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_valid() {
        let pattern = Pattern::new("%Y%m%d %H%M%S").unwrap();
        assert_eq!(pattern.as_str(), "%Y%m%d %H%M%S");
        assert_eq!(pattern.to_string(), "%Y%m%d %H%M%S");
    }

    #[test]
    fn test_fields() {
        let fields = Pattern::new("%Y%m").unwrap().fields().unwrap();
        assert!(fields.year && fields.month);
        assert!(!fields.day);
        assert!(!(fields.hour || fields.minute || fields.second));

        let fields = Pattern::new("%d-%m/%y %H:%M:%S").unwrap().fields().unwrap();
        assert!(fields.year && fields.month && fields.day);
        assert!(fields.hour && fields.minute && fields.second);
    }

    #[test]
    fn test_empty() {
        assert_eq!(Pattern::new(""), Err(PatternError::Empty));
    }

    #[test]
    fn test_invalid_specifier() {
        let result = Pattern::new("%Y%");
        assert!(matches!(result, Err(PatternError::Invalid(_))));
    }

    #[test]
    fn test_unsupported_specifier() {
        let result = Pattern::new("%Y-%b");
        assert!(matches!(result, Err(PatternError::Unsupported { .. })));
    }

    #[test]
    fn test_missing_year() {
        let result = Pattern::new("%m%d");
        assert_eq!(result, Err(PatternError::MissingYear("%m%d".to_owned())));
    }

    #[test]
    fn test_from_static_is_unchecked() {
        let pattern = Pattern::from_static("%m");
        assert!(pattern.fields().is_err());
    }

    #[test]
    fn test_format() {
        let at = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let pattern = Pattern::new("%Y%m%d%H%M%S").unwrap();
        assert_eq!(pattern.format(&at).unwrap(), "20200229235959");

        let pattern = Pattern::new("%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(pattern.format(&at).unwrap(), "2020-02-29 23:59:59");
    }

    #[test]
    fn test_format_rejects_invalid_pattern() {
        let at = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(Pattern::from_static("%Y%").format(&at).is_err());
    }

    #[test]
    fn test_serde() {
        let pattern = Pattern::new("%Y%m").unwrap();
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, r#""%Y%m""#);
        let parsed: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pattern);

        let result: Result<Pattern, _> = serde_json::from_str(r#""%m%d""#);
        assert!(result.is_err());
    }
}
