use tracing::{debug, trace};

use crate::convert::parse_literal;
use crate::{DateLike, Error, Pattern, Registry};

impl Registry {
    /// Finds the format `value` is written in.
    ///
    /// For a batch only the first element is inspected; the rest are assumed
    /// to share its type and format. Candidates whose length differs from the
    /// literal are skipped, the rest are strict-parsed in registry order and
    /// the first success wins. A fixed format short-circuits detection.
    ///
    /// # Errors
    /// Returns `Error::FloatFormat` for a float with a fractional part,
    /// `Error::EmptyBatch` for a batch without elements and
    /// `Error::UnknownFormat` when no candidate matches.
    pub fn detect_format(&self, value: &DateLike) -> Result<&Pattern, Error> {
        if let Some(fixed) = self.fixed_format() {
            trace!(pattern = %fixed, "using fixed format");
            return Ok(fixed);
        }

        let representative = value.representative()?;
        let literal = representative.literal()?;
        let length = literal.chars().count();

        for candidate in self.candidates() {
            if candidate.length() != length {
                trace!(
                    pattern = %candidate.pattern(),
                    expected = candidate.length(),
                    length,
                    "skipping candidate"
                );
                continue;
            }
            match parse_literal(&literal, candidate.pattern()) {
                Ok(_) => {
                    debug!(%literal, pattern = %candidate.pattern(), "detected format");
                    return Ok(candidate.pattern());
                }
                Err(err) => {
                    trace!(%literal, pattern = %candidate.pattern(), %err, "candidate rejected");
                }
            }
        }

        Err(Error::UnknownFormat {
            value:      representative.to_string(),
            candidates: self
                .candidates()
                .iter()
                .map(|c| c.pattern().to_string())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Candidate, RegistryConfig};

    fn detect(value: impl Into<DateLike>) -> Result<String, Error> {
        Registry::default()
            .detect_format(&value.into())
            .map(ToString::to_string)
    }

    #[test]
    fn test_first_matching_format() {
        assert_eq!(detect(202211).unwrap(), "%Y%m");
        assert_eq!(detect("20220304").unwrap(), "%Y%m%d");
        assert_eq!(detect(20220708).unwrap(), "%Y%m%d");
        assert_eq!(detect(20221108.0).unwrap(), "%Y%m%d");
        assert_eq!(detect(20221108235959_i64).unwrap(), "%Y%m%d%H%M%S");
        assert_eq!(detect(20221108235950.0).unwrap(), "%Y%m%d%H%M%S");
        assert_eq!(detect("20221108 235959").unwrap(), "%Y%m%d %H%M%S");
    }

    #[test]
    fn test_first_matching_format_batch() {
        assert_eq!(detect(vec![202211_i64, 202211]).unwrap(), "%Y%m");
        assert_eq!(detect(vec!["20220304", "20220304"]).unwrap(), "%Y%m%d");
        assert_eq!(detect(vec![20220708_i64, 20220708]).unwrap(), "%Y%m%d");
        assert_eq!(detect(vec![20221108.0, 20221108.0]).unwrap(), "%Y%m%d");
        assert_eq!(
            detect(vec![20221108235959_i64, 20221108235959]).unwrap(),
            "%Y%m%d%H%M%S"
        );
        assert_eq!(
            detect(vec!["20221108 235959", "20221108 235959"]).unwrap(),
            "%Y%m%d %H%M%S"
        );
    }

    #[test]
    fn test_batch_uses_first_element_only() {
        assert_eq!(detect(vec!["202211", "not a date"]).unwrap(), "%Y%m");
    }

    #[test]
    fn test_float_with_non_zero_decimal_part() {
        assert!(matches!(detect(20220707.1), Err(Error::FloatFormat { .. })));
        assert!(matches!(detect(vec![20220707.1]), Err(Error::FloatFormat { .. })));
    }

    #[test]
    fn test_invalid_format_input() {
        for invalid in [DateLike::from(2022071), DateLike::from(202271), DateLike::from("asdasd")] {
            let err = detect(invalid.clone()).unwrap_err();
            assert!(matches!(err, Error::UnknownFormat { .. }));
            assert!(err.to_string().contains(&invalid.to_string()));
        }
    }

    #[test]
    fn test_invalid_format_input_batch() {
        let err = detect(vec![2022071_i64, 2022071]).unwrap_err();
        assert!(err.to_string().contains("\"2022071\""));

        let err = detect(vec!["asdasd", "asdasd"]).unwrap_err();
        assert!(err.to_string().contains("\"asdasd\""));
    }

    #[test]
    fn test_unknown_format_lists_candidates() {
        let Err(Error::UnknownFormat { value, candidates }) = detect(2022071.0) else {
            panic!("expected UnknownFormat");
        };
        assert_eq!(value, "2022071.0");
        assert_eq!(candidates, vec!["%Y%m%d", "%Y%m", "%Y%m%d%H%M%S", "%Y%m%d %H%M%S"]);
    }

    #[test]
    fn test_loosely_matching_literals_are_unknown() {
        for literal in [" 2022071", "2022 7 1", "2022 701"] {
            let err = detect(literal).unwrap_err();
            assert!(matches!(err, Error::UnknownFormat { .. }), "{literal:?}: {err}");
        }
        assert!(matches!(
            detect(vec![" 2022071", "20220701"]),
            Err(Error::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(detect(Vec::<i64>::new()), Err(Error::EmptyBatch)));
    }

    #[test]
    fn test_length_narrows_before_parsing() {
        let registry = Registry::new(RegistryConfig {
            candidates: vec![
                Candidate::from_static("%Y%m", 6),
                Candidate::from_static("%Y%m%d", 8),
            ],
            ..RegistryConfig::default()
        })
        .unwrap();
        let pattern = registry.detect_format(&DateLike::from(202207)).unwrap();
        assert_eq!(pattern.as_str(), "%Y%m");
    }

    #[test]
    fn test_registry_order_breaks_ties() {
        let registry = Registry::new(RegistryConfig {
            candidates: vec![
                Candidate::from_static("%d%m%Y", 8),
                Candidate::from_static("%Y%m%d", 8),
            ],
            ..RegistryConfig::default()
        })
        .unwrap();
        // Both read "01022022" but day-first is registered first.
        let pattern = registry.detect_format(&DateLike::from("01022022")).unwrap();
        assert_eq!(pattern.as_str(), "%d%m%Y");
        // Only the second parses a year-first literal.
        let pattern = registry.detect_format(&DateLike::from("20221231")).unwrap();
        assert_eq!(pattern.as_str(), "%Y%m%d");
    }

    #[test]
    fn test_fixed_format_skips_detection() {
        let registry = Registry::new(RegistryConfig {
            fixed_format: Some(Pattern::new("%d/%m/%Y").unwrap()),
            ..RegistryConfig::default()
        })
        .unwrap();
        let pattern = registry.detect_format(&DateLike::from("31/01/2022")).unwrap();
        assert_eq!(pattern.as_str(), "%d/%m/%Y");
    }
}
