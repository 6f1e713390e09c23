use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CANDIDATES, DEFAULT_FORMAT, Pattern, PatternError};

/// A pattern plus the exact number of characters a matching literal has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pattern: Pattern,
    length:  usize,
}

impl Candidate {
    pub const fn new(pattern: Pattern, length: usize) -> Self {
        Self { pattern, length }
    }

    /// Builds a candidate from a static pattern without validating it
    pub const fn from_static(pattern: &'static str, length: usize) -> Self {
        Self::new(Pattern::from_static(pattern), length)
    }

    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    /// Checks that the pattern is valid and that it renders to exactly the
    /// declared number of characters.
    fn validate(&self) -> Result<(), ConfigError> {
        let rendered = self.pattern.format(&NaiveDateTime::default())?;
        let rendered = rendered.chars().count();
        if rendered != self.length {
            return Err(ConfigError::LengthMismatch {
                pattern:  self.pattern.clone(),
                declared: self.length,
                rendered,
            });
        }
        Ok(())
    }
}

/// Serializable description of a [`Registry`]. Missing keys fall back to
/// the built-in formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Format used by output-only operations such as `today`
    pub default_format: Pattern,
    /// Formats tried during detection, in order
    pub candidates:     Vec<Candidate>,
    /// When set, every value is assumed to use this format and detection is
    /// skipped
    pub fixed_format:   Option<Pattern>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_FORMAT,
            candidates:     DEFAULT_CANDIDATES.to_vec(),
            fixed_format:   None,
        }
    }
}

/// Error type for registry construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither candidates nor a fixed format were given.
    #[error("No candidate formats configured")]
    NoCandidates,

    /// A candidate's declared length disagrees with what its pattern renders.
    #[error("Candidate {pattern} declares length {declared} but renders {rendered} characters")]
    LengthMismatch {
        pattern:  Pattern,
        declared: usize,
        rendered: usize,
    },

    /// `today` must be representable as an integer.
    #[error("Default format {pattern} does not render as an integer (\"{rendered}\")")]
    NonNumericDefault { pattern: Pattern, rendered: String },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// The formats this process is willing to recognize.
///
/// Immutable once built. Candidate order is the tie-break policy: the first
/// candidate whose length matches and which parses the value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    default_format: Pattern,
    candidates:     Vec<Candidate>,
    fixed_format:   Option<Pattern>,
}

impl Registry {
    /// Builds a registry, validating every pattern in the configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` if a pattern is invalid, a candidate length is
    /// inconsistent with its pattern, the default format is not numeric, or
    /// there is nothing to detect with.
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        let RegistryConfig {
            default_format,
            candidates,
            fixed_format,
        } = config;

        if candidates.is_empty() && fixed_format.is_none() {
            return Err(ConfigError::NoCandidates);
        }
        for candidate in &candidates {
            candidate.validate()?;
        }
        if let Some(fixed) = &fixed_format {
            fixed.fields()?;
        }

        let rendered = default_format.format(&NaiveDateTime::default())?;
        if !rendered.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::NonNumericDefault {
                pattern: default_format,
                rendered,
            });
        }

        Ok(Self {
            default_format,
            candidates,
            fixed_format,
        })
    }

    pub const fn default_format(&self) -> &Pattern {
        &self.default_format
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub const fn fixed_format(&self) -> Option<&Pattern> {
        self.fixed_format.as_ref()
    }
}

impl Default for Registry {
    fn default() -> Self {
        let RegistryConfig {
            default_format,
            candidates,
            fixed_format,
        } = RegistryConfig::default();
        Self {
            default_format,
            candidates,
            fixed_format,
        }
    }
}

impl TryFrom<RegistryConfig> for Registry {
    type Error = ConfigError;

    fn try_from(config: RegistryConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl From<Registry> for RegistryConfig {
    fn from(registry: Registry) -> Self {
        Self {
            default_format: registry.default_format,
            candidates:     registry.candidates,
            fixed_format:   registry.fixed_format,
        }
    }
}
