use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, prelude::*};

/// Element type of a date-like value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Kind {
    #[display(fmt = "integer")]
    Int,
    #[display(fmt = "float")]
    Float,
    #[display(fmt = "text")]
    Text,
}

/// Shape and element type a value arrived in, and is rendered back into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Representation {
    #[display(fmt = "{_0}")]
    Scalar(Kind),
    #[display(fmt = "batch of {_0}")]
    Batch(Kind),
}

/// A date or datetime written as a number or text, e.g. `20220110`,
/// `20220110.0` or `"20220110"`, or a homogeneous batch of them.
#[derive(Debug, Clone, PartialEq, From, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLike {
    Int(i64),
    Float(f64),
    Text(String),
    Batch(Batch),
}

/// An ordered column of date-like scalars sharing one element type.
#[derive(Debug, Clone, PartialEq, From, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Batch {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

/// Either one value or a batch of values, position preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values<T> {
    Scalar(T),
    Batch(Vec<T>),
}

impl<T> Values<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Values<U> {
        match self {
            Self::Scalar(value) => Values::Scalar(f(value)),
            Self::Batch(values) => Values::Batch(values.into_iter().map(f).collect()),
        }
    }

    /// Applies a fallible transform element by element, stopping at the
    /// first failure.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Values<U>, E> {
        match self {
            Self::Scalar(value) => f(value).map(Values::Scalar),
            Self::Batch(values) => values
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, _>>()
                .map(Values::Batch),
        }
    }

    pub const fn as_scalar(&self) -> Option<&T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Batch(_) => None,
        }
    }

    pub fn as_batch(&self) -> Option<&[T]> {
        match self {
            Self::Scalar(_) => None,
            Self::Batch(values) => Some(values),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Scalar(value) => vec![value],
            Self::Batch(values) => values,
        }
    }
}

impl Batch {
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Text(_) => Kind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first element as a scalar date-like value
    pub fn first(&self) -> Option<DateLike> {
        match self {
            Self::Int(values) => values.first().copied().map(DateLike::Int),
            Self::Float(values) => values.first().copied().map(DateLike::Float),
            Self::Text(values) => values.first().cloned().map(DateLike::Text),
        }
    }

    fn literals(&self) -> Result<Vec<String>, Error> {
        match self {
            Self::Int(values) => Ok(values.iter().map(i64::to_string).collect()),
            Self::Float(values) => values.iter().copied().map(float_literal).collect(),
            Self::Text(values) => Ok(values.clone()),
        }
    }
}

impl DateLike {
    pub const fn representation(&self) -> Representation {
        match self {
            Self::Int(_) => Representation::Scalar(Kind::Int),
            Self::Float(_) => Representation::Scalar(Kind::Float),
            Self::Text(_) => Representation::Scalar(Kind::Text),
            Self::Batch(batch) => Representation::Batch(batch.kind()),
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_batch(&self) -> Option<&Batch> {
        match self {
            Self::Batch(batch) => Some(batch),
            _ => None,
        }
    }

    /// The value detection looks at: the value itself, or the first element
    /// of a batch.
    pub(crate) fn representative(&self) -> Result<Cow<'_, Self>, Error> {
        match self {
            Self::Batch(batch) => batch.first().map(Cow::Owned).ok_or(Error::EmptyBatch),
            scalar => Ok(Cow::Borrowed(scalar)),
        }
    }

    /// Canonical literal text of a scalar: plain digits for numbers, the
    /// text verbatim otherwise.
    pub(crate) fn literal(&self) -> Result<String, Error> {
        match self {
            Self::Int(value) => Ok(value.to_string()),
            Self::Float(value) => float_literal(*value),
            Self::Text(value) => Ok(value.clone()),
            Self::Batch(batch) => Err(Error::InvalidType {
                expected: Representation::Scalar(batch.kind()),
                found: "batch",
            }),
        }
    }

    pub(crate) fn literals(&self) -> Result<Values<String>, Error> {
        match self {
            Self::Batch(batch) => batch.literals().map(Values::Batch),
            scalar => scalar.literal().map(Values::Scalar),
        }
    }
}

/// Floats are accepted only when they hold an integral value.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub(crate) fn float_literal(value: f64) -> Result<String, Error> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::FloatFormat { value });
    }
    Ok((value as i64).to_string())
}

impl fmt::Display for DateLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Text(value) => f.write_str(value),
            Self::Batch(batch) => write!(f, "{batch}"),
        }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(values) => write!(f, "{values:?}"),
            Self::Float(values) => write!(f, "{values:?}"),
            Self::Text(values) => write!(f, "{values:?}"),
        }
    }
}

impl From<i32> for DateLike {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for DateLike {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&DateLike> for DateLike {
    fn from(value: &DateLike) -> Self {
        value.clone()
    }
}

impl From<Vec<i64>> for DateLike {
    fn from(values: Vec<i64>) -> Self {
        Self::Batch(values.into())
    }
}

impl From<Vec<f64>> for DateLike {
    fn from(values: Vec<f64>) -> Self {
        Self::Batch(values.into())
    }
}

impl From<Vec<String>> for DateLike {
    fn from(values: Vec<String>) -> Self {
        Self::Batch(values.into())
    }
}

impl From<Vec<&str>> for DateLike {
    fn from(values: Vec<&str>) -> Self {
        Self::Batch(Batch::Text(values.into_iter().map(str::to_owned).collect()))
    }
}
