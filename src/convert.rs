//! Conversion between date-like values and calendar values.

use chrono::NaiveDateTime;
use chrono::format::{self, Parsed, StrftimeItems};

use crate::consts::{FIRST, MIDNIGHT};
use crate::{Batch, DateLike, Error, Fields, Kind, Pattern, Representation, Values};

/// Strictly parses one literal: the whole text must match `pattern`.
/// Fields the pattern does not carry default to the start of their period.
///
/// # Errors
/// Returns `Error::Pattern` for an invalid pattern, `Error::Parse` when
/// the literal does not match and `Error::Inexact` when it matches only
/// loosely (unpadded fields, stray whitespace).
pub fn parse_literal(literal: &str, pattern: &Pattern) -> Result<NaiveDateTime, Error> {
    let fields = pattern.fields()?;
    parse_with_fields(literal, pattern, fields)
}

fn parse_with_fields(
    literal: &str,
    pattern: &Pattern,
    fields: Fields,
) -> Result<NaiveDateTime, Error> {
    let fail = |source| Error::Parse {
        literal: literal.to_owned(),
        pattern: pattern.clone(),
        source,
    };

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, literal, StrftimeItems::new(pattern.as_str())).map_err(fail)?;

    if !fields.month {
        parsed.set_month(FIRST).map_err(fail)?;
    }
    if !fields.day {
        parsed.set_day(FIRST).map_err(fail)?;
    }
    if !fields.hour {
        parsed.set_hour(MIDNIGHT).map_err(fail)?;
    }
    if !fields.minute {
        parsed.set_minute(MIDNIGHT).map_err(fail)?;
    }
    if !fields.second {
        parsed.set_second(MIDNIGHT).map_err(fail)?;
    }

    let date = parsed.to_naive_date().map_err(fail)?;
    let time = parsed.to_naive_time().map_err(fail)?;
    let at = date.and_time(time);

    // chrono skips whitespace before numbers and accepts short fields.
    if pattern.format_checked(&at)? != literal {
        return Err(Error::Inexact {
            literal: literal.to_owned(),
            pattern: pattern.clone(),
        });
    }
    Ok(at)
}

/// Parses a scalar or every element of a batch with one pattern.
///
/// # Errors
/// Returns `Error::FloatFormat` for floats with a fractional part, or the
/// first `parse_literal` failure.
pub fn parse(value: &DateLike, pattern: &Pattern) -> Result<Values<NaiveDateTime>, Error> {
    let fields = pattern.fields()?;
    value
        .literals()?
        .try_map(|literal| parse_with_fields(&literal, pattern, fields))
}

/// Formats calendar values with `pattern` and coerces the text into
/// `representation`.
///
/// # Errors
/// Returns `Error::InvalidType` when a scalar is rendered into a batch
/// representation or the reverse, and `Error::Coercion` when the text is not
/// a number but a numeric kind was requested.
pub fn render(
    calendar: &Values<NaiveDateTime>,
    pattern: &Pattern,
    representation: Representation,
) -> Result<DateLike, Error> {
    pattern.fields()?;
    match (calendar, representation) {
        (Values::Scalar(at), Representation::Scalar(kind)) => {
            coerce(pattern.format_checked(at)?, kind)
        }
        (Values::Batch(ats), Representation::Batch(kind)) => {
            let texts = ats
                .iter()
                .map(|at| pattern.format_checked(at))
                .collect::<Result<Vec<_>, _>>()?;
            coerce_batch(texts, kind).map(DateLike::Batch)
        }
        (Values::Scalar(_), expected) => Err(Error::InvalidType {
            expected,
            found: "scalar",
        }),
        (Values::Batch(_), expected) => Err(Error::InvalidType {
            expected,
            found: "batch",
        }),
    }
}

fn coerce(text: String, kind: Kind) -> Result<DateLike, Error> {
    match kind {
        Kind::Int => parse_int(&text).map(DateLike::Int),
        Kind::Float => parse_float(&text).map(DateLike::Float),
        Kind::Text => Ok(DateLike::Text(text)),
    }
}

fn coerce_batch(texts: Vec<String>, kind: Kind) -> Result<Batch, Error> {
    Ok(match kind {
        Kind::Int => Batch::Int(texts.iter().map(|t| parse_int(t)).collect::<Result<_, _>>()?),
        Kind::Float => {
            Batch::Float(texts.iter().map(|t| parse_float(t)).collect::<Result<_, _>>()?)
        }
        Kind::Text => Batch::Text(texts),
    })
}

pub(crate) fn parse_int(text: &str) -> Result<i64, Error> {
    text.parse().map_err(|_| Error::Coercion {
        text: text.to_owned(),
        kind: Kind::Int,
    })
}

fn parse_float(text: &str) -> Result<f64, Error> {
    text.parse().map_err(|_| Error::Coercion {
        text: text.to_owned(),
        kind: Kind::Float,
    })
}
