use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::convert::{self, parse_int};
use crate::{DateLike, Error, Interval, Registry, Values};

impl Registry {
    /// Detects the format of `value`, parses it, applies `f` to every
    /// calendar value and renders the result back in the representation and
    /// format `value` arrived in.
    ///
    /// # Errors
    /// Any detection, parse or render failure, or the first error from `f`.
    pub fn transform<F>(&self, value: &DateLike, f: F) -> Result<DateLike, Error>
    where
        F: FnMut(NaiveDateTime) -> Result<NaiveDateTime, Error>,
    {
        let pattern = self.detect_format(value)?;
        let representation = value.representation();
        debug!(%pattern, %representation, "transforming value");

        let calendar = convert::parse(value, pattern)?.try_map(f)?;
        convert::render(&calendar, pattern, representation)
    }

    /// Like [`Registry::transform`] but returns whatever `f` computes
    /// instead of rendering a date.
    ///
    /// # Errors
    /// Any detection or parse failure.
    pub fn inspect<T, F>(&self, value: &DateLike, f: F) -> Result<Values<T>, Error>
    where
        F: FnMut(NaiveDateTime) -> T,
    {
        let pattern = self.detect_format(value)?;
        Ok(convert::parse(value, pattern)?.map(f))
    }

    /// Current local date in the default format, as an integer.
    ///
    /// # Errors
    /// Returns `Error::Coercion` if the default format does not render as an
    /// integer, which a validated registry rules out.
    pub fn today(&self) -> Result<i64, Error> {
        self.date_to_int(Local::now().date_naive())
    }

    /// Renders `date` in the default format, as an integer.
    ///
    /// # Errors
    /// Same as [`Registry::today`].
    pub fn date_to_int(&self, date: NaiveDate) -> Result<i64, Error> {
        let text = self.default_format().format(&date.and_time(NaiveTime::MIN))?;
        parse_int(&text)
    }

    /// Day of the week, Monday=0 through Sunday=6.
    ///
    /// # Errors
    /// Any detection or parse failure.
    pub fn weekday(&self, value: &DateLike) -> Result<Values<u32>, Error> {
        self.inspect(value, |at| at.weekday().num_days_from_monday())
    }

    /// Day of the week, Monday=1 through Sunday=7.
    ///
    /// # Errors
    /// Any detection or parse failure.
    pub fn isoweekday(&self, value: &DateLike) -> Result<Values<u32>, Error> {
        self.inspect(value, |at| at.weekday().number_from_monday())
    }

    /// Shifts `value` forward by `interval`, keeping its representation.
    ///
    /// # Errors
    /// Any detection, parse or render failure, or `Error::OutOfRange`.
    pub fn add(&self, value: &DateLike, interval: Interval) -> Result<DateLike, Error> {
        self.transform(value, |at| interval.apply(at))
    }

    /// Shifts `value` backward by `interval`. Identical to adding the
    /// negated interval.
    ///
    /// # Errors
    /// Same as [`Registry::add`]; negating a minimum component is
    /// `Error::OutOfRange`.
    pub fn sub(&self, value: &DateLike, interval: Interval) -> Result<DateLike, Error> {
        let negated = interval.checked_neg().ok_or(Error::OutOfRange)?;
        self.add(value, negated)
    }
}
