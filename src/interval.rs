use std::ops::{Add, Sub};

use chrono::{Months, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{DateLike, Error, MONTHS_PER_YEAR, prelude::*};

/// A signed calendar offset of years, months and days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{years}y {months}m {days}d")]
#[serde(default)]
pub struct Interval {
    years:  i32,
    months: i32,
    days:   i64,
}

impl Interval {
    pub const fn new(years: i32, months: i32, days: i64) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    pub const fn years(&self) -> i32 {
        self.years
    }

    pub const fn months(&self) -> i32 {
        self.months
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Years folded into months
    pub fn total_months(&self) -> i64 {
        i64::from(self.years) * MONTHS_PER_YEAR + i64::from(self.months)
    }

    /// Negates every component, or `None` if one of them is the minimum
    /// value of its type.
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self {
            years:  self.years.checked_neg()?,
            months: self.months.checked_neg()?,
            days:   self.days.checked_neg()?,
        })
    }

    /// Shifts a calendar value by this interval, see [`offset`].
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result is not representable.
    pub fn apply(self, at: NaiveDateTime) -> Result<NaiveDateTime, Error> {
        offset(at, self)
    }
}

/// Shifts `at` by whole months first, clamping the day to the last day of
/// the target month, then by days. Time of day is kept.
///
/// `2022-01-31 + 1 month` is `2022-02-28`, and `2020-01-31 + 1 month` is
/// `2020-02-29`.
///
/// # Errors
/// Returns `Error::OutOfRange` if any step leaves the supported calendar.
pub fn offset(at: NaiveDateTime, interval: Interval) -> Result<NaiveDateTime, Error> {
    let total = interval.total_months();
    let magnitude = u32::try_from(total.unsigned_abs()).map_err(|_| Error::OutOfRange)?;
    let magnitude = Months::new(magnitude);
    let shifted = if total >= 0 {
        at.checked_add_months(magnitude)
    } else {
        at.checked_sub_months(magnitude)
    }
    .ok_or(Error::OutOfRange)?;

    let days = TimeDelta::try_days(interval.days).ok_or(Error::OutOfRange)?;
    shifted.checked_add_signed(days).ok_or(Error::OutOfRange)
}

pub const fn years(n: i32) -> Interval {
    Interval::new(n, 0, 0)
}

pub const fn months(n: i32) -> Interval {
    Interval::new(0, n, 0)
}

pub const fn days(n: i64) -> Interval {
    Interval::new(0, 0, n)
}

pub const fn timedelta(years: i32, months: i32, days: i64) -> Interval {
    Interval::new(years, months, days)
}

/// Componentwise, saturating at the bounds of each field.
impl Add for Interval {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            years:  self.years.saturating_add(rhs.years),
            months: self.months.saturating_add(rhs.months),
            days:   self.days.saturating_add(rhs.days),
        }
    }
}

impl Add<Interval> for &DateLike {
    type Output = Result<DateLike, Error>;

    fn add(self, rhs: Interval) -> Self::Output {
        crate::registry().add(self, rhs)
    }
}

impl Add<Interval> for DateLike {
    type Output = Result<Self, Error>;

    fn add(self, rhs: Interval) -> Self::Output {
        &self + rhs
    }
}

impl Add<&DateLike> for Interval {
    type Output = Result<DateLike, Error>;

    fn add(self, rhs: &DateLike) -> Self::Output {
        rhs + self
    }
}

impl Add<DateLike> for Interval {
    type Output = Result<DateLike, Error>;

    fn add(self, rhs: DateLike) -> Self::Output {
        &rhs + self
    }
}

impl Sub<Interval> for &DateLike {
    type Output = Result<DateLike, Error>;

    fn sub(self, rhs: Interval) -> Self::Output {
        crate::registry().sub(self, rhs)
    }
}

impl Sub<Interval> for DateLike {
    type Output = Result<Self, Error>;

    fn sub(self, rhs: Interval) -> Self::Output {
        &self - rhs
    }
}
