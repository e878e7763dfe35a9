use crate::ValidationError;
use crate::consts::{
    CENTURY_POSITION, DAY_POSITION, LENGTH, MAX_MONTH, MIN_DAY, MONTH_POSITION, YEAR_POSITION,
};
use crate::prelude::*;
use crate::types::{Category, Century, days_in_month, two_digits};

/// Calendar date encoded in the first six digits of a kennitala.
/// Fields are ordered so the derived `Ord` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct BirthDate {
    year: u16,
    month: u8,
    day: u8,
}

impl BirthDate {
    /// Decodes the date and century of a fixed-length identifier.
    ///
    /// The century marker is checked before the date. Company and system
    /// identifiers carry the day plus the offset of their leading-digit band,
    /// which is removed before the calendar check.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidCentury` for an unknown marker and
    /// `ValidationError::InvalidDate` for anything that is not a real
    /// calendar date, including non-digit bytes in positions 0-5.
    pub(crate) fn decode(digits: &[u8; LENGTH]) -> Result<(Self, Century), ValidationError> {
        let century = Century::from_marker(digits[CENTURY_POSITION])?;

        let field = |position: usize| {
            two_digits(digits[position], digits[position + 1]).ok_or(ValidationError::InvalidDate)
        };
        let raw_day = field(DAY_POSITION)?;
        let month = field(MONTH_POSITION)?;
        let year = field(YEAR_POSITION)?;

        let offset = Category::of_leading_digit(digits[DAY_POSITION])
            .map_or(0, Category::day_offset);
        let day = raw_day
            .checked_sub(offset)
            .ok_or(ValidationError::InvalidDate)?;

        let date = Self::new(century.base_year() + u16::from(year), month, day)?;
        Ok((date, century))
    }

    /// Creates a date after checking it against the Gregorian calendar
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDate` if the month is outside 1-12 or
    /// the day does not exist in that month.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ValidationError> {
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(ValidationError::InvalidDate);
        }
        if !(MIN_DAY..=days_in_month(year, month)).contains(&day) {
            return Err(ValidationError::InvalidDate);
        }
        Ok(Self { year, month, day })
    }

    /// Returns the full year
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month (1-12)
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of month, with any category offset removed
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Converts to a (year, month, day) tuple
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}
