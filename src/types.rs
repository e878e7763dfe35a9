use crate::ValidationError;
use crate::consts::{
    CENTURY_CYCLE, COMPANY_DAY_OFFSET, COMPANY_DIGITS, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, INDIVIDUAL_DIGITS, LEAP_YEAR_CYCLE, MARKER_1800, MARKER_1900, MARKER_2000,
    MAX_MONTH, SYSTEM_DAY_OFFSET, SYSTEM_DIGITS,
};
use crate::prelude::*;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Entity category of a kennitala holder, stored as independent flags.
///
/// Any bit pattern can be built with [`Category::from_bits`] or `|`, but only
/// the three singletons and [`Category::ALL`] pass [`Category::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(u8);

impl Category {
    /// Natural persons, leading digit 0-3
    pub const INDIVIDUAL: Self = Self(1);
    /// Companies and other legal entities, leading digit 4-7
    pub const COMPANY: Self = Self(1 << 1);
    /// System identifiers, leading digit 8 or 9
    pub const SYSTEM: Self = Self(1 << 2);
    /// Any of the three categories
    pub const ALL: Self = Self(Self::INDIVIDUAL.0 | Self::COMPANY.0 | Self::SYSTEM.0);

    const SINGLETONS: [Self; 3] = [Self::INDIVIDUAL, Self::COMPANY, Self::SYSTEM];

    /// Builds a category from raw flag bits without checking them
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw flag bits
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if any bit of `flag` is set in `self`
    #[inline]
    pub const fn has_flag(self, flag: Self) -> bool {
        self.0 & flag.0 != 0
    }

    /// Returns true for `INDIVIDUAL`, `COMPANY` and `SYSTEM`
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::INDIVIDUAL | Self::COMPANY | Self::SYSTEM)
    }

    /// Accepts the three singletons and `ALL`, rejecting every other combination
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidCategory` carrying the rejected value.
    pub const fn validate(self) -> Result<Self, ValidationError> {
        match self {
            Self::INDIVIDUAL | Self::COMPANY | Self::SYSTEM | Self::ALL => Ok(self),
            _ => Err(ValidationError::InvalidCategory(self)),
        }
    }

    /// ASCII leading digits owned by a singleton category (empty otherwise)
    pub const fn leading_digits(self) -> &'static [u8] {
        match self {
            Self::INDIVIDUAL => INDIVIDUAL_DIGITS,
            Self::COMPANY => COMPANY_DIGITS,
            Self::SYSTEM => SYSTEM_DIGITS,
            _ => &[],
        }
    }

    /// Returns the singleton category whose band contains the ASCII digit `byte`
    pub fn of_leading_digit(byte: u8) -> Option<Self> {
        Self::SINGLETONS
            .into_iter()
            .find(|category| category.leading_digits().contains(&byte))
    }

    /// Checks whether the ASCII digit `byte` may lead an identifier of any
    /// category flagged in `self`
    pub fn allows(self, byte: u8) -> bool {
        Self::SINGLETONS
            .into_iter()
            .filter(|&flag| self.has_flag(flag))
            .any(|flag| flag.leading_digits().contains(&byte))
    }

    /// Amount added to the day of month by identifiers of a singleton category
    pub(crate) const fn day_offset(self) -> u8 {
        match self {
            Self::COMPANY => COMPANY_DAY_OFFSET,
            Self::SYSTEM => SYSTEM_DAY_OFFSET,
            _ => 0,
        }
    }

    const fn name(self) -> Option<&'static str> {
        match self {
            Self::INDIVIDUAL => Some("individual"),
            Self::COMPANY => Some("company"),
            Self::SYSTEM => Some("system"),
            Self::ALL => Some("all"),
            _ => None,
        }
    }
}

impl BitOr for Category {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }

        // Unknown bits or no bits at all: show the raw value
        if self.0 & !Self::ALL.0 != 0 || self.0 == 0 {
            return write!(f, "{:#05b}", self.0);
        }

        let names: Vec<&str> = Self::SINGLETONS
            .into_iter()
            .filter(|&flag| self.has_flag(flag))
            .filter_map(Self::name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

/// Century selected by the marker at position 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Century {
    /// Marker `8`, years 1800-1899
    #[display(fmt = "1800s")]
    Y1800,
    /// Marker `9`, years 1900-1999
    #[display(fmt = "1900s")]
    Y1900,
    /// Marker `0`, years 2000-2099
    #[display(fmt = "2000s")]
    Y2000,
}

impl Century {
    /// Maps a century marker byte to its century
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidCentury` for any byte other than `8`, `9` or `0`.
    pub const fn from_marker(marker: u8) -> Result<Self, ValidationError> {
        match marker {
            MARKER_1800 => Ok(Self::Y1800),
            MARKER_1900 => Ok(Self::Y1900),
            MARKER_2000 => Ok(Self::Y2000),
            _ => Err(ValidationError::InvalidCentury),
        }
    }

    /// Returns the marker character written at position 9
    pub const fn marker(self) -> char {
        match self {
            Self::Y1800 => MARKER_1800 as char,
            Self::Y1900 => MARKER_1900 as char,
            Self::Y2000 => MARKER_2000 as char,
        }
    }

    /// First year of the century
    pub const fn base_year(self) -> u16 {
        match self {
            Self::Y1800 => 1800,
            Self::Y1900 => 1900,
            Self::Y2000 => 2000,
        }
    }
}

// Helper functions

/// Value of a single ASCII decimal digit
pub(crate) const fn ascii_digit(byte: u8) -> Option<u8> {
    if byte.is_ascii_digit() {
        Some(byte - b'0')
    } else {
        None
    }
}

/// Value of two ASCII decimal digits read as one number
pub(crate) const fn two_digits(high: u8, low: u8) -> Option<u8> {
    match (ascii_digit(high), ascii_digit(low)) {
        (Some(h), Some(l)) => Some(h * 10 + l),
        _ => None,
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
