mod checksum;
mod consts;
mod date;
mod prelude;
mod types;

pub use checksum::check_digit;
pub use consts::*;
pub use date::BirthDate;
pub use types::{Category, Century, days_in_month, is_leap_year};

use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use types::{ascii_digit, two_digits};

/// Reasons a string is not a valid kennitala.
/// Validation stops at the first failing check, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    /// The requested category is not a singleton or `Category::ALL`.
    #[error("Invalid kennitala category: {0}")]
    InvalidCategory(Category),

    /// The input is not exactly `LENGTH` bytes long.
    #[error("Invalid kennitala length: {0} (must be {expected})", expected = LENGTH)]
    InvalidLength(usize),

    /// The century marker at position 9 is not `8`, `9` or `0`.
    #[error("Invalid century marker in kennitala")]
    InvalidCentury,

    /// The leading digit does not belong to the requested category.
    #[error("Invalid first digit in kennitala for the requested category")]
    InvalidFirstDigit,

    /// The check digit is missing, malformed or does not match.
    #[error("Invalid check digit in kennitala")]
    InvalidCheckDigit,

    /// The encoded birthdate is not a real calendar date.
    #[error("Invalid birthdate in kennitala")]
    InvalidDate,
}

/// A validated Icelandic national identification number.
///
/// Holds the 10 ASCII digits together with the values decoded from them, so
/// accessors never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kennitala {
    digits: [u8; LENGTH],
    category: Category,
    birth_date: BirthDate,
    century: Century,
}

impl Kennitala {
    /// Validates `input` against `category` and returns the decoded value.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// category argument, length, century and date, leading digit, check digit.
    ///
    /// # Errors
    /// Returns the `ValidationError` of the first failing check.
    pub fn parse(input: &str, category: Category) -> Result<Self, ValidationError> {
        let result = Self::parse_checked(input, category);
        match &result {
            Ok(kennitala) => trace!(category = %kennitala.category, "kennitala accepted"),
            Err(error) => debug!(%error, %category, len = input.len(), "kennitala rejected"),
        }
        result
    }

    fn parse_checked(input: &str, category: Category) -> Result<Self, ValidationError> {
        let category = category.validate()?;

        let digits: [u8; LENGTH] = input
            .as_bytes()
            .try_into()
            .map_err(|_| ValidationError::InvalidLength(input.len()))?;

        let (birth_date, century) = BirthDate::decode(&digits)?;

        let leading = digits[DAY_POSITION];
        if !category.allows(leading) {
            return Err(ValidationError::InvalidFirstDigit);
        }
        let category =
            Category::of_leading_digit(leading).ok_or(ValidationError::InvalidFirstDigit)?;

        checksum::verify(&digits)?;

        Ok(Self {
            digits,
            category,
            birth_date,
            century,
        })
    }

    /// Returns the single category the leading digit belongs to
    #[inline]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the encoded birthdate (or registration date for companies)
    #[inline]
    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    /// Returns the century selected by the marker at position 9
    #[inline]
    pub const fn century(&self) -> Century {
        self.century
    }

    /// Returns the two-digit serial field (positions 6-7)
    pub fn serial(&self) -> u8 {
        two_digits(self.digits[SERIAL_POSITION], self.digits[SERIAL_POSITION + 1]).unwrap_or(0)
    }

    /// Returns the check digit (position 8)
    pub fn check_digit(&self) -> u8 {
        ascii_digit(self.digits[CHECK_DIGIT_POSITION]).unwrap_or(0)
    }

    pub fn is_person(&self) -> bool {
        self.category == Category::INDIVIDUAL
    }

    pub fn is_company(&self) -> bool {
        self.category == Category::COMPANY
    }

    pub fn is_system(&self) -> bool {
        self.category == Category::SYSTEM
    }

    /// Returns the bare 10 digits
    pub fn as_str(&self) -> &str {
        // Validated input is pure ASCII
        std::str::from_utf8(&self.digits).unwrap_or_default()
    }

    /// Returns the printed form `DDMMYY-SSCM`
    pub fn formatted(&self) -> String {
        let (date, rest) = self.as_str().split_at(SERIAL_POSITION);
        format!("{date}{GROUP_SEPARATOR}{rest}")
    }
}

/// Checks that `identifier` is a well-formed kennitala of the requested category.
///
/// # Errors
/// Returns the `ValidationError` of the first failing check.
pub fn validate(identifier: &str, category: Category) -> Result<(), ValidationError> {
    Kennitala::parse(identifier, category).map(|_| ())
}

/// Same as `validate(identifier, Category::INDIVIDUAL)`.
///
/// # Errors
/// Returns the `ValidationError` of the first failing check.
pub fn is_person(identifier: &str) -> Result<(), ValidationError> {
    validate(identifier, Category::INDIVIDUAL)
}

/// Same as `validate(identifier, Category::COMPANY)`.
///
/// # Errors
/// Returns the `ValidationError` of the first failing check.
pub fn is_company(identifier: &str) -> Result<(), ValidationError> {
    validate(identifier, Category::COMPANY)
}

/// Same as `validate(identifier, Category::SYSTEM)`.
///
/// # Errors
/// Returns the `ValidationError` of the first failing check.
pub fn is_system(identifier: &str) -> Result<(), ValidationError> {
    validate(identifier, Category::SYSTEM)
}

impl FromStr for Kennitala {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Category::ALL)
    }
}

impl TryFrom<&str> for Kennitala {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Kennitala {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Kennitala {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Kennitala {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn singleton() -> impl Strategy<Value = Category> {
        prop_oneof![
            Just(Category::INDIVIDUAL),
            Just(Category::COMPANY),
            Just(Category::SYSTEM),
        ]
    }

    fn accepted_category() -> impl Strategy<Value = Category> {
        prop_oneof![singleton(), Just(Category::ALL)]
    }

    /// Valid identifiers built from their parts, paired with their category and date
    fn valid_kennitala() -> impl Strategy<Value = (String, Category, BirthDate)> {
        (singleton(), 1800u16..=2099, 1u8..=12, 1u8..=19, 0u8..=99).prop_filter_map(
            "payload has no check digit",
            |(category, year, month, day, serial)| {
                let century = match year / 100 {
                    18 => Century::Y1800,
                    19 => Century::Y1900,
                    _ => Century::Y2000,
                };
                let payload = format!(
                    "{:02}{month:02}{:02}{serial:02}",
                    day + category.day_offset(),
                    year % 100
                );
                let check = check_digit(&payload).ok()?;
                let date = BirthDate::new(year, month, day).ok()?;
                Some((format!("{payload}{check}{}", century.marker()), category, date))
            },
        )
    }

    proptest! {
        #[test]
        fn prop_wrong_length_is_rejected(input in "[0-9]{0,9}|[0-9]{11,16}", category in accepted_category()) {
            prop_assert_eq!(
                validate(&input, category),
                Err(ValidationError::InvalidLength(input.len()))
            );
        }

        #[test]
        fn prop_any_wrong_length_is_rejected(input in any::<String>().prop_filter("length 10", |s| s.len() != LENGTH)) {
            prop_assert_eq!(
                validate(&input, Category::ALL),
                Err(ValidationError::InvalidLength(input.len()))
            );
        }

        #[test]
        fn prop_unlisted_category_is_rejected(bits in any::<u8>(), input in ".*") {
            let category = Category::from_bits(bits);
            prop_assume!(!matches!(bits, 0b001 | 0b010 | 0b100 | 0b111));
            prop_assert_eq!(
                validate(&input, category),
                Err(ValidationError::InvalidCategory(category))
            );
        }

        #[test]
        fn prop_unknown_century_is_rejected(input in "[0-9]{9}[1-7A-Za-z]", category in accepted_category()) {
            prop_assert_eq!(validate(&input, category), Err(ValidationError::InvalidCentury));
        }

        #[test]
        fn prop_month_out_of_range_is_rejected(
            day in 1u8..=28,
            month in 13u8..=99,
            rest in "[0-9]{5}[089]",
        ) {
            let input = format!("{day:02}{month:02}{rest}");
            prop_assert_eq!(validate(&input, Category::ALL), Err(ValidationError::InvalidDate));
        }

        #[test]
        fn prop_built_identifiers_validate((input, category, date) in valid_kennitala()) {
            let kt = Kennitala::parse(&input, category).unwrap();
            prop_assert_eq!(kt.category(), category);
            prop_assert_eq!(kt.birth_date(), date);
            prop_assert_eq!(kt.as_str(), input.as_str());
            prop_assert_eq!(validate(&input, Category::ALL), Ok(()));
        }

        #[test]
        fn prop_other_category_is_first_digit_error(
            (input, category, _) in valid_kennitala(),
            requested in singleton(),
        ) {
            prop_assume!(requested != category);
            prop_assert_eq!(validate(&input, requested), Err(ValidationError::InvalidFirstDigit));
        }

        #[test]
        fn prop_check_digit_is_reproduced((input, _, _) in valid_kennitala()) {
            let (payload, rest) = input.split_at(PAYLOAD_LENGTH);
            let expected = check_digit(payload).unwrap();
            prop_assert_eq!(rest.as_bytes()[0], b'0' + expected);
        }

        #[test]
        fn prop_serial_mutation_breaks_checksum(
            (input, _, _) in valid_kennitala(),
            position in SERIAL_POSITION..CHECK_DIGIT_POSITION,
            replacement in b'0'..=b'9',
        ) {
            let mut bytes = input.into_bytes();
            prop_assume!(bytes[position] != replacement);
            bytes[position] = replacement;
            let mutated = String::from_utf8(bytes).unwrap();
            prop_assert_eq!(
                validate(&mutated, Category::ALL),
                Err(ValidationError::InvalidCheckDigit)
            );
        }

        #[test]
        fn prop_validate_is_idempotent(input in ".{0,12}", bits in 0u8..8) {
            let category = Category::from_bits(bits);
            prop_assert_eq!(validate(&input, category), validate(&input, category));
        }
    }
}
