/// Number of bytes in a kennitala
pub const LENGTH: usize = 10;

/// Number of leading digits covered by the check digit (positions 0-7)
pub const PAYLOAD_LENGTH: usize = 8;

/// Position of the first day digit; its value also selects the category band
pub const DAY_POSITION: usize = 0;
/// Position of the first month digit
pub const MONTH_POSITION: usize = 2;
/// Position of the first digit of the two-digit year
pub const YEAR_POSITION: usize = 4;
/// Position of the first digit of the serial field
pub const SERIAL_POSITION: usize = 6;
/// Position of the check digit
pub const CHECK_DIGIT_POSITION: usize = 8;
/// Position of the century marker
pub const CENTURY_POSITION: usize = 9;

/// Weights applied to positions 0-7 when computing the check digit
pub const WEIGHTS: [u8; PAYLOAD_LENGTH] = [3, 2, 7, 6, 5, 4, 3, 2];

/// Modulus of the weighted checksum
pub const MODULUS: u16 = 11;

/// Leading digits of individuals
pub const INDIVIDUAL_DIGITS: &[u8] = b"0123";
/// Leading digits of companies
pub const COMPANY_DIGITS: &[u8] = b"4567";
/// Leading digits of system (organizational) entities
pub const SYSTEM_DIGITS: &[u8] = b"89";

/// Added to the day of month by company identifiers
pub const COMPANY_DAY_OFFSET: u8 = 40;
/// Added to the day of month by system identifiers
pub const SYSTEM_DAY_OFFSET: u8 = 80;

/// Century marker for years 1800-1899
pub const MARKER_1800: u8 = b'8';
/// Century marker for years 1900-1999
pub const MARKER_1900: u8 = b'9';
/// Century marker for years 2000-2099
pub const MARKER_2000: u8 = b'0';

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator between the date and the serial part in the printed form
pub const GROUP_SEPARATOR: char = '-';
