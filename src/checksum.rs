//! Weighted modulo-11 check digit.

use crate::ValidationError;
use crate::consts::{CHECK_DIGIT_POSITION, LENGTH, MODULUS, PAYLOAD_LENGTH, WEIGHTS};
use crate::types::ascii_digit;

/// Computes the check digit for an 8-digit payload (positions 0-7).
///
/// # Errors
/// Returns `ValidationError::InvalidLength` if `payload` is not 8 bytes long and
/// `ValidationError::InvalidCheckDigit` if it holds a non-digit or has no valid
/// check digit.
pub fn check_digit(payload: &str) -> Result<u8, ValidationError> {
    let payload: &[u8; PAYLOAD_LENGTH] = payload
        .as_bytes()
        .try_into()
        .map_err(|_| ValidationError::InvalidLength(payload.len()))?;
    compute(payload)
}

pub(crate) fn compute(payload: &[u8; PAYLOAD_LENGTH]) -> Result<u8, ValidationError> {
    let mut sum: u16 = 0;
    for (&byte, &weight) in payload.iter().zip(WEIGHTS.iter()) {
        let digit = ascii_digit(byte).ok_or(ValidationError::InvalidCheckDigit)?;
        sum += u16::from(digit) * u16::from(weight);
    }

    match sum % MODULUS {
        0 => Ok(0),
        // 11 - 1 = 10 does not fit in one digit
        1 => Err(ValidationError::InvalidCheckDigit),
        remainder => {
            u8::try_from(MODULUS - remainder).map_err(|_| ValidationError::InvalidCheckDigit)
        }
    }
}

/// Recomputes the check digit of a full identifier and compares it with position 8
pub(crate) fn verify(digits: &[u8; LENGTH]) -> Result<(), ValidationError> {
    let payload = digits
        .first_chunk::<PAYLOAD_LENGTH>()
        .ok_or(ValidationError::InvalidCheckDigit)?;
    let expected = compute(payload)?;
    let supplied =
        ascii_digit(digits[CHECK_DIGIT_POSITION]).ok_or(ValidationError::InvalidCheckDigit)?;

    if supplied != expected {
        return Err(ValidationError::InvalidCheckDigit);
    }
    Ok(())
}
