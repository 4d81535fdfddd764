mod entity_type;
mod error;

pub use entity_type::EntityType;
pub use error::TaxIdError;

/// Length of a tax id without its control digit
pub const SHORT_TAX_ID_LENGTH: usize = 8;
/// Length of a tax id including its control digit
pub const FULL_TAX_ID_LENGTH: usize = 9;

// One weight per digit following the leading letter.
const CHECK_DIGIT_WEIGHTS: [u32; 7] = [2, 1, 2, 1, 2, 1, 2];

/// Sum all the digits from a number
#[inline]
fn sum_all_digits(digits: u32) -> u32 {
    let mut sum = 0;
    let mut num = digits;
    while num > 0 {
        sum += num % 10;
        num /= 10;
    }
    sum
}

/// Uppercases the input and strips every character that is not an ASCII letter or digit.
/// Returns `None` when nothing is left.
pub fn normalize(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Checks the shape of a tax id: 8 or 9 characters, a known leading letter
/// and 7 digits after it. The control digit is not verified.
pub fn check_structure(id: &str) -> Result<(), TaxIdError> {
    let normalized = normalize(id).ok_or(TaxIdError::EmptyInput)?;
    check_normalized_structure(&normalized)
}

fn check_normalized_structure(id: &str) -> Result<(), TaxIdError> {
    let bytes = id.as_bytes();
    if bytes.len() != SHORT_TAX_ID_LENGTH && bytes.len() != FULL_TAX_ID_LENGTH {
        return Err(TaxIdError::InvalidLength(bytes.len()));
    }

    let letter = char::from(bytes[0]);
    if EntityType::from_letter(letter).is_none() {
        return Err(TaxIdError::InvalidLeadingLetter(letter));
    }

    if !bytes[1..SHORT_TAX_ID_LENGTH].iter().all(u8::is_ascii_digit) {
        return Err(TaxIdError::NonDigitBody);
    }
    Ok(())
}

/// Computes the control digit from the first 8 characters of `id` (the letter
/// is skipped, the 7 following digits are weighted 2,1,2,1,2,1,2).
///
/// Returns `None` if `id` is shorter than 8 bytes or if any of the 7 body
/// characters is not a digit.
pub fn compute_check_digit(id: &str) -> Option<char> {
    let bytes = id.as_bytes();
    if bytes.len() < SHORT_TAX_ID_LENGTH {
        return None;
    }

    let mut sum = 0;
    for (idx, c) in bytes[1..SHORT_TAX_ID_LENGTH].iter().enumerate() {
        if !c.is_ascii_digit() {
            return None;
        }
        let digit = u32::from(c - b'0');
        sum += sum_all_digits(digit * CHECK_DIGIT_WEIGHTS[idx]);
    }

    char::from_digit((10 - (sum % 10)) % 10, 10)
}

/// Verifies the 9th character of a 9 character tax id against the computed control digit.
pub fn validate_check_digit(id: &str) -> Result<(), TaxIdError> {
    let length = id.chars().count();
    if length != FULL_TAX_ID_LENGTH {
        return Err(TaxIdError::WrongLength(length));
    }

    let expected = compute_check_digit(id).ok_or(TaxIdError::NonDigitBody)?;
    // The length check guarantees the 9th character exists
    let actual = id.chars().nth(SHORT_TAX_ID_LENGTH).unwrap_or_default();

    if expected != actual {
        return Err(TaxIdError::CheckDigitMismatch { expected, actual });
    }
    Ok(())
}

/// Full validation of a raw candidate: cleaning, structure and (for 9 character
/// ids) control digit. The first failure is returned.
pub fn validate_full(raw: &str) -> Result<(), TaxIdError> {
    validate_and_normalize(raw).map(|_| ())
}

/// Same as [validate_full], but returns the cleaned id on success.
pub fn validate_and_normalize(raw: &str) -> Result<String, TaxIdError> {
    let normalized = normalize(raw).ok_or(TaxIdError::EmptyInput)?;
    check_normalized_structure(&normalized)?;

    if normalized.len() == FULL_TAX_ID_LENGTH {
        validate_check_digit(&normalized)?;
    }
    Ok(normalized)
}

/// Legal form encoded by the leading letter of the id
pub fn entity_type(id: &str) -> Option<EntityType> {
    let normalized = normalize(id)?;
    normalized.chars().next().and_then(EntityType::from_letter)
}

/// Appends the control digit to an 8 character id.
pub fn complete(id: &str) -> Option<String> {
    let mut normalized = normalize(id)?;
    if normalized.len() != SHORT_TAX_ID_LENGTH {
        return None;
    }

    let check_digit = compute_check_digit(&normalized)?;
    normalized.push(check_digit);
    Some(normalized)
}
