use strum::IntoStaticStr;
use thiserror::Error;

/// Reason a tax id candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TaxIdError {
    #[error("The tax id is empty once cleaned")]
    EmptyInput,

    #[error("Invalid length: {0} characters (expected 8 or 9)")]
    InvalidLength(usize),

    #[error("Invalid leading letter: {0}")]
    InvalidLeadingLetter(char),

    #[error("Characters 2 to 8 must be digits")]
    NonDigitBody,

    #[error("The tax id must have 9 characters to check its control digit, got {0}")]
    WrongLength(usize),

    #[error("Wrong control digit: expected {expected}, found {actual}")]
    CheckDigitMismatch { expected: char, actual: char },
}

impl TaxIdError {
    /// Stable identifier of the failure, used as a metric label.
    pub fn reason(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod test {
    use super::TaxIdError;

    #[test]
    fn reason_is_snake_case_variant_name() {
        assert_eq!(TaxIdError::EmptyInput.reason(), "empty_input");
        assert_eq!(TaxIdError::InvalidLength(3).reason(), "invalid_length");
        assert_eq!(
            TaxIdError::CheckDigitMismatch {
                expected: '4',
                actual: '8'
            }
            .reason(),
            "check_digit_mismatch"
        );
    }

    #[test]
    fn error_message_mentions_digits() {
        let err = TaxIdError::CheckDigitMismatch {
            expected: '4',
            actual: '8',
        };
        assert_eq!(
            err.to_string(),
            "Wrong control digit: expected 4, found 8"
        );
    }
}
