use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// the input contains a character that is neither a digit, nor a separator
    #[error("invalid character '{0}' in phone number")]
    InvalidCharacter(char),

    /// the input has the wrong amount of digits
    #[error("invalid phone number length: {0} digits")]
    InvalidLength(usize),
}

/// Normalizes a raw phone number into its canonical form `+<11 digits>`,
/// which is the form records are stored and looked up with.
///
/// Separators (spaces, parentheses, dashes, dots) and one leading `+` are
/// stripped. The remaining digits must be a full 11-digit number, or a
/// 10-digit number without country code, which gets the default country
/// code `7` prepended. An 11-digit number in domestic form (leading `8`)
/// is converted to its country code form (leading `7`).
///
/// The result of a successful normalization normalizes to itself.
pub fn normalize(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let unprefixed = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = String::with_capacity(unprefixed.len());
    for c in unprefixed.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '(' | ')' | '-' | '.' => {}
            other => return Err(Error::InvalidCharacter(other)),
        }
    }

    match digits.len() {
        10 => Ok(format!("+7{digits}")),
        11 => {
            if digits.starts_with('8') {
                digits.replace_range(0..1, "7");
            }
            Ok(format!("+{digits}"))
        }
        len => Err(Error::InvalidLength(len)),
    }
}
