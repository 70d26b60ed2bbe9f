use std::fmt;

// ─── Manual Entry Errors ─────────────────────────────────────────────────────
//
// Bad manual entry is the only error a user can trigger while editing. The
// editor reports it and discards the input; the convolution engine never
// sees malformed data.

#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Nothing but separators and whitespace was entered.
    Empty,
    /// A token could not be read as a finite number.
    InvalidNumber {
        /// 1-based position among the non-blank entries
        position: usize,
        token: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "No values entered."),
            InputError::InvalidNumber { position, token } => write!(
                f,
                "Invalid input '{}' at entry {}. Please enter comma-separated numbers.",
                token, position
            ),
        }
    }
}

impl std::error::Error for InputError {}

// ─── Signal Entry Parsing ────────────────────────────────────────────────────

/// Parse "1, 2.5, -3" into samples, padded with zeros or truncated to `len`.
/// Blank entries between commas are skipped.
pub fn parse_signal_input(text: &str, len: usize) -> Result<Vec<f64>, InputError> {
    let mut values = Vec::new();

    for (i, token) in text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .enumerate()
    {
        let value: f64 = token.parse().map_err(|_| InputError::InvalidNumber {
            position: i + 1,
            token: token.to_string(),
        })?;
        if !value.is_finite() {
            return Err(InputError::InvalidNumber {
                position: i + 1,
                token: token.to_string(),
            });
        }
        values.push(value);
    }

    if values.is_empty() {
        return Err(InputError::Empty);
    }

    values.resize(len, 0.0);
    Ok(values)
}

// ─── Float Input Validation ──────────────────────────────────────────────────
//
// Character-level check for a value field while it's being typed. Partial
// entries like "-" or "3." are valid because the user is still typing.

pub fn is_valid_float_input(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() { return true; }
    if digits.starts_with('.') { return false; }
    let parts: Vec<&str> = digits.split('.').collect();
    parts.len() <= 2 && parts.iter().all(|p| p.is_empty() || p.chars().all(|c| c.is_ascii_digit()))
}

pub fn is_valid_uint_input(text: &str) -> bool {
    text.is_empty() || text.chars().all(|c| c.is_ascii_digit())
}
