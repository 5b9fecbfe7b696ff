use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Invalid boolean value for {key}: '{value}'. Expected 'true' or 'false'.")]
    InvalidBool { key: String, value: String },
}

/// Splits a `KEY=VALUE` override at the first `=`.
pub fn parse_assignment(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignment(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(input.to_string()));
    }
    Ok((key, value.trim()))
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidBool {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Splits a comma-separated list of element symbols, dropping empty entries.
pub fn parse_element_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_at_first_equals_sign() {
        assert_eq!(
            parse_assignment("cell.output=POSCAR_{stem}"),
            Ok(("cell.output", "POSCAR_{stem}"))
        );
        assert_eq!(parse_assignment(" a = b=c "), Ok(("a", "b=c")));
    }

    #[test]
    fn assignment_requires_key_and_equals_sign() {
        assert_eq!(
            parse_assignment("cell.output"),
            Err(ParseError::InvalidAssignment("cell.output".to_string()))
        );
        assert_eq!(
            parse_assignment("=x"),
            Err(ParseError::EmptyKey("=x".to_string()))
        );
    }

    #[test]
    fn bool_values_are_strict() {
        assert_eq!(parse_bool("cell.enabled", "false"), Ok(false));
        assert!(parse_bool("cell.enabled", "no").is_err());
    }

    #[test]
    fn element_list_ignores_blanks() {
        assert_eq!(parse_element_list("H, Pd,,O "), vec!["H", "Pd", "O"]);
        assert!(parse_element_list("").is_empty());
    }
}
