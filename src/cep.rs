use std::fmt;

/// A CEP reduced to exactly 8 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CepKey(String);

impl CepKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip every non-digit character (`.`/`-` separators, whitespace) and
/// accept the remainder only if exactly 8 digits survive.
pub fn normalize(raw: &str) -> Option<CepKey> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 8 {
        Some(CepKey(digits))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize("01001-000").unwrap().as_str(), "01001000");
        assert_eq!(normalize("01.001-000").unwrap().as_str(), "01001000");
        assert_eq!(normalize(" 01001000 ").unwrap().as_str(), "01001000");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("99999-999").unwrap();
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_rejects_wrong_length() {
        assert!(normalize("123").is_none());
        assert!(normalize("").is_none());
        assert!(normalize("123456789").is_none());
        assert!(normalize("abc").is_none());
    }

    #[test]
    fn test_normalize_keeps_digits_from_mixed_input() {
        assert_eq!(normalize("CEP: 01001000").unwrap().as_str(), "01001000");
    }
}
