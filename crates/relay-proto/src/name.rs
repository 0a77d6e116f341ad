//! Display name validation.
//!
//! A name is one or more characters drawn from ASCII letters, ASCII digits,
//! and the accented Latin letters `áéíóúÁÉÍÓÚüÜñÑ`. Whitespace and
//! punctuation are never allowed, so a name is always a single wire field.

/// Accented letters accepted in addition to `[A-Za-z0-9]`.
const EXTRA_LETTERS: &[char] = &[
    'á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú', 'ü', 'Ü', 'ñ', 'Ñ',
];

/// Check whether a single character may appear in a display name.
#[inline]
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || EXTRA_LETTERS.contains(&c)
}

/// Check whether `s` is an acceptable display name.
///
/// ```
/// use relay_proto::is_valid_name;
///
/// assert!(is_valid_name("Ana"));
/// assert!(is_valid_name("Iñaki"));
/// assert!(!is_valid_name("An a"));
/// assert!(!is_valid_name(""));
/// ```
pub fn is_valid_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_name_char)
}

/// Extension trait for checking if a string is a valid display name.
pub trait NameExt {
    /// See [`is_valid_name`].
    fn is_valid_name(&self) -> bool;
}

impl NameExt for str {
    fn is_valid_name(&self) -> bool {
        is_valid_name(self)
    }
}

impl NameExt for String {
    fn is_valid_name(&self) -> bool {
        is_valid_name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!("Ana".is_valid_name());
        assert!("ana123".is_valid_name());
        assert!("42".is_valid_name());
        assert!("Begoña".is_valid_name());
        assert!("ÍÑIGO".is_valid_name());
        assert!("Müller".is_valid_name());
    }

    #[test]
    fn test_invalid_names() {
        assert!(!"".is_valid_name());
        assert!(!"Ana!".is_valid_name());
        assert!(!"An a".is_valid_name());
        assert!(!"Ana\t".is_valid_name());
        assert!(!"ana_b".is_valid_name());
        assert!(!"ana-b".is_valid_name());
        assert!(!"Zoë".is_valid_name()); // ë is outside the accepted set
        assert!(!"名前".is_valid_name());
    }

    #[test]
    fn test_name_char() {
        assert!(is_name_char('ñ'));
        assert!(is_name_char('Z'));
        assert!(!is_name_char(','));
        assert!(!is_name_char(' '));
    }
}
