//! Shared trimmed-text validation used by the domain value objects.
//!
//! Both bounded contexts enforce the same rule shape on their text fields:
//! trim, reject blank input, and require a minimum number of characters.
//! The helper reports which rule failed so each domain can map the outcome
//! onto its own error taxonomy.

/// Way in which a text field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextViolation {
    /// The value is empty after trimming.
    Blank,
    /// The value is shorter than the required minimum after trimming.
    TooShort {
        /// Minimum number of characters required.
        minimum: usize,
    },
}

/// Trims the input and enforces a minimum character count.
///
/// Lengths are measured in characters, not bytes, so multi-byte input is
/// counted the way a user would count it.
pub(crate) fn validated_text(
    value: impl Into<String>,
    minimum: usize,
) -> Result<String, TextViolation> {
    let raw = value.into();
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(TextViolation::Blank);
    }

    if trimmed.chars().count() < minimum {
        return Err(TextViolation::TooShort { minimum });
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{TextViolation, validated_text};

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validated_text("  Launch Plan  ", 3), Ok("Launch Plan".to_owned()));
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(validated_text("   ", 3), Err(TextViolation::Blank));
    }

    #[test]
    fn rejects_input_below_the_minimum() {
        assert_eq!(
            validated_text("ab", 3),
            Err(TextViolation::TooShort { minimum: 3 })
        );
    }

    #[test]
    fn accepts_input_at_the_minimum() {
        assert_eq!(validated_text("abc", 3), Ok("abc".to_owned()));
    }

    #[test]
    fn counts_characters_rather_than_bytes() {
        assert_eq!(validated_text("éß漢", 3), Ok("éß漢".to_owned()));
    }

    #[test]
    fn whitespace_does_not_count_toward_the_minimum() {
        assert_eq!(
            validated_text(" ab ", 3),
            Err(TextViolation::TooShort { minimum: 3 })
        );
    }
}
