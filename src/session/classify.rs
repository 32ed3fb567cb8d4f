//! Classification of raw engine responses.
//!
//! The engine flags failures by prefixing its reply with a sentinel glyph.
//! Replies are turned into an [`Outcome`] right where they enter the
//! console, so nothing downstream looks at the raw prefix again.

/// Leading marker of an engine-reported error.
pub const ERROR_SENTINEL: char = '❌';

/// A classified engine response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Error(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Success(text) | Outcome::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

/// Classify an engine response by its sentinel prefix.
pub fn classify(response: impl Into<String>) -> Outcome {
    let response = response.into();
    if response.starts_with(ERROR_SENTINEL) {
        Outcome::Error(response)
    } else {
        Outcome::Success(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_prefix_is_error() {
        assert_eq!(classify("❌ bad"), Outcome::Error("❌ bad".to_string()));
        assert!(classify("❌").is_error());
    }

    #[test]
    fn test_plain_text_is_success() {
        assert_eq!(classify("ok"), Outcome::Success("ok".to_string()));
        assert_eq!(classify("✅ loaded"), Outcome::Success("✅ loaded".to_string()));
    }

    #[test]
    fn test_empty_is_success() {
        assert_eq!(classify(""), Outcome::Success(String::new()));
    }

    #[test]
    fn test_sentinel_must_lead() {
        // Leading whitespace or an embedded glyph does not count
        assert!(!classify(" ❌ bad").is_error());
        assert!(!classify("result: ❌").is_error());
    }

    #[test]
    fn test_text_is_preserved() {
        let outcome = classify("❌ parse error at line 3");
        assert_eq!(outcome.text(), "❌ parse error at line 3");
        assert!(outcome.is_error());
    }
}
