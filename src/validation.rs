// validation.rs
//
// Input rules shared by poll creation and wholesale update. Fail fast:
// the first violated rule is returned.

use crate::error::AppError;

pub const QUESTION_MAX_CHARS: usize = 500;
pub const OPTION_MAX_CHARS: usize = 200;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;

/// Validates and trims a question plus option list, preserving option
/// order. Returns the trimmed values that should be persisted.
pub fn validate_poll_input(
    question: &str,
    options: &[String],
) -> Result<(String, Vec<String>), AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::InvalidInput("question required".into()));
    }
    if question.chars().count() > QUESTION_MAX_CHARS {
        return Err(AppError::InvalidInput("question too long".into()));
    }

    if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
        return Err(AppError::InvalidInput("option count out of range".into()));
    }

    let mut trimmed = Vec::with_capacity(options.len());
    for (i, option) in options.iter().enumerate() {
        let option = option.trim();
        if option.is_empty() {
            return Err(AppError::InvalidInput(format!("option {i} required")));
        }
        if option.chars().count() > OPTION_MAX_CHARS {
            return Err(AppError::InvalidInput(format!("option {i} too long")));
        }
        trimmed.push(option.to_string());
    }

    Ok((question.to_string(), trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_and_trims_valid_input() {
        let (q, o) =
            validate_poll_input("  Favorite color?  ", &opts(&[" Red ", "Blue"])).unwrap();
        assert_eq!(q, "Favorite color?");
        assert_eq!(o, vec!["Red", "Blue"]);
    }

    #[test]
    fn preserves_option_order() {
        let (_, o) = validate_poll_input("Q?", &opts(&["c", "a", "b"])).unwrap();
        assert_eq!(o, vec!["c", "a", "b"]);
    }

    #[test]
    fn rejects_blank_question() {
        let err = validate_poll_input("   ", &opts(&["a", "b"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(m) if m == "question required"));
    }

    #[test]
    fn rejects_question_over_limit() {
        let long = "q".repeat(QUESTION_MAX_CHARS + 1);
        let err = validate_poll_input(&long, &opts(&["a", "b"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(m) if m == "question too long"));
    }

    #[test]
    fn question_at_limit_is_accepted() {
        let exact = "q".repeat(QUESTION_MAX_CHARS);
        assert!(validate_poll_input(&exact, &opts(&["a", "b"])).is_ok());
    }

    #[test]
    fn rejects_too_few_or_too_many_options() {
        let err = validate_poll_input("Q?", &opts(&["only"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(m) if m == "option count out of range"));

        let eleven = vec!["x".to_string(); MAX_OPTIONS + 1];
        let err = validate_poll_input("Q?", &eleven).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(m) if m == "option count out of range"));
    }

    #[test]
    fn rejects_blank_or_oversized_option() {
        let err = validate_poll_input("Q?", &opts(&["a", "  "])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(m) if m.contains("option 1")));

        let long = "x".repeat(OPTION_MAX_CHARS + 1);
        let err = validate_poll_input("Q?", &opts(&["a", long.as_str()])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(m) if m.contains("too long")));
    }
}
