use validator::ValidationError;

/// Default number of posts per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound accepted for a configured page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Normalize a requested page size: missing means default, otherwise clamped to `1..=MAX_PAGE_SIZE`.
pub fn validate_page_size(page_size: Option<usize>) -> usize {
    page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Presence check for free-text fields.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_and_clamps() {
        assert_eq!(validate_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(validate_page_size(Some(0)), 1);
        assert_eq!(validate_page_size(Some(5)), 5);
        assert_eq!(validate_page_size(Some(1000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \n\t").is_err());
    }
}
