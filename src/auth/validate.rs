/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate a date field in "YYYY-MM-DD" format.
pub fn validate_date(value: &str, field_name: &str) -> Option<String> {
    if chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
        return Some(format!("{field_name} must be a date in YYYY-MM-DD format"));
    }
    None
}
