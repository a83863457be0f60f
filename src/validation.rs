use crate::error::{ReportError, ReportResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ReportResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ReportError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that an integer is positive (> 0).
pub fn positive(value: i64, field: &str) -> ReportResult<i64> {
    if value <= 0 {
        Err(ReportError::NonPositive {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Validates a label filter: every entry must be non-blank after trimming.
/// Returns the trimmed entries. An empty filter is valid and means "no filtering".
pub fn label_filter(filter: &[String]) -> ReportResult<Vec<String>> {
    filter
        .iter()
        .map(|label| non_blank(label, "label filter entry"))
        .collect()
}
