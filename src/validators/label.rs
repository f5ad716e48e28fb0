use super::ValidationError;

/// Normalizes an optional invitation label.
///
/// Blank labels become `None`.
pub fn validate_label(label: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > 100 {
        return Err(ValidationError::LabelTooLong);
    }

    Ok(Some(trimmed.to_owned()))
}
