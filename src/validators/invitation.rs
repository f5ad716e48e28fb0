use std::collections::HashSet;

use super::ValidationError;

pub fn validate_expiry_days(days: u32, max_days: u32) -> Result<(), ValidationError> {
    if days == 0 || days > max_days {
        return Err(ValidationError::ExpiryOutOfRange { max_days });
    }

    Ok(())
}

/// Rejects blank or repeated team ids.
pub fn validate_team_ids(team_ids: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(team_ids.len());

    for id in team_ids {
        if id.trim().is_empty() {
            return Err(ValidationError::TeamIdEmpty);
        }
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::TeamIdDuplicate(id.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_bounds() {
        assert!(validate_expiry_days(1, 365).is_ok());
        assert!(validate_expiry_days(365, 365).is_ok());
        assert_eq!(
            validate_expiry_days(0, 365).unwrap_err(),
            ValidationError::ExpiryOutOfRange { max_days: 365 }
        );
        assert!(validate_expiry_days(366, 365).is_err());
    }

    #[test]
    fn test_team_ids() {
        assert!(validate_team_ids(&[]).is_ok());
        assert!(validate_team_ids(&["a".to_owned(), "b".to_owned()]).is_ok());
        assert_eq!(
            validate_team_ids(&[" ".to_owned()]).unwrap_err(),
            ValidationError::TeamIdEmpty
        );
        assert_eq!(
            validate_team_ids(&["a".to_owned(), "a".to_owned()]).unwrap_err(),
            ValidationError::TeamIdDuplicate("a".to_owned())
        );
    }
}
