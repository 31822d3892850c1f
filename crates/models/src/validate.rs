//! Field-level checks shared by the entity modules.

use crate::errors::ModelError;

pub fn required(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn optional(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(ModelError::Validation(format!("{field} must be at most {max} characters")))
        }
        _ => Ok(()),
    }
}

pub fn email(field: &str, value: &str) -> Result<(), ModelError> {
    required(field, value, 254)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ModelError::Validation(format!("invalid {field}")));
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ModelError::Validation(format!("invalid {field}")));
    }
    Ok(())
}

pub fn url(field: &str, value: &str) -> Result<(), ModelError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ModelError::Validation(format!("{field} must start with http(s)")));
    }
    Ok(())
}

pub fn optional_url(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() => url(field, v),
        _ => Ok(()),
    }
}

/// Empty strings coming from forms are stored as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| if v.trim().is_empty() { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_and_long() {
        assert!(required("name", "  ", 10).is_err());
        assert!(required("name", "abcdefghijk", 10).is_err());
        assert!(required("name", "Acme", 10).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(email("email", "ana@example.com").is_ok());
        assert!(email("email", "ana.example.com").is_err());
        assert!(email("email", "@example.com").is_err());
        assert!(email("email", "ana@localhost").is_err());
    }

    #[test]
    fn urls_need_scheme() {
        assert!(url("website", "https://acme.ec").is_ok());
        assert!(url("website", "acme.ec").is_err());
        assert!(optional_url("website", None).is_ok());
        assert!(optional_url("website", Some("")).is_ok());
    }

    #[test]
    fn blank_strings_become_null() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some("x".into())), Some("x".into()));
    }
}
