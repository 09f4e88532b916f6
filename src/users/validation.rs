use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{LoginRequest, RegisterRequest};
use crate::error::{ApiError, FieldErrors};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "Email field is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Email is invalid");
    }
}

/// Shape checks for the registration body. All failing fields are reported
/// together so the client can surface every message at once.
pub fn validate_register(req: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();

    let name_len = req.name.trim().chars().count();
    if name_len == 0 {
        errors.push("name", "Name field is required");
    } else if !(2..=30).contains(&name_len) {
        errors.push("name", "Name must be between 2 and 30 characters");
    }

    check_email(&req.email, &mut errors);

    let password_len = req.password.chars().count();
    if password_len == 0 {
        errors.push("password", "Password field is required");
    } else if !(6..=30).contains(&password_len) {
        errors.push("password", "Password must be at least 6 characters");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Shape checks for the login body.
pub fn validate_login(req: &LoginRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();

    check_email(&req.email, &mut errors);

    if req.password.is_empty() {
        errors.push("password", "Password field is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn field_message(err: ApiError, field: &str) -> Option<String> {
        match err {
            ApiError::Validation(errors) => {
                let json = serde_json::to_value(&errors).unwrap();
                json.get(field).and_then(|v| v.as_str()).map(String::from)
            }
            _ => None,
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(validate_register(&register("Ada", "ada@example.com", "hunter2x")).is_ok());
    }

    #[test]
    fn short_name_reports_range_message() {
        let err = validate_register(&register("A", "ada@example.com", "hunter2x")).unwrap_err();
        assert_eq!(
            field_message(err, "name").as_deref(),
            Some("Name must be between 2 and 30 characters")
        );
    }

    #[test]
    fn empty_name_reports_required() {
        let err = validate_register(&register("  ", "ada@example.com", "hunter2x")).unwrap_err();
        assert_eq!(field_message(err, "name").as_deref(), Some("Name field is required"));
    }

    #[test]
    fn malformed_email_reports_invalid() {
        let err = validate_register(&register("Ada", "not-an-email", "hunter2x")).unwrap_err();
        assert_eq!(field_message(err, "email").as_deref(), Some("Email is invalid"));
    }

    #[test]
    fn short_password_reports_length_message() {
        let err = validate_register(&register("Ada", "ada@example.com", "abc")).unwrap_err();
        assert_eq!(
            field_message(err, "password").as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn all_failing_fields_are_reported_together() {
        let err = validate_register(&register("", "", "")).unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.get("name").is_some());
        assert!(json.get("email").is_some());
        assert!(json.get("password").is_some());
    }

    #[test]
    fn login_requires_email_and_password() {
        let err = validate_login(&LoginRequest {
            email: "".into(),
            password: "".into(),
        })
        .unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json.get("email").and_then(|v| v.as_str()),
            Some("Email field is required")
        );
        assert_eq!(
            json.get("password").and_then(|v| v.as_str()),
            Some("Password field is required")
        );
    }

    #[test]
    fn login_accepts_valid_credentials_shape() {
        assert!(validate_login(&LoginRequest {
            email: "ada@example.com".into(),
            password: "hunter2x".into(),
        })
        .is_ok());
    }
}
