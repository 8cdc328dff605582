//! # Validation Utilities
//!
//! Form input checks run before a request is ever built.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((user, domain)) = email.split_once('@') else {
        return Err("Invalid email format".to_string());
    };
    if user.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a one-time verification code (exactly 6 digits).
pub fn validate_one_time_code(code: &str) -> Result<(), String> {
    let code = code.trim();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Please enter a valid OTP".to_string());
    }
    Ok(())
}

/// Validate that a numeric form field (price, page size) is strictly positive.
pub fn validate_positive(value: f64, field_name: &str) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be greater than 0", field_name))
    }
}
