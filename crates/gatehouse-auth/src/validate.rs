//! Input validation and email normalization.
//!
//! Validation runs before any store access. Email normalization is
//! the single place that defines the identity key — every lookup and
//! every stored email goes through [`normalize_email`], otherwise
//! duplicate accounts could be created for case or whitespace
//! variants of the same address.

use gatehouse_core::error::{GatehouseError, GatehouseResult};

/// Normalize an email for use as the global identity key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: one `@` with a non-empty local part, a
/// domain containing a dot with non-empty labels around it, and no
/// whitespace anywhere. Deliverability is not our problem.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validate registration input shape.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    min_password_length: usize,
) -> GatehouseResult<()> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(GatehouseError::validation("All fields are required"));
    }
    if !is_email_shaped(email.trim()) {
        return Err(GatehouseError::validation("Invalid email format"));
    }
    if password.chars().count() < min_password_length {
        return Err(GatehouseError::validation(format!(
            "Password must be at least {min_password_length} characters long"
        )));
    }
    Ok(())
}

/// Validate login input shape.
pub fn validate_login(email: &str, password: &str) -> GatehouseResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(GatehouseError::validation("All fields are required"));
    }
    if !is_email_shaped(email.trim()) {
        return Err(GatehouseError::validation("Invalid email format"));
    }
    Ok(())
}
