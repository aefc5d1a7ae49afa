//! Authentication configuration.

/// Configuration for the authentication and provisioning services.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Optional pepper prepended to secrets before Argon2id hashing
    /// and verification. Applies to user passwords and project client
    /// secrets alike.
    pub pepper: Option<String>,
    /// Minimum password length for registration (default: 8).
    pub min_password_length: usize,
    /// Minimum project name length for provisioning (default: 3).
    pub min_project_name_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pepper: None,
            min_password_length: 8,
            min_project_name_length: 3,
        }
    }
}
