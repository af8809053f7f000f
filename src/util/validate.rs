//! Pre-flight form validation. These run before any backend call; a
//! failure is reported inline on the form and the operation never leaves
//! the client.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::backend::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimal well-formedness check: one `@` with something on both sides.
/// Real verification is the recovery mail's job.
pub fn email(value: &str) -> Result<(), AuthError> {
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if valid {
        Ok(())
    } else {
        Err(AuthError::Validation(
            "Por favor, ingresa un correo válido.".to_owned(),
        ))
    }
}

pub fn password(value: &str) -> Result<(), AuthError> {
    if value.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(AuthError::Validation(
            "La contraseña debe tener al menos 6 caracteres.".to_owned(),
        ))
    }
}

/// Confirmation check first, then strength; mismatch is the more useful
/// message when both fail.
pub fn password_pair(value: &str, confirmation: &str) -> Result<(), AuthError> {
    if value != confirmation {
        return Err(AuthError::Validation(
            "Las contraseñas no coinciden.".to_owned(),
        ));
    }
    password(value)
}

pub fn username(value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::Validation(
            "El nombre de usuario es obligatorio.".to_owned(),
        ))
    } else {
        Ok(())
    }
}
