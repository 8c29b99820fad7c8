// storefront_app/src/services/auth_service.rs

//! Password hashing for user accounts.

use crate::errors::AppError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
  Argon2,
};
use tracing::{debug, error, instrument};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hashes a plain-text password with Argon2 (default parameters, random salt).
///
/// Returns the PHC string stored in `users.password_hash`, or
/// `AppError::Validation` for a password shorter than
/// [`MIN_PASSWORD_LEN`] characters.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("password: Password cannot be empty.".to_string()));
  }
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(AppError::Validation(format!(
      "password: Password must be at least {} characters long.",
      MIN_PASSWORD_LEN
    )));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(hash) => {
      debug!("Password hashed successfully.");
      Ok(hash.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use argon2::{PasswordHash, PasswordVerifier};

  #[test]
  fn hash_verifies_and_is_salted() {
    let first = hash_password("correct horse battery staple").unwrap();
    let second = hash_password("correct horse battery staple").unwrap();
    assert_ne!(first, second);
    assert!(first.starts_with("$argon2"));

    let parsed = PasswordHash::new(&first).unwrap();
    assert!(Argon2::default()
      .verify_password(b"correct horse battery staple", &parsed)
      .is_ok());
    assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
  }

  #[test]
  fn empty_password_is_rejected() {
    assert!(matches!(hash_password(""), Err(AppError::Validation(_))));
  }

  #[test]
  fn short_password_is_rejected() {
    match hash_password("abc") {
      Err(AppError::Validation(msg)) => assert!(msg.contains("at least 8 characters")),
      other => panic!("Expected a validation error, got {:?}", other),
    }
    assert!(hash_password("12345678").is_ok());
  }
}
