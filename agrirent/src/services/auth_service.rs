// agrirent/src/services/auth_service.rs

//! Argon2 password hashing for the identity service.

use crate::errors::AppError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use tracing::{debug, error, instrument};

#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::invalid_field("password", "Password is required."));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing failed: {}", argon_err))
    })
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash is unusable.
#[instrument(
    name = "auth_service::verify_password",
    skip(stored_hash, provided_password),
    err(Display),
    fields(hash_len = stored_hash.len())
)]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Stored password hash could not be parsed.");
    AppError::Internal(format!("Invalid stored password hash: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password did not match.");
      Ok(false)
    }
    Err(other) => {
      error!(error = %other, "Argon2 verification failed.");
      Err(AppError::Internal(format!("Password verification failed: {}", other)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_round_trip_accepts_only_the_original() {
    let hash = hash_password("tractor42").unwrap();
    assert_ne!(hash, "tractor42");
    assert!(verify_password(&hash, "tractor42").unwrap());
    assert!(!verify_password(&hash, "tractor43").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn corrupt_hash_is_an_internal_error() {
    assert!(matches!(verify_password("not-a-hash", "x"), Err(AppError::Internal(_))));
  }

  #[test]
  fn empty_password_is_not_hashed() {
    assert!(matches!(hash_password(""), Err(AppError::Validation { .. })));
  }
}
