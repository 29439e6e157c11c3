use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password with argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Minimal strength rule: at least 8 characters with a letter and a digit
pub fn validate_password_strength(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(anyhow::anyhow!(
            "Password must be at least 8 characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(anyhow::anyhow!("Password must contain a letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(anyhow::anyhow!("Password must contain a digit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("showroom42").unwrap();
        assert!(verify_password("showroom42", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("short1").is_err());
        assert!(validate_password_strength("onlyletters").is_err());
        assert!(validate_password_strength("12345678").is_err());
        assert!(validate_password_strength("showroom42").is_ok());
    }
}
