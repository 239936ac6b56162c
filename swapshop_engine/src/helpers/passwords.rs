//! Salted password hashing for user accounts.
//!
//! Stored credentials have the form `salt$digest`, where both halves are hex and the digest is SHA-256 over the
//! salt followed by the password bytes. Plaintext passwords are never stored or logged.
use rand::Rng;
use sha2::{Digest, Sha256};

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let salt = hex::encode(salt);
    let digest = salted_digest(&salt, password);
    format!("{salt}${digest}")
}

/// Checks a password against a stored `salt$digest` entry.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => salted_digest(salt, password) == digest,
        None => false,
    }
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
        assert!(!verify_password("hunter2", "garbage-without-separator"));
    }

    #[test]
    fn salts_are_unique() {
        let a = hash_password("hunter2");
        let b = hash_password("hunter2");
        assert_ne!(a, b);
    }
}
