use rand::Rng;
use sha2::{Digest, Sha256};

/// Returns `(salt, hash)`, both hex-encoded. The digest runs over salt then
/// password.
pub(crate) fn hash(password: &str) -> (String, String) {
    let salt: [u8; 16] = rand::rng().random();
    let salt = hex::encode(salt);
    let hash = digest(&salt, password);
    (salt, hash)
}

pub(crate) fn verify(password: &str, salt: &str, hash: &str) -> bool {
    digest(salt, password) == hash
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let (salt, stored) = hash("hunter42");
        assert!(verify("hunter42", &salt, &stored));
    }

    #[test]
    fn wrong_password_does_not() {
        let (salt, stored) = hash("hunter42");
        assert!(!verify("hunter43", &salt, &stored));
        assert!(!verify("", &salt, &stored));
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let (salt_a, hash_a) = hash("same password");
        let (salt_b, hash_b) = hash("same password");
        assert_ne!(salt_a, salt_b);
        assert_ne!(hash_a, hash_b);
    }
}
