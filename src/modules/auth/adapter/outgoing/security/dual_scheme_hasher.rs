use async_trait::async_trait;

use super::{Argon2Hasher, BcryptHasher};
use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};

/// Hashes with Argon2id; verifies legacy bcrypt hashes by their `$2` prefix.
#[derive(Clone, Default)]
pub struct DualSchemeHasher {
    argon2: Argon2Hasher,
    bcrypt: BcryptHasher,
}

impl DualSchemeHasher {
    pub fn new(argon2: Argon2Hasher) -> Self {
        Self {
            argon2,
            bcrypt: BcryptHasher::default(),
        }
    }

    fn is_bcrypt(hash: &str) -> bool {
        hash.starts_with("$2")
    }
}

#[async_trait]
impl PasswordHasher for DualSchemeHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        self.argon2.hash_password(password).await
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        if Self::is_bcrypt(hash) {
            self.bcrypt.verify_password(password, hash).await
        } else {
            self.argon2.verify_password(password, hash).await
        }
    }
}
