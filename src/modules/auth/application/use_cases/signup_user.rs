use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use email_address::EmailAddress;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("valid username regex"));

// ========================= Signup Request =========================
/// Validated signup request - can be deserialized directly from JSON
#[derive(Debug, Clone)]
pub struct SignupRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupRequestError {
    InvalidUsername,
    EmptyEmail,
    InvalidEmailFormat,
    PasswordTooShort,
}

impl std::fmt::Display for SignupRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignupRequestError::InvalidUsername => write!(
                f,
                "Username must be 3-32 characters of letters, digits, '_', '.' or '-'"
            ),
            SignupRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            SignupRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            SignupRequestError::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        }
    }
}

impl std::error::Error for SignupRequestError {}

impl SignupRequest {
    pub fn new(
        username: String,
        email: String,
        password: String,
    ) -> Result<Self, SignupRequestError> {
        let username = username.trim().to_string();
        if !USERNAME_PATTERN.is_match(&username) {
            return Err(SignupRequestError::InvalidUsername);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(SignupRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(SignupRequestError::InvalidEmailFormat);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SignupRequestError::PasswordTooShort);
        }

        Ok(Self {
            username,
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for SignupRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SignupRequestHelper {
            username: String,
            email: String,
            password: String,
        }

        let helper = SignupRequestHelper::deserialize(deserializer)?;
        SignupRequest::new(helper.username, helper.email, helper.password)
            .map_err(serde::de::Error::custom)
    }
}

// ====================== Signup Error / Response =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignupError {
    #[error("Username or email already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

// ============================ Signup Use Case =============================
#[async_trait]
pub trait ISignupUserUseCase: Send + Sync {
    async fn execute(&self, request: SignupRequest) -> Result<SignupResponse, SignupError>;
}

#[derive(Clone)]
pub struct SignupUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<Q, R> SignupUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<Q, R> ISignupUserUseCase for SignupUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, request: SignupRequest) -> Result<SignupResponse, SignupError> {
        // 1️⃣ Reject duplicates up front; the unique indexes catch races below.
        let by_username = self
            .query
            .find_by_username(request.username())
            .await
            .map_err(|e| SignupError::RepositoryError(e.to_string()))?;
        let by_email = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| SignupError::RepositoryError(e.to_string()))?;

        if by_username.is_some() || by_email.is_some() {
            return Err(SignupError::UserAlreadyExists);
        }

        // 2️⃣ Hash password
        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| SignupError::HashingFailed(e.to_string()))?;

        // 3️⃣ Persist
        let user = User::new(
            request.username().to_string(),
            request.email().to_string(),
            password_hash,
        );

        let created = self
            .repository
            .create_user(user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => SignupError::UserAlreadyExists,
                other => SignupError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %created.id, username = %created.username, "User signed up");

        Ok(SignupResponse {
            id: created.id,
            username: created.username,
            email: created.email,
        })
    }
}
