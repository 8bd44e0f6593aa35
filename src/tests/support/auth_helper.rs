use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::{TokenProvider, TokenSubject};

pub const TEST_ADMIN_USERNAME: &str = "studio_owner";

pub fn jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: "test_secret_key_min_32_characters_long".to_string(),
        issuer: "studio-portal-test".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    })
}

/// Token provider in the shape the extractors look up.
pub fn jwt_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    web::Data::new(Arc::new(jwt_service()) as Arc<dyn TokenProvider + Send + Sync>)
}

pub fn token_for(user_id: Uuid, username: &str, role: Role) -> String {
    jwt_service()
        .generate_access_token(&TokenSubject {
            user_id,
            username: username.to_string(),
            role,
        })
        .expect("token generation")
}

pub fn client_token(username: &str) -> String {
    token_for(Uuid::new_v4(), username, Role::Client)
}

pub fn admin_token() -> String {
    token_for(Uuid::new_v4(), TEST_ADMIN_USERNAME, Role::Admin)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
