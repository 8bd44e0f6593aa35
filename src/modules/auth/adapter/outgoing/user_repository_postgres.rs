use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, UpdateMany,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_user(model: UserModel) -> User {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            reset_otp_hash: model.reset_otp_hash,
            reset_otp_expires_at: model.reset_otp_expires_at.map(|t| t.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }

    fn clear_reset_otp(update: UpdateMany<UserEntity>) -> UpdateMany<UserEntity> {
        update
            .col_expr(UserColumn::ResetOtpHash, Expr::value(Option::<String>::None))
            .col_expr(
                UserColumn::ResetOtpExpiresAt,
                Expr::value(Option::<DateTime<chrono::FixedOffset>>::None),
            )
            .col_expr(UserColumn::ResetOtpAttempts, Expr::value(0i16))
    }

    fn is_unique_violation(message: &str) -> bool {
        let lower = message.to_lowercase();
        lower.contains("23505")
            || lower.contains("duplicate key")
            || lower.contains("unique constraint")
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: User) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            reset_otp_hash: Set(None),
            reset_otp_expires_at: Set(None),
            reset_otp_attempts: Set(0),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            if Self::is_unique_violation(&e.to_string()) {
                return UserRepositoryError::UserAlreadyExists;
            }
            UserRepositoryError::DatabaseError(e.to_string())
        })?;

        Ok(Self::map_to_user(inserted))
    }

    async fn set_reset_otp(
        &self,
        user_id: Uuid,
        otp_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(UserColumn::ResetOtpHash, Expr::value(otp_hash))
            .col_expr(
                UserColumn::ResetOtpExpiresAt,
                Expr::value(expires_at.fixed_offset()),
            )
            .col_expr(UserColumn::ResetOtpAttempts, Expr::value(0i16))
            .col_expr(UserColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }

    async fn record_failed_otp_attempt(
        &self,
        user_id: Uuid,
        max_attempts: u16,
    ) -> Result<bool, UserRepositoryError> {
        let counted = UserEntity::update_many()
            .col_expr(
                UserColumn::ResetOtpAttempts,
                Expr::col(UserColumn::ResetOtpAttempts).add(1),
            )
            .filter(UserColumn::Id.eq(user_id))
            .filter(UserColumn::ResetOtpHash.is_not_null())
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        let Some(model) = counted.into_iter().next() else {
            return Ok(false);
        };
        if i32::from(model.reset_otp_attempts) < i32::from(max_attempts) {
            return Ok(false);
        }

        Self::clear_reset_otp(UserEntity::update_many())
            .col_expr(UserColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(true)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let result = Self::clear_reset_otp(UserEntity::update_many())
            .col_expr(UserColumn::PasswordHash, Expr::value(new_password_hash))
            .col_expr(UserColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }
}
