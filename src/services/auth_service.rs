use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// 用户注册
    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Please provide your name".to_string()));
        }
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_password(&request.password)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "User already exists with this email".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();
        let user = users::ActiveModel {
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("User already exists with this email".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        log::info!("User {} signed up", user.id);
        self.issue(user)
    }

    /// 用户登录
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Please provide email and password".to_string(),
            ));
        }

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        self.issue(user)
    }

    pub async fn get_me(&self, user_id: i32) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    fn issue(&self, user: users::Model) -> AppResult<AuthResponse> {
        let token = self.jwt_service.generate_access_token(user.id, &user.email)?;
        Ok(AuthResponse {
            user: user.into(),
            token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
