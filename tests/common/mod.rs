#![allow(dead_code)]

use chrono::Utc;
use course_catalog_backend::config::{DatabaseConfig, PromoConfig};
use course_catalog_backend::database::{create_pool, run_migrations};
use course_catalog_backend::entities::user_entity as users;
use course_catalog_backend::models::{CourseResponse, CreateCourseRequest};
use course_catalog_backend::services::{
    AuthService, CourseService, PromoPricing, SubscriptionService,
};
use course_catalog_backend::utils::JwtService;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::str::FromStr;

pub const PROMO_CODE: &str = "LEARN50";
pub const JWT_SECRET: &str = "integration-test-secret";

/// 每个测试独立的内存 SQLite 数据库（单连接，保证共享同一个库）
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        seed_sample_data: false,
    };
    let pool = create_pool(&config).await.expect("connect sqlite");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

pub fn pricing() -> PromoPricing {
    PromoPricing::new(&PromoConfig {
        code: PROMO_CODE.to_string(),
        discount_percent: 50,
    })
}

pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// 直接写库创建用户，跳过 bcrypt
pub async fn create_user(pool: &DatabaseConnection, email: &str) -> i32 {
    let now = Utc::now();
    users::ActiveModel {
        name: Set(email.split('@').next().unwrap_or("user").to_string()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert user")
    .id
}

pub async fn create_course(
    courses: &CourseService,
    title: &str,
    course_price: &str,
) -> CourseResponse {
    courses
        .create_course(CreateCourseRequest {
            title: title.to_string(),
            description: format!("{title} description"),
            price: Some(price(course_price)),
            ..Default::default()
        })
        .await
        .expect("create course")
}

#[derive(Clone)]
pub struct TestState {
    pub pool: DatabaseConnection,
    pub jwt: JwtService,
    pub auth: AuthService,
    pub courses: CourseService,
    pub subscriptions: SubscriptionService,
}

impl TestState {
    pub async fn new() -> Self {
        let pool = setup_db().await;
        let jwt = JwtService::new(JWT_SECRET, 3600);
        Self {
            auth: AuthService::new(pool.clone(), jwt.clone()),
            courses: CourseService::new(pool.clone()),
            subscriptions: SubscriptionService::new(pool.clone(), pricing()),
            jwt,
            pool,
        }
    }

    /// 创建用户并签发访问令牌
    pub async fn user_with_token(&self, email: &str) -> (i32, String) {
        let id = create_user(&self.pool, email).await;
        let token = self.jwt.generate_access_token(id, email).unwrap();
        (id, token)
    }
}
