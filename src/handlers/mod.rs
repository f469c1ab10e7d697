pub mod auth;
pub mod course;
pub mod health;
pub mod subscription;

pub use auth::auth_config;
pub use course::course_config;
pub use health::health_config;
pub use subscription::subscription_config;

use crate::error::{AppError, AppResult};
use crate::middlewares::CurrentUser;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, web};

/// 由认证中间件写入的当前用户ID
pub(crate) fn current_user_id(req: &HttpRequest) -> AppResult<i32> {
    req.extensions()
        .get::<CurrentUser>()
        .map(|user| user.0)
        .ok_or_else(|| AppError::AuthError("Not authorized, no token".to_string()))
}

/// 请求体 / 路径 / 查询参数解析失败时返回统一的错误格式
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::NotFound("Resource not found".to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health_config)
            .configure(auth_config)
            .configure(course_config)
            .configure(subscription_config),
    );
}

pub async fn not_found() -> HttpResponse {
    AppError::NotFound("Route not found".to_string()).error_response()
}
