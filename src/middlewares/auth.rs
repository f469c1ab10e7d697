use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::body::EitherBody;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, ResponseError,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 认证后写入请求扩展的当前用户
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i32);

// 公开路径配置
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    // 仅 GET 公开的前缀（课程浏览）
    read_only_prefixes: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/swagger-ui",
                "/api-docs/openapi.json",
                "/api/health",
                "/api/auth/signup",
                "/api/auth/login",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
            read_only_prefixes: vec!["/api/courses"],
        }
    }

    fn is_public(&self, method: &Method, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        if self
            .prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
        {
            return true;
        }
        method == Method::GET
            && self
                .read_only_prefixes
                .iter()
                .any(|&prefix| path == prefix || path.starts_with(&format!("{prefix}/")))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S> AuthMiddlewareService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<CurrentUser, AppError> {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::AuthError("Not authorized, no token".to_string()))?;

        let claims = self
            .jwt_service
            .verify_access_token(token)
            .map_err(|_| AppError::AuthError("Not authorized, token failed".to_string()))?;

        Ok(CurrentUser(claims.user_id()?))
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求与公开路径；未注册的路由交给 default_service 返回 404
        if req.method() == Method::OPTIONS
            || self.public_paths.is_public(req.method(), req.path())
            || !req.resource_map().has_resource(req.path())
        {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        match self.authenticate(&req) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(error) => {
                let response = error.error_response().map_into_right_body();
                Box::pin(async move { Ok(req.into_response(response)) })
            }
        }
    }
}
