use crate::handlers::current_user_id;
use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered", body = ApiErrorResponse)
    )
)]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    match auth_service.signup(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            response,
            "User registered successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = ApiErrorResponse)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authorized", body = ApiErrorResponse)
    )
)]
pub async fn me(auth_service: web::Data<AuthService>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match auth_service.get_me(user_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
