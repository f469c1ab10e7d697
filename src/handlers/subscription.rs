use crate::handlers::current_user_id;
use crate::models::*;
use crate::services::SubscriptionService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

macro_rules! require_user {
    ($req:expr) => {
        match current_user_id(&$req) {
            Ok(id) => id,
            Err(e) => return Ok(e.error_response()),
        }
    };
}

#[utoipa::path(
    post,
    path = "/subscribe",
    tag = "subscription",
    request_body = SubscribeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Missing/invalid promo code or already subscribed", body = ApiErrorResponse),
        (status = 404, description = "Course not found", body = ApiErrorResponse)
    )
)]
pub async fn subscribe(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    request: web::Json<SubscribeRequest>,
) -> Result<HttpResponse> {
    let user_id = require_user!(req);

    match subscription_service
        .subscribe(user_id, request.into_inner())
        .await
    {
        Ok(subscription) => Ok(HttpResponse::Created().json(
            ApiResponse::success_with_message(subscription, "Successfully subscribed to course"),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/my-courses",
    tag = "subscription",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's subscriptions, newest first", body = MyCoursesResponse)
    )
)]
pub async fn my_courses(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = require_user!(req);

    match subscription_service.list_for_user(user_id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(MyCoursesResponse {
            count: courses.len(),
            courses,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/stats",
    tag = "subscription",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Subscription statistics", body = SubscriptionStatsResponse)
    )
)]
pub async fn get_stats(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = require_user!(req);

    match subscription_service.get_stats(user_id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/check/{course_id}",
    tag = "subscription",
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Subscription status", body = CheckSubscriptionResponse)
    )
)]
pub async fn check_subscription(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = require_user!(req);

    match subscription_service
        .check_subscription(user_id, path.into_inner())
        .await
    {
        Ok(status) => Ok(HttpResponse::Ok().json(ApiResponse::success(status))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscriptions/validate-promo",
    tag = "subscription",
    request_body = ValidatePromoRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Promo code is valid", body = PromoValidationResponse),
        (status = 400, description = "Missing fields or invalid promo code", body = ApiErrorResponse),
        (status = 404, description = "Course not found", body = ApiErrorResponse)
    )
)]
pub async fn validate_promo(
    subscription_service: web::Data<SubscriptionService>,
    request: web::Json<ValidatePromoRequest>,
) -> Result<HttpResponse> {
    match subscription_service
        .validate_promo(request.into_inner())
        .await
    {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            result,
            "Promo code is valid",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/{id}",
    tag = "subscription",
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Subscription", body = SubscriptionResponse),
        (status = 403, description = "Not the owner", body = ApiErrorResponse),
        (status = 404, description = "Subscription not found", body = ApiErrorResponse)
    )
)]
pub async fn get_subscription(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = require_user!(req);

    match subscription_service
        .get_subscription(path.into_inner(), user_id)
        .await
    {
        Ok(subscription) => Ok(HttpResponse::Ok().json(ApiResponse::success(subscription))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/subscriptions/{id}",
    tag = "subscription",
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Unsubscribed"),
        (status = 403, description = "Not the owner", body = ApiErrorResponse),
        (status = 404, description = "Subscription not found", body = ApiErrorResponse)
    )
)]
pub async fn unsubscribe(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = require_user!(req);

    match subscription_service
        .unsubscribe(path.into_inner(), user_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message(
            "Successfully unsubscribed from course",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/subscribe", web::post().to(subscribe))
        .route("/my-courses", web::get().to(my_courses))
        .service(
            web::scope("/subscriptions")
                .route("/stats", web::get().to(get_stats))
                .route("/check/{course_id}", web::get().to(check_subscription))
                .route("/validate-promo", web::post().to(validate_promo))
                .route("/{id}", web::get().to(get_subscription))
                .route("/{id}", web::delete().to(unsubscribe)),
        );
}
