use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::CourseLevel;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::me,
        handlers::course::list_courses,
        handlers::course::get_course,
        handlers::course::create_course,
        handlers::course::update_course,
        handlers::course::delete_course,
        handlers::course::get_categories,
        handlers::course::get_course_stats,
        handlers::subscription::subscribe,
        handlers::subscription::my_courses,
        handlers::subscription::get_stats,
        handlers::subscription::check_subscription,
        handlers::subscription::validate_promo,
        handlers::subscription::get_subscription,
        handlers::subscription::unsubscribe,
    ),
    components(
        schemas(
            ApiError,
            ApiErrorResponse,
            SignupRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            CourseLevel,
            CourseResponse,
            CourseQuery,
            CreateCourseRequest,
            UpdateCourseRequest,
            CourseListResponse,
            CategoryListResponse,
            CategoryCount,
            LevelCount,
            CourseStatsResponse,
            SubscribeRequest,
            ValidatePromoRequest,
            SubscriptionResponse,
            MyCoursesResponse,
            SubscriptionStatsResponse,
            CheckSubscriptionResponse,
            PromoValidationResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "system", description = "Health check"),
        (name = "auth", description = "Authentication API"),
        (name = "course", description = "Course catalogue API"),
        (name = "subscription", description = "Subscription and promo code API"),
    ),
    info(
        title = "Course Catalog API",
        version = "1.0.0",
        description = "Course catalogue and subscription REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
