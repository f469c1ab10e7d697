use crate::models::*;
use crate::services::CourseService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/courses",
    tag = "course",
    params(CourseQuery),
    responses(
        (status = 200, description = "Course list", body = CourseListResponse),
        (status = 400, description = "Invalid filter", body = ApiErrorResponse)
    )
)]
pub async fn list_courses(
    course_service: web::Data<CourseService>,
    query: web::Query<CourseQuery>,
) -> Result<HttpResponse> {
    match course_service.list_courses(&query).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(CourseListResponse {
            count: courses.len(),
            courses,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "course",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Course not found", body = ApiErrorResponse)
    )
)]
pub async fn get_course(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match course_service.get_course(path.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/courses",
    tag = "course",
    request_body = CreateCourseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Missing title or description", body = ApiErrorResponse),
        (status = 401, description = "Not authorized", body = ApiErrorResponse)
    )
)]
pub async fn create_course(
    course_service: web::Data<CourseService>,
    request: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse> {
    match course_service.create_course(request.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            course,
            "Course created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "course",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found", body = ApiErrorResponse)
    )
)]
pub async fn update_course(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
    request: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse> {
    match course_service
        .update_course(path.into_inner(), request.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            course,
            "Course updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "course",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ApiErrorResponse)
    )
)]
pub async fn delete_course(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match course_service.delete_course(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Course deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/categories",
    tag = "course",
    responses(
        (status = 200, description = "Distinct categories", body = CategoryListResponse)
    )
)]
pub async fn get_categories(course_service: web::Data<CourseService>) -> Result<HttpResponse> {
    match course_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CategoryListResponse {
                count: categories.len(),
                categories,
            },
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/stats",
    tag = "course",
    responses(
        (status = 200, description = "Catalogue statistics", body = CourseStatsResponse)
    )
)]
pub async fn get_course_stats(course_service: web::Data<CourseService>) -> Result<HttpResponse> {
    match course_service.get_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn course_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route("", web::get().to(list_courses))
            .route("", web::post().to(create_course))
            .route("/categories", web::get().to(get_categories))
            .route("/stats", web::get().to(get_course_stats))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", web::put().to(update_course))
            .route("/{id}", web::delete().to(delete_course)),
    );
}
