mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, test, web};
use common::*;
use course_catalog_backend::handlers;
use course_catalog_backend::middlewares::AuthMiddleware;
use serde_json::{Value, json};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new($state.jwt.clone()))
                .app_data(web::Data::new($state.auth.clone()))
                .app_data(web::Data::new($state.courses.clone()))
                .app_data(web::Data::new($state.subscriptions.clone()))
                .configure(handlers::extractor_config)
                .configure(handlers::api_config)
                .default_service(web::to(handlers::not_found)),
        )
        .await
    };
}

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

#[actix_web::test]
async fn health_is_public() {
    let state = TestState::new().await;
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn course_listing_is_public_but_writes_need_a_token() {
    let state = TestState::new().await;
    create_course(&state.courses, "Free Intro", "0").await;
    create_course(&state.courses, "Paid Deep Dive", "49.50").await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/courses?isFree=false")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["count"], json!(1));
    assert_eq!(body["data"]["courses"][0]["title"], json!("Paid Deep Dive"));
    assert_eq!(body["data"]["courses"][0]["price"].as_f64(), Some(49.5));
    assert_eq!(body["data"]["courses"][0]["isFree"], json!(false));

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .set_json(json!({"title": "Nope", "description": "No token"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(error_code(&body), "AUTH_ERROR");

    let req = test::TestRequest::get()
        .uri("/api/my-courses")
        .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn course_crud_over_http() {
    let state = TestState::new().await;
    let (_, token) = state.user_with_token("editor@example.com").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Rust", "description": "Systems", "price": 19.99, "level": "Advanced"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["category"], json!("General"));
    assert_eq!(body["data"]["level"], json!("Advanced"));

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer(&token))
        .set_json(json!({"title": "No description"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    let req = test::TestRequest::put()
        .uri(&format!("/api/courses/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({"price": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["isFree"], json!(true));
    assert_eq!(body["data"]["title"], json!("Rust"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/courses/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[actix_web::test]
async fn subscribe_flow_status_codes() {
    let state = TestState::new().await;
    let (_, token) = state.user_with_token("learner@example.com").await;
    let paid = create_course(&state.courses, "Bootcamp", "99.99").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .set_json(json!({"courseId": paid.id, "promoCode": PROMO_CODE}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .insert_header(bearer(&token))
        .set_json(json!({"courseId": paid.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"]["message"],
        json!("Promo code is required for paid courses")
    );

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .insert_header(bearer(&token))
        .set_json(json!({"courseId": paid.id, "promoCode": "WRONG"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], json!("Invalid promo code"));

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .insert_header(bearer(&token))
        .set_json(json!({"courseId": 9999}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .insert_header(bearer(&token))
        .set_json(json!({"courseId": paid.id, "promoCode": "learn50"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pricePaid"].as_f64(), Some(49.99));
    assert_eq!(body["data"]["discountApplied"].as_f64(), Some(50.0));
    assert_eq!(body["data"]["originalPrice"].as_f64(), Some(99.99));
    assert_eq!(body["data"]["promoCode"], json!("LEARN50"));
    assert_eq!(body["data"]["course"]["id"], json!(paid.id));

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .insert_header(bearer(&token))
        .set_json(json!({"courseId": paid.id, "promoCode": PROMO_CODE}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_code(&body), "CONFLICT");

    let req = test::TestRequest::get()
        .uri("/api/my-courses")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["count"], json!(1));

    let req = test::TestRequest::get()
        .uri("/api/subscriptions/stats")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalCourses"], json!(1));
    assert_eq!(body["data"]["totalSaved"].as_f64(), Some(50.0));

    let req = test::TestRequest::get()
        .uri(&format!("/api/subscriptions/check/{}", paid.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["isSubscribed"], json!(true));
}

#[actix_web::test]
async fn unsubscribe_is_owner_only() {
    let state = TestState::new().await;
    let (owner, owner_token) = state.user_with_token("owner@example.com").await;
    let (_, other_token) = state.user_with_token("intruder@example.com").await;
    let course = create_course(&state.courses, "Intro", "0").await;
    let sub = state
        .subscriptions
        .subscribe(
            owner,
            course_catalog_backend::models::SubscribeRequest {
                course_id: Some(course.id),
                promo_code: None,
            },
        )
        .await
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/subscriptions/{}", sub.id))
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_code(&body), "FORBIDDEN");

    let req = test::TestRequest::get()
        .uri(&format!("/api/subscriptions/{}", sub.id))
        .insert_header(bearer(&owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/subscriptions/{}", sub.id))
        .insert_header(bearer(&owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/subscriptions/{}", sub.id))
        .insert_header(bearer(&owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn validate_promo_endpoint() {
    let state = TestState::new().await;
    let (_, token) = state.user_with_token("promo@example.com").await;
    let course = create_course(&state.courses, "Bootcamp", "99.99").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/subscriptions/validate-promo")
        .insert_header(bearer(&token))
        .set_json(json!({"promoCode": "Learn50", "courseId": course.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["valid"], json!(true));
    assert_eq!(body["data"]["percentage"], json!(50));
    assert_eq!(body["data"]["finalPrice"].as_f64(), Some(49.99));

    let req = test::TestRequest::post()
        .uri("/api/subscriptions/validate-promo")
        .insert_header(bearer(&token))
        .set_json(json!({"courseId": course.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn signup_login_and_me() {
    let state = TestState::new().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"name": "Ada", "email": "Ada@Example.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["email"], json!("ada@example.com"));
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], json!("Ada"));
}

#[actix_web::test]
async fn malformed_requests_get_error_envelopes() {
    let state = TestState::new().await;
    let (_, token) = state.user_with_token("bad@example.com").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/subscribe")
        .insert_header(bearer(&token))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    let req = test::TestRequest::get()
        .uri("/api/courses/not-a-number")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/courses?isFree=maybe")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/no-such-route")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], json!("Route not found"));
}

#[actix_web::test]
async fn blank_course_filters_mean_no_filter() {
    let state = TestState::new().await;
    create_course(&state.courses, "Free Intro", "0").await;
    create_course(&state.courses, "Paid Deep Dive", "49.50").await;
    let app = init_app!(state);

    for uri in [
        "/api/courses?search=&category=&level=&isFree=",
        "/api/courses?isFree=",
        "/api/courses?level=",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["count"], json!(2), "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/courses?level=Beginner&isFree=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["count"], json!(1));
    assert_eq!(body["data"]["courses"][0]["title"], json!("Free Intro"));

    let req = test::TestRequest::get()
        .uri("/api/courses?level=Expert")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_route_without_token_is_not_found() {
    let state = TestState::new().await;
    let app = init_app!(state);

    for uri in ["/api/no-such-route", "/api/subscriptions/1/extra", "/nowhere"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(error_code(&body), "NOT_FOUND");
    }

    // 已注册的受保护路由仍需令牌
    let req = test::TestRequest::get()
        .uri("/api/subscriptions/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
