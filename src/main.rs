use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use course_catalog_backend::{
    config::Config,
    database::{create_pool, run_migrations, seed_sample_courses},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    if config.database.seed_sample_data
        && let Err(e) = seed_sample_courses(&pool).await
    {
        log::error!("Failed to seed sample courses: {e}");
    }

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expires_in);
    let pricing = PromoPricing::new(&config.promo);
    log::info!(
        "Promo pricing configured: {}% off paid courses",
        pricing.discount_percent()
    );

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let course_service = CourseService::new(pool.clone());
    let subscription_service = SubscriptionService::new(pool.clone(), pricing);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(course_service.clone()))
            .app_data(web::Data::new(subscription_service.clone()))
            .configure(handlers::extractor_config)
            .configure(swagger_config)
            .configure(handlers::api_config)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
