//! 示例课程数据

use crate::entities::{CourseLevel, course_entity as courses};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

struct SampleCourse {
    title: &'static str,
    description: &'static str,
    price_cents: i64,
    category: &'static str,
    duration: &'static str,
    level: CourseLevel,
}

const SAMPLE_COURSES: &[SampleCourse] = &[
    SampleCourse {
        title: "Full Stack Web Development Bootcamp",
        description: "Learn HTML, CSS, JavaScript, React, Node.js and databases. Build real-world projects from frontend to backend.",
        price_cents: 9999,
        category: "Web Development",
        duration: "12 weeks",
        level: CourseLevel::Beginner,
    },
    SampleCourse {
        title: "React Mastery Course",
        description: "Master React from basics to advanced concepts: hooks, context, state management and scalable application structure.",
        price_cents: 7999,
        category: "Frontend Development",
        duration: "8 weeks",
        level: CourseLevel::Intermediate,
    },
    SampleCourse {
        title: "Introduction to Programming",
        description: "Start your coding journey with programming fundamentals, problem solving and basic algorithms.",
        price_cents: 0,
        category: "Programming Basics",
        duration: "6 weeks",
        level: CourseLevel::Beginner,
    },
    SampleCourse {
        title: "Advanced Backend Development",
        description: "REST APIs, authentication, security, testing and deployment of production-ready backend services.",
        price_cents: 8999,
        category: "Backend Development",
        duration: "10 weeks",
        level: CourseLevel::Advanced,
    },
    SampleCourse {
        title: "UI/UX Design Fundamentals",
        description: "Principles of user interface and user experience design: wireframes, prototypes and visual design.",
        price_cents: 0,
        category: "Design",
        duration: "6 weeks",
        level: CourseLevel::Beginner,
    },
    SampleCourse {
        title: "Database Design",
        description: "Schema design, queries, indexing, aggregation and performance tuning for scalable databases.",
        price_cents: 6999,
        category: "Backend Development",
        duration: "8 weeks",
        level: CourseLevel::Intermediate,
    },
];

/// 课程表为空时写入示例课程，返回写入条数
pub async fn seed_sample_courses(pool: &DatabaseConnection) -> AppResult<usize> {
    let existing = courses::Entity::find().count(pool).await?;
    if existing > 0 {
        log::info!("Skipping course seed, {existing} courses already present");
        return Ok(0);
    }

    let now = Utc::now();
    for sample in SAMPLE_COURSES {
        courses::ActiveModel {
            title: Set(sample.title.to_string()),
            description: Set(sample.description.to_string()),
            price_cents: Set(sample.price_cents),
            image: Set(String::new()),
            category: Set(sample.category.to_string()),
            level: Set(sample.level.clone()),
            duration: Set(sample.duration.to_string()),
            instructor: Set("Expert Instructor".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(pool)
        .await?;
    }

    log::info!("Seeded {} sample courses", SAMPLE_COURSES.len());
    Ok(SAMPLE_COURSES.len())
}
